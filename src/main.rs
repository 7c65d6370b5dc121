//! Heslington Hustle entry point.
//!
//! A top-down campus game written in Rust using:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for the entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the map; a missing or broken map is fatal
//! 2. Open the raylib window, build the ECS world and its resources
//! 3. Register screen hooks and observers, enter the loading screen
//! 4. Each frame: advance time, poll input, apply screen transitions, move
//!    the player, draw
//! 5. Release every tracked texture before the window closes
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use clap::Parser;
use log::{error, info};

use heslington_hustle::components::persistent::Persistent;
use heslington_hustle::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use heslington_hustle::events::switchdebug::switch_debug_observer;
use heslington_hustle::game;
use heslington_hustle::resources::assetcache::TextureCache;
use heslington_hustle::resources::collisionlayer::CollisionLayer;
use heslington_hustle::resources::gameconfig::GameConfig;
use heslington_hustle::resources::gamestate::{GameState, GameStates, NextGameState};
use heslington_hustle::resources::input::InputState;
use heslington_hustle::resources::systemsstore::{SystemsStore, hooks};
use heslington_hustle::resources::tilemap::{LoadedMap, Tilemap};
use heslington_hustle::resources::worldtime::WorldTime;
use heslington_hustle::systems::camera::camera_follow;
use heslington_hustle::systems::gamestate::{
    check_pending_state, loading_screen, screen_navigation_observer, state_is_loading,
    state_is_playing,
};
use heslington_hustle::systems::input::update_input_state;
use heslington_hustle::systems::player::{player_key_observer, player_movement};
use heslington_hustle::systems::render::render_system;
use heslington_hustle::systems::time::update_world_time;

/// Heslington Hustle
#[derive(Parser)]
#[command(version, about = "Top-down campus game built on raylib and bevy_ecs")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Map JSON to load instead of the one named in the config file,
    /// relative to the asset root.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    verbose: bool,
}

/// Register a one-shot system that must survive scene cleanup.
fn register_hook<M>(
    world: &mut World,
    store: &mut SystemsStore,
    name: &str,
    system: impl IntoSystem<(), (), M> + 'static,
) {
    let id: SystemId = world.register_system(system);
    world.entity_mut(id.entity()).insert(Persistent);
    store.insert(name, id);
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("Starting Heslington Hustle");

    // --------------- Config & map ---------------
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("{}; using defaults", e);
    }
    if let Some(map) = cli.map {
        config.map = map;
    }

    let map_path = config.map_path();
    let tilemap = match Tilemap::load_from_file(&map_path) {
        Ok(tilemap) => tilemap,
        Err(e) => {
            error!("Cannot load map {}: {}", map_path.display(), e);
            process::exit(1);
        }
    };
    let collision = match CollisionLayer::from_tilemap(&tilemap, &config.collision_layer) {
        Ok(layer) => layer,
        Err(e) => {
            error!("Cannot build collision layer: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Map {} loaded: {}x{} tiles, {} blocked",
        map_path.display(),
        collision.columns(),
        collision.rows(),
        collision.blocked_cells().count()
    );

    let mut textures = TextureCache::new(&config.asset_root);
    game::register_textures(&mut textures, &tilemap);

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape navigates between screens
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(LoadedMap::new(tilemap));
    world.insert_resource(collision);
    world.insert_resource(config);
    world.insert_non_send_resource(textures);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(player_key_observer), Persistent));
    world.spawn((Observer::new(screen_navigation_observer), Persistent));

    // NOTE: registered systems are entities, so they carry Persistent too.
    let mut systems_store = SystemsStore::new();
    register_hook(&mut world, &mut systems_store, hooks::ENTER_MENU, game::enter_menu);
    register_hook(&mut world, &mut systems_store, hooks::ENTER_PLAY, game::enter_play);
    register_hook(&mut world, &mut systems_store, hooks::CLEAN_SCENE, game::clean_scene);
    world.insert_resource(systems_store);

    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Loading);
    world.trigger(GameStateChangedEvent {});

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(check_pending_state.after(update_input_state));
    update.add_systems(
        loading_screen
            .run_if(state_is_loading)
            .after(check_pending_state),
    );
    update.add_systems(
        player_movement
            .run_if(state_is_playing)
            .after(check_pending_state),
    );
    update.add_systems(camera_follow.run_if(state_is_playing).after(player_movement));
    update.add_systems(render_system.after(camera_follow).after(loading_screen));

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }

    // Textures must go before the window they were loaded into.
    let released = world.non_send_resource_mut::<TextureCache>().dispose_all();
    info!("Released {} textures, bye", released);
}
