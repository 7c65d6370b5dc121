//! Screen flow integration tests: pending transitions, enter/exit hooks run
//! through the systems store, the one-shot loading screen, confirm/back
//! navigation and the debug toggle.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use raylib::prelude::KeyboardKey;

use heslington_hustle::components::persistent::Persistent;
use heslington_hustle::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use heslington_hustle::events::input::KeyEvent;
use heslington_hustle::events::switchdebug::switch_debug_observer;
use heslington_hustle::resources::debugmode::DebugMode;
use heslington_hustle::resources::gameconfig::GameConfig;
use heslington_hustle::resources::gamestate::{GameState, GameStates, NextGameState};
use heslington_hustle::resources::input::InputState;
use heslington_hustle::resources::systemsstore::{SystemsStore, hooks};
use heslington_hustle::systems::gamestate::{
    check_pending_state, loading_screen, screen_navigation_observer, state_is_loading,
};
use heslington_hustle::systems::input::dispatch_key_events;

/// Names of the hooks in the order they ran.
#[derive(Resource, Default)]
struct HookLog(Vec<&'static str>);

fn log_enter_menu(mut log: ResMut<HookLog>) {
    log.0.push(hooks::ENTER_MENU);
}

fn log_enter_play(mut log: ResMut<HookLog>) {
    log.0.push(hooks::ENTER_PLAY);
}

fn log_clean_scene(mut log: ResMut<HookLog>) {
    log.0.push(hooks::CLEAN_SCENE);
}

fn make_world(config: GameConfig, with_hooks: bool) -> World {
    let mut world = World::new();
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(InputState::default());
    world.insert_resource(config);
    world.init_resource::<HookLog>();

    let mut store = SystemsStore::new();
    if with_hooks {
        store.insert(hooks::ENTER_MENU, world.register_system(log_enter_menu));
        store.insert(hooks::ENTER_PLAY, world.register_system(log_enter_play));
        store.insert(hooks::CLEAN_SCENE, world.register_system(log_clean_scene));
    }
    world.insert_resource(store);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(screen_navigation_observer), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.flush();
    world
}

fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(check_pending_state);
    schedule.add_systems(
        loading_screen
            .run_if(state_is_loading)
            .after(check_pending_state),
    );
    schedule
}

/// Request `state` and apply it right away, like the composition root does
/// for the first screen.
fn go_to(world: &mut World, state: GameStates) {
    world.resource_mut::<NextGameState>().set(state);
    world.trigger(GameStateChangedEvent {});
    world.flush();
}

fn current(world: &World) -> GameStates {
    world.resource::<GameState>().get()
}

fn hook_log(world: &World) -> Vec<&'static str> {
    world.resource::<HookLog>().0.clone()
}

fn clear_log(world: &mut World) {
    world.resource_mut::<HookLog>().0.clear();
}

fn press(world: &mut World, key: KeyboardKey) {
    world.trigger(KeyEvent::down(key));
    world.flush();
}

#[test]
fn loading_forwards_to_menu_exactly_once() {
    let mut world = make_world(GameConfig::new(), true);
    let mut schedule = frame_schedule();
    go_to(&mut world, GameStates::Loading);
    assert_eq!(current(&world), GameStates::Loading);
    assert!(hook_log(&world).is_empty());

    // First frame requests the menu, the second applies it.
    schedule.run(&mut world);
    assert!(world.resource::<NextGameState>().is_pending());
    schedule.run(&mut world);
    assert_eq!(current(&world), GameStates::Menu);
    assert_eq!(hook_log(&world), vec![hooks::ENTER_MENU]);

    // Forcing the loading screen back does not forward again.
    world.resource_mut::<GameState>().set(GameStates::Loading);
    schedule.run(&mut world);
    schedule.run(&mut world);
    assert_eq!(current(&world), GameStates::Loading);
    assert!(!world.resource::<NextGameState>().is_pending());
    assert_eq!(hook_log(&world), vec![hooks::ENTER_MENU]);
}

#[test]
fn loading_forwards_to_configured_screen() {
    let mut config = GameConfig::new();
    config.after_loading = GameStates::Playing;
    let mut world = make_world(config, true);
    let mut schedule = frame_schedule();
    go_to(&mut world, GameStates::Loading);

    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(current(&world), GameStates::Playing);
    assert_eq!(hook_log(&world), vec![hooks::ENTER_PLAY]);
}

#[test]
fn confirm_in_menu_starts_playing_after_cleaning_menu() {
    let mut world = make_world(GameConfig::new(), true);
    let mut schedule = frame_schedule();
    go_to(&mut world, GameStates::Menu);
    clear_log(&mut world);

    press(&mut world, KeyboardKey::KEY_ENTER);
    assert_eq!(current(&world), GameStates::Menu);
    schedule.run(&mut world);

    assert_eq!(current(&world), GameStates::Playing);
    assert_eq!(hook_log(&world), vec![hooks::CLEAN_SCENE, hooks::ENTER_PLAY]);
}

#[test]
fn back_in_menu_quits() {
    let mut world = make_world(GameConfig::new(), true);
    let mut schedule = frame_schedule();
    go_to(&mut world, GameStates::Menu);
    clear_log(&mut world);

    press(&mut world, KeyboardKey::KEY_ESCAPE);
    schedule.run(&mut world);

    assert_eq!(current(&world), GameStates::Quitting);
    assert_eq!(hook_log(&world), vec![hooks::CLEAN_SCENE]);
}

#[test]
fn back_while_playing_returns_to_menu() {
    let mut world = make_world(GameConfig::new(), true);
    let mut schedule = frame_schedule();
    go_to(&mut world, GameStates::Playing);
    clear_log(&mut world);

    press(&mut world, KeyboardKey::KEY_ESCAPE);
    schedule.run(&mut world);

    assert_eq!(current(&world), GameStates::Menu);
    assert_eq!(hook_log(&world), vec![hooks::CLEAN_SCENE, hooks::ENTER_MENU]);
}

#[test]
fn confirm_while_playing_does_nothing() {
    let mut world = make_world(GameConfig::new(), true);
    go_to(&mut world, GameStates::Playing);

    press(&mut world, KeyboardKey::KEY_ENTER);
    assert!(!world.resource::<NextGameState>().is_pending());
}

#[test]
fn key_release_does_not_navigate() {
    let mut world = make_world(GameConfig::new(), true);
    go_to(&mut world, GameStates::Menu);

    world.trigger(KeyEvent::up(KeyboardKey::KEY_ENTER));
    world.flush();
    assert!(!world.resource::<NextGameState>().is_pending());
}

#[test]
fn transition_to_current_screen_runs_no_hooks() {
    let mut world = make_world(GameConfig::new(), true);
    go_to(&mut world, GameStates::Menu);
    clear_log(&mut world);

    go_to(&mut world, GameStates::Menu);

    assert_eq!(current(&world), GameStates::Menu);
    assert!(hook_log(&world).is_empty());
    assert!(!world.resource::<NextGameState>().is_pending());
}

#[test]
fn missing_hooks_still_change_screen() {
    let mut world = make_world(GameConfig::new(), false);
    go_to(&mut world, GameStates::Menu);
    go_to(&mut world, GameStates::Playing);

    assert_eq!(current(&world), GameStates::Playing);
    assert!(hook_log(&world).is_empty());
}

#[test]
fn debug_key_toggles_overlay() {
    let mut world = make_world(GameConfig::new(), true);
    let mut input = InputState::default();

    let mut toggle = |world: &mut World, down: bool| {
        let events = input.apply(|key| down && key == KeyboardKey::KEY_F11);
        let mut state = SystemState::<Commands>::new(world);
        let mut commands = state.get_mut(world);
        dispatch_key_events(&input, &events, &mut commands);
        state.apply(world);
        world.flush();
    };

    toggle(&mut world, true);
    assert!(world.contains_resource::<DebugMode>());
    // Holding the key does not toggle again.
    toggle(&mut world, true);
    assert!(world.contains_resource::<DebugMode>());
    toggle(&mut world, false);
    toggle(&mut world, true);
    assert!(!world.contains_resource::<DebugMode>());
}
