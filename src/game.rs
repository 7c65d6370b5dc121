//! Screen hooks and asset catalogue.
//!
//! The hooks are registered as one-shot systems in
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run by
//! the game state observer:
//! - [`enter_menu`] shows the title.
//! - [`enter_play`] spawns the player and fetches the tileset.
//! - [`clean_scene`] runs when the menu or play screen is left and releases
//!   everything the screen fetched from the texture cache.
//!
//! A texture that cannot be loaded is logged and the game quits.

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::{RaylibHandle, RaylibThread, Vector2};

use crate::components::inputcontrolled::InputControlled;
use crate::components::persistent::Persistent;
use crate::components::player::Player;
use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::Sprite;
use crate::resources::assetcache::{
    AssetCache, AssetError, AssetHandle, RaylibTextureLoader, TextureCache,
};
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::tilemap::{LoadedMap, Tilemap};

/// Cache keys of the textures the game uses.
pub mod textures {
    pub const MAIN_MENU_TITLE: &str = "main_menu_title";
    pub const PLAYER: &str = "player";
    pub const TILESET: &str = "tileset";
}

/// Register the game's textures with the cache.
///
/// The tileset is only registered when the map names one.
pub fn register_textures<T>(cache: &mut AssetCache<T>, tilemap: &Tilemap) {
    cache.register(textures::MAIN_MENU_TITLE, "images/main_menu_title.png");
    cache.register(textures::PLAYER, "images/player.png");
    if let Some(tileset) = &tilemap.tileset {
        cache.register(textures::TILESET, tileset);
    }
}

/// Dispose every handle, logging the ones the cache no longer tracks.
///
/// Returns how many instances were released.
pub fn dispose_handles<'a, T>(
    cache: &mut AssetCache<T>,
    handles: impl IntoIterator<Item = &'a AssetHandle>,
) -> usize {
    let mut released = 0;
    for handle in handles {
        match cache.dispose(handle) {
            Ok(()) => released += 1,
            Err(e) => warn!("{}", e),
        }
    }
    released
}

fn fail_screen(next_state: &mut NextGameState, e: AssetError) {
    error!("{}", e);
    next_state.set(GameStates::Quitting);
}

pub fn enter_menu(
    mut commands: Commands,
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    mut cache: NonSendMut<TextureCache>,
    mut next_state: ResMut<NextGameState>,
) {
    let screen_w = rl.get_screen_width() as f32;
    let screen_h = rl.get_screen_height() as f32;
    let mut loader = RaylibTextureLoader {
        rl: &mut *rl,
        thread: &*thread,
    };
    let handle = match cache.get(textures::MAIN_MENU_TITLE, &mut loader) {
        Ok(handle) => handle,
        Err(e) => return fail_screen(&mut next_state, e),
    };
    let Some((w, h)) = cache
        .resolve(&handle)
        .map(|tex| (tex.width as f32, tex.height as f32))
    else {
        return;
    };
    commands.spawn((
        Sprite::new(handle, w, h),
        ScreenPosition::centered(w, h, screen_w, screen_h),
    ));
    info!("Menu ready");
}

pub fn enter_play(
    mut commands: Commands,
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    mut cache: NonSendMut<TextureCache>,
    mut next_state: ResMut<NextGameState>,
    mut map: ResMut<LoadedMap>,
    config: Res<GameConfig>,
) {
    let screen_w = rl.get_screen_width() as f32;
    let screen_h = rl.get_screen_height() as f32;
    let mut loader = RaylibTextureLoader {
        rl: &mut *rl,
        thread: &*thread,
    };

    if cache.is_registered(textures::TILESET) {
        match cache.get(textures::TILESET, &mut loader) {
            Ok(handle) => map.tileset = Some(handle),
            Err(e) => return fail_screen(&mut next_state, e),
        }
    } else {
        warn!("Map has no tileset, drawing the player only");
    }

    let handle = match cache.get(textures::PLAYER, &mut loader) {
        Ok(handle) => handle,
        Err(e) => return fail_screen(&mut next_state, e),
    };
    let Some((tex_w, tex_h)) = cache
        .resolve(&handle)
        .map(|tex| (tex.width as f32, tex.height as f32))
    else {
        return;
    };

    let (x, y) = config.player_start;
    let player = Player::new(Vector2::new(x, y), tex_w, tex_h, config.player_scale)
        .with_speed(config.player_speed);
    let size = player.size();
    commands.spawn((player, Sprite::new(handle, size.x, size.y), InputControlled));
    commands.insert_resource(Camera2DRes::centered(screen_w, screen_h, Vector2::zero()));
    info!("Player spawned at ({}, {}) with size {}x{}", x, y, size.x, size.y);
}

/// Despawn the current screen's sprites and release their textures.
pub fn clean_scene(
    mut commands: Commands,
    sprites: Query<(Entity, &Sprite), Without<Persistent>>,
    mut cache: NonSendMut<TextureCache>,
    map: Option<ResMut<LoadedMap>>,
) {
    let released = dispose_handles(
        &mut *cache,
        sprites.iter().map(|(_, sprite)| &sprite.texture),
    );
    for (entity, _) in sprites.iter() {
        commands.entity(entity).despawn();
    }
    let tileset = map.and_then(|mut map| map.tileset.take());
    let released = released + dispose_handles(&mut *cache, tileset.iter());
    info!(
        "Scene cleaned: {} textures released, {} still tracked",
        released,
        cache.total_tracked()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn map_with_tileset(tileset: Option<&str>) -> Tilemap {
        Tilemap {
            tile_size: 32,
            map_width: 4,
            map_height: 4,
            tileset: tileset.map(str::to_string),
            blocked_tiles: vec![],
            layers: vec![],
        }
    }

    fn loader(path: &Path) -> Result<String, AssetError> {
        Ok(path.display().to_string())
    }

    #[test]
    fn test_register_textures_with_tileset() {
        let mut cache: AssetCache<String> = AssetCache::new("assets");
        register_textures(&mut cache, &map_with_tileset(Some("images/campus.png")));

        assert!(cache.is_registered(textures::MAIN_MENU_TITLE));
        assert!(cache.is_registered(textures::PLAYER));
        let h = cache.get(textures::TILESET, &mut loader).unwrap();
        let expected = Path::new("assets").join("images/campus.png").display().to_string();
        assert_eq!(cache.resolve(&h), Some(&expected));
    }

    #[test]
    fn test_register_textures_without_tileset() {
        let mut cache: AssetCache<String> = AssetCache::new("assets");
        register_textures(&mut cache, &map_with_tileset(None));
        assert!(!cache.is_registered(textures::TILESET));
        assert_eq!(cache.keys().count(), 2);
    }

    #[test]
    fn test_dispose_handles_skips_stale_handles() {
        let mut cache: AssetCache<String> = AssetCache::new("assets");
        register_textures(&mut cache, &map_with_tileset(None));
        let a = cache.get(textures::PLAYER, &mut loader).unwrap();
        let b = cache.get(textures::PLAYER, &mut loader).unwrap();
        cache.dispose(&a).unwrap();

        assert_eq!(dispose_handles(&mut cache, [&a, &b]), 1);
        assert_eq!(cache.tracked_count(textures::PLAYER), 0);
    }
}
