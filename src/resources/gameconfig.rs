//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! title = Heslington Hustle
//!
//! [player]
//! speed = 300
//! scale = 3
//! start_x = 96
//! start_y = 96
//!
//! [assets]
//! root = ./assets
//! map = maps/campus.json
//! collision_layer = collision
//!
//! [screens]
//! after_loading = menu
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::components::player::{DEFAULT_SCALE, DEFAULT_SPEED};
use crate::resources::gamestate::GameStates;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "Heslington Hustle";
const DEFAULT_START: (f32, f32) = (96.0, 96.0);
const DEFAULT_ASSET_ROOT: &str = "./assets";
const DEFAULT_MAP: &str = "maps/campus.json";
const DEFAULT_COLLISION_LAYER: &str = "collision";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    pub title: String,
    /// Player speed in world units per second.
    pub player_speed: f32,
    /// Factor applied to the player sprite's pixel size.
    pub player_scale: f32,
    /// Player spawn point (lower-left corner, world units).
    pub player_start: (f32, f32),
    /// Directory every asset path is relative to.
    pub asset_root: PathBuf,
    /// Map JSON, relative to the asset root.
    pub map: PathBuf,
    /// Name of the map layer holding collision tiles.
    pub collision_layer: String,
    /// Screen the loading screen forwards to.
    pub after_loading: GameStates,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            player_speed: DEFAULT_SPEED,
            player_scale: DEFAULT_SCALE,
            player_start: DEFAULT_START,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            map: PathBuf::from(DEFAULT_MAP),
            collision_layer: DEFAULT_COLLISION_LAYER.to_string(),
            after_loading: GameStates::Menu,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Full path of the map file.
    pub fn map_path(&self) -> PathBuf {
        self.asset_root.join(&self.map)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or malformed values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [player] section
        if let Some(speed) = config.getfloat("player", "speed").ok().flatten() {
            if speed > 0.0 && speed.is_finite() {
                self.player_speed = speed as f32;
            } else {
                warn!("Ignoring invalid player speed {}", speed);
            }
        }
        if let Some(scale) = config.getfloat("player", "scale").ok().flatten() {
            if scale > 0.0 && scale.is_finite() {
                self.player_scale = scale as f32;
            } else {
                warn!("Ignoring invalid player scale {}", scale);
            }
        }
        if let Some(x) = config.getfloat("player", "start_x").ok().flatten() {
            self.player_start.0 = x as f32;
        }
        if let Some(y) = config.getfloat("player", "start_y").ok().flatten() {
            self.player_start.1 = y as f32;
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }
        if let Some(map) = config.get("assets", "map") {
            self.map = PathBuf::from(map);
        }
        if let Some(layer) = config.get("assets", "collision_layer") {
            self.collision_layer = layer;
        }

        // [screens] section
        if let Some(next) = config.get("screens", "after_loading") {
            match next.parse::<GameStates>() {
                Ok(GameStates::Menu) => self.after_loading = GameStates::Menu,
                Ok(GameStates::Playing) => self.after_loading = GameStates::Playing,
                Ok(other) => warn!("Loading screen cannot forward to {}, keeping {}", other, self.after_loading),
                Err(e) => warn!("{}, keeping {}", e, self.after_loading),
            }
        }

        info!(
            "Loaded config: {}x{} window, fps={}, speed={}, scale={}, map={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.player_speed,
            self.player_scale,
            self.map_path().display()
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "title", Some(self.title.clone()));

        config.set("player", "speed", Some(self.player_speed.to_string()));
        config.set("player", "scale", Some(self.player_scale.to_string()));
        config.set("player", "start_x", Some(self.player_start.0.to_string()));
        config.set("player", "start_y", Some(self.player_start.1.to_string()));

        config.set("assets", "root", Some(path_string(&self.asset_root)));
        config.set("assets", "map", Some(path_string(&self.map)));
        config.set("assets", "collision_layer", Some(self.collision_layer.clone()));

        config.set("screens", "after_loading", Some(self.after_loading.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.player_speed, 300.0);
        assert_eq!(config.player_scale, 3.0);
        assert_eq!(config.after_loading, GameStates::Menu);
        assert_eq!(config.map_path(), PathBuf::from("./assets/maps/campus.json"));
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let mut config = GameConfig::with_path("/no/such/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("/no/such/config.ini"));
    }

    #[test]
    fn test_load_overrides_present_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(
            &path,
            "[window]\nwidth = 800\n\n[player]\nspeed = 120.5\nscale = 0\n\n\
             [assets]\nmap = maps/test.json\n\n[screens]\nafter_loading = playing\n",
        )
        .unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();

        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(config.player_speed, 120.5);
        // Non-positive scale is rejected.
        assert_eq!(config.player_scale, DEFAULT_SCALE);
        assert_eq!(config.map, PathBuf::from("maps/test.json"));
        assert_eq!(config.after_loading, GameStates::Playing);
    }

    #[test]
    fn test_invalid_speed_and_scale_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        for (speed, scale) in [("-50", "inf"), ("NaN", "-2"), ("0", "NaN"), ("inf", "0")] {
            std::fs::write(
                &path,
                format!("[player]\nspeed = {}\nscale = {}\n", speed, scale),
            )
            .unwrap();

            let mut config = GameConfig::with_path(&path);
            config.load_from_file().unwrap();

            assert_eq!(config.player_speed, DEFAULT_SPEED, "speed = {}", speed);
            assert_eq!(config.player_scale, DEFAULT_SCALE, "scale = {}", scale);
        }
    }

    #[test]
    fn test_after_loading_rejects_other_screens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[screens]\nafter_loading = quitting\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.after_loading, GameStates::Menu);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut saved = GameConfig::with_path(&path);
        saved.window_width = 640;
        saved.player_speed = 150.0;
        saved.player_start = (32.0, 64.0);
        saved.collision_layer = "walls".into();
        saved.after_loading = GameStates::Playing;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);
    }
}
