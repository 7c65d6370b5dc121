//! ECS resources made available to systems.
//!
//! Overview
//! - `assetcache` – keyed asset loading with tracked instances and explicit release
//! - `camera2d` – shared 2D camera used for world/screen transforms
//! - `collisionlayer` – tile grid queried by the player's collision probes
//! - `debugmode` – presence toggles the collision overlay
//! - `gameconfig` – settings loaded from `config.ini`
//! - `gamestate` – authoritative and pending screen
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `systemsstore` – registry of screen hook systems by name
//! - `tilemap` – map file data and the loaded map
//! - `worldtime` – simulation time and delta
pub mod assetcache;
pub mod camera2d;
pub mod collisionlayer;
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod systemsstore;
pub mod tilemap;
pub mod worldtime;
