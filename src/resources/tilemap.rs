//! Tilemap data types and loading.
//!
//! Maps are authored as JSON (a Tilesetter export extended with the tileset
//! image path and the list of impassable tile ids). Positions are in tiles
//! with row 0 at the top of the map, as the editor writes them.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::assetcache::AssetHandle;

/// Largest number of cells a map may have.
pub const MAX_MAP_CELLS: u64 = 1 << 24;

/// Errors raised while loading a map or building a collision layer from it.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse map JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tile size must be non-zero, got {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },
    #[error("map has no layer named '{0}'")]
    MissingLayer(String),
    #[error("map of {columns}x{rows} tiles of {tile_size}px is too large")]
    MapTooLarge {
        columns: u32,
        rows: u32,
        tile_size: u32,
    },
    #[error("tile ({x}, {y}) lies outside the {columns}x{rows} map")]
    TileOutOfBounds {
        x: u32,
        y: u32,
        columns: u32,
        rows: u32,
    },
}

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles, counted from the top row.
    pub y: u32,
    /// Tile identifier (tileset-local).
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// Tilemap metadata and layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a (square) tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Tileset image, relative to the asset root.
    #[serde(default)]
    pub tileset: Option<String>,
    /// Tile ids that the player cannot walk through.
    #[serde(default)]
    pub blocked_tiles: Vec<u32>,
    pub layers: Vec<Tilelayer>,
}

impl Tilemap {
    /// Parse a tilemap from a JSON string.
    ///
    /// Maps whose cell count or pixel size does not fit are rejected with
    /// [`MapError::MapTooLarge`].
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let tilemap: Self = serde_json::from_str(json)?;
        tilemap.check_size()?;
        Ok(tilemap)
    }

    /// Check that the map's cells and pixel extent stay within bounds.
    pub fn check_size(&self) -> Result<(), MapError> {
        let too_large = || MapError::MapTooLarge {
            columns: self.map_width,
            rows: self.map_height,
            tile_size: self.tile_size,
        };
        self.map_width.checked_mul(self.tile_size).ok_or_else(too_large)?;
        self.map_height.checked_mul(self.tile_size).ok_or_else(too_large)?;
        if u64::from(self.map_width) * u64::from(self.map_height) > MAX_MAP_CELLS {
            return Err(too_large());
        }
        Ok(())
    }

    /// Read and parse a tilemap JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Find a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Tilelayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Map size in pixels as `(width, height)`.
    pub fn pixel_size(&self) -> (f32, f32) {
        let tile = self.tile_size as f32;
        (self.map_width as f32 * tile, self.map_height as f32 * tile)
    }
}

/// The map of the current session, plus the tileset texture used to draw it.
///
/// Inserted by the composition root once the map has been parsed. The
/// tileset handle is filled in when the play screen is entered and released
/// again when it is left.
#[derive(Resource, Debug, Clone)]
pub struct LoadedMap {
    pub tilemap: Tilemap,
    pub tileset: Option<AssetHandle>,
}

impl LoadedMap {
    pub fn new(tilemap: Tilemap) -> Self {
        Self {
            tilemap,
            tileset: None,
        }
    }
}
