//! Tile collision grid.
//!
//! The [`TileGrid`] trait is the read-only view the player controller uses
//! to ask "is the tile under this world point impassable?". The
//! [`CollisionLayer`] resource is the concrete grid built from a map layer at
//! load time.
//!
//! World coordinates are y-up with the origin at the lower-left corner of the
//! map, so row 0 is the bottom row of tiles. A world point maps to the cell
//! `(floor(x / tile_width), floor(y / tile_height))`. Points left of or below
//! the origin, and points past the last column/row, have no cell.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

use crate::resources::tilemap::{MAX_MAP_CELLS, MapError, Tilemap};

/// A tile placed in the collision grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Tileset-local identifier.
    pub id: u32,
    /// Impassable for the player.
    pub blocked: bool,
}

impl Tile {
    pub fn new(id: u32, blocked: bool) -> Self {
        Self { id, blocked }
    }
}

/// Read-only query interface over a grid of tiles.
pub trait TileGrid {
    /// Width of one tile in world units.
    fn tile_width(&self) -> u32;
    /// Height of one tile in world units.
    fn tile_height(&self) -> u32;
    /// Tile at `(col, row)`, or `None` when the cell is empty or off the grid.
    fn cell_at(&self, col: u32, row: u32) -> Option<&Tile>;

    /// Whether the tile under the world point `(x, y)` is blocked.
    ///
    /// Empty cells and points outside the grid are never blocked.
    fn is_blocked_at(&self, x: f32, y: f32) -> bool {
        let (Some(col), Some(row)) = (
            cell_index(x, self.tile_width()),
            cell_index(y, self.tile_height()),
        ) else {
            return false;
        };
        self.cell_at(col, row).is_some_and(|tile| tile.blocked)
    }
}

/// Convert one world coordinate into a cell index along that axis.
fn cell_index(coord: f32, extent: u32) -> Option<u32> {
    // Also rejects NaN.
    if !(coord >= 0.0) || extent == 0 {
        return None;
    }
    let index = (coord / extent as f32).floor();
    if index > u32::MAX as f32 {
        return None;
    }
    Some(index as u32)
}

/// Dense grid of optional tiles, stored row-major from the bottom row.
#[derive(Resource, Debug, Clone)]
pub struct CollisionLayer {
    columns: u32,
    rows: u32,
    tile_width: u32,
    tile_height: u32,
    cells: Vec<Option<Tile>>,
}

impl CollisionLayer {
    /// Create an empty grid of `columns` x `rows` cells.
    ///
    /// Fails before allocating when the grid would exceed [`MAX_MAP_CELLS`].
    pub fn new(columns: u32, rows: u32, tile_width: u32, tile_height: u32) -> Result<Self, MapError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(MapError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        let cells = u64::from(columns) * u64::from(rows);
        if cells > MAX_MAP_CELLS {
            return Err(MapError::MapTooLarge {
                columns,
                rows,
                tile_size: tile_width,
            });
        }
        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            cells: vec![None; cells as usize],
        })
    }

    /// Build the grid from the layer `layer_name` of `tilemap`.
    ///
    /// Tile ids listed in [`Tilemap::blocked_tiles`] become blocked tiles.
    /// Rows are flipped from the editor's top-down order to the world's
    /// bottom-up order.
    pub fn from_tilemap(tilemap: &Tilemap, layer_name: &str) -> Result<Self, MapError> {
        let layer = tilemap
            .layer(layer_name)
            .ok_or_else(|| MapError::MissingLayer(layer_name.to_string()))?;
        tilemap.check_size()?;
        let mut grid = Self::new(
            tilemap.map_width,
            tilemap.map_height,
            tilemap.tile_size,
            tilemap.tile_size,
        )?;
        let blocked: FxHashSet<u32> = tilemap.blocked_tiles.iter().copied().collect();

        for pos in &layer.positions {
            if pos.x >= grid.columns || pos.y >= grid.rows {
                return Err(MapError::TileOutOfBounds {
                    x: pos.x,
                    y: pos.y,
                    columns: grid.columns,
                    rows: grid.rows,
                });
            }
            let row = grid.rows - 1 - pos.y;
            grid.set_tile(pos.x, row, Tile::new(pos.id, blocked.contains(&pos.id)));
        }
        Ok(grid)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + col as usize)
    }

    /// Place a tile. Returns `false` when `(col, row)` is off the grid.
    pub fn set_tile(&mut self, col: u32, row: u32, tile: Tile) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.cells[i] = Some(tile);
                true
            }
            None => false,
        }
    }

    /// Remove the tile at `(col, row)`, returning it if there was one.
    pub fn clear_cell(&mut self, col: u32, row: u32) -> Option<Tile> {
        let i = self.index(col, row)?;
        self.cells[i].take()
    }

    /// Iterate the `(col, row)` of every blocked cell.
    pub fn blocked_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let columns = self.columns as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.filter(|t| t.blocked)
                .map(|_| ((i % columns) as u32, (i / columns) as u32))
        })
    }
}

impl TileGrid for CollisionLayer {
    fn tile_width(&self) -> u32 {
        self.tile_width
    }

    fn tile_height(&self) -> u32 {
        self.tile_height
    }

    fn cell_at(&self, col: u32, row: u32) -> Option<&Tile> {
        self.index(col, row).and_then(|i| self.cells[i].as_ref())
    }
}
