//! Tile-layer geometry builder.
//!
//! # Model
//! - A level is three boolean fill grids (one per channel) plus a list of
//!   point-placed collectibles, all consumed once at load.
//! - Grids are row-major with `(col, row)` addressing; cell `(0, 0)` is the
//!   bottom-left corner and cells are square, `cell_size` meters per side.
//! - Every filled cell becomes exactly one fixed body centered on the cell,
//!   carrying the layer's channel category; empty cells produce nothing.
//! - Every collectible becomes one fixed ball sensor.
//!
//! All inputs are validated before the first body is created: a malformed
//! level fails the whole load with [`LevelError`] instead of leaving partial
//! geometry behind.

use std::collections::HashMap;

use log::info;
use rapier2d::prelude::RigidBodyHandle;
use thiserror::Error;

use crate::collision::filter::Channel;
use crate::collision::types::{ItemId, Vec2};
use crate::constants::ITEM_RADIUS_M;
use crate::world::PhysicsWorld;

/// Load-time validation failure. No geometry is created when this is raised.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("layer cell data has {len} entries, expected {width}x{height} = {expected}")]
    LayerShape {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },
    #[error("cell size must be positive and finite, got {0}")]
    BadCellSize(f32),
    #[error("item radius must be positive and finite, got {0}")]
    BadItemRadius(f32),
    #[error("item {index} has a non-finite position ({x}, {y})")]
    BadItemPosition { index: usize, x: f32, y: f32 },
}

/// A rectangular boolean fill grid for one channel.
#[derive(Clone, Debug)]
pub struct TileLayer {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl TileLayer {
    /// Build a layer from row-major cell data, validating its shape.
    pub fn new(width: u32, height: u32, cells: Vec<bool>) -> Result<Self, LevelError> {
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(LevelError::LayerShape {
                width,
                height,
                len: cells.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A layer of the given dimensions with no filled cells.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Is the cell at `(col, row)` filled? Out-of-range coordinates are empty.
    pub fn is_filled(&self, col: u32, row: u32) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        self.cells[(row as usize) * (self.width as usize) + (col as usize)]
    }

    /// Coordinates of every filled cell, in row-major order.
    ///
    /// The builder's output does not depend on this order (each cell becomes
    /// an independent fixed body), but a stable order keeps handle assignment
    /// deterministic across loads.
    pub fn filled_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).filter_map(move |col| self.is_filled(col, row).then_some((col, row)))
        })
    }
}

/// One point-placed collectible.
#[derive(Clone, Copy, Debug)]
pub struct ItemDef {
    /// World-space center (meters).
    pub position: Vec2,
}

/// Everything the geometry builder consumes at level load.
#[derive(Clone, Debug)]
pub struct LevelDef {
    /// Side length of one grid cell in meters.
    pub cell_size: f32,
    pub red: TileLayer,
    pub green: TileLayer,
    pub blue: TileLayer,
    pub items: Vec<ItemDef>,
    /// Collectible sensor radius (meters).
    pub item_radius: f32,
}

impl LevelDef {
    /// A level with the given layers, default item radius, and no items.
    pub fn new(cell_size: f32, red: TileLayer, green: TileLayer, blue: TileLayer) -> Self {
        Self {
            cell_size,
            red,
            green,
            blue,
            items: Vec::new(),
            item_radius: ITEM_RADIUS_M,
        }
    }
}

/// Static bodies produced by a level load.
#[derive(Debug, Default)]
pub struct LevelBodies {
    /// One handle per filled cell across all three layers.
    pub platforms: Vec<RigidBodyHandle>,
    /// Collectible ids (assigned by list index) to their bodies.
    pub items: HashMap<ItemId, RigidBodyHandle>,
}

/// Validate `def` and populate `world` with its static geometry.
///
/// Runs once per level. The same definition always produces the same body
/// count: one platform per filled cell, one sensor per item.
pub fn build_level(world: &mut PhysicsWorld, def: &LevelDef) -> Result<LevelBodies, LevelError> {
    if !(def.cell_size.is_finite() && def.cell_size > 0.0) {
        return Err(LevelError::BadCellSize(def.cell_size));
    }
    if !(def.item_radius.is_finite() && def.item_radius > 0.0) {
        return Err(LevelError::BadItemRadius(def.item_radius));
    }
    for (index, item) in def.items.iter().enumerate() {
        if !(item.position.x.is_finite() && item.position.y.is_finite()) {
            return Err(LevelError::BadItemPosition {
                index,
                x: item.position.x,
                y: item.position.y,
            });
        }
    }

    let mut bodies = LevelBodies::default();
    for (layer, channel) in [
        (&def.red, Channel::Red),
        (&def.green, Channel::Green),
        (&def.blue, Channel::Blue),
    ] {
        build_layer(world, layer, channel, def.cell_size, &mut bodies.platforms);
    }

    for (index, item) in def.items.iter().enumerate() {
        let id = ItemId(index as u32);
        let handle = world.add_item(item.position, def.item_radius, id);
        bodies.items.insert(id, handle);
    }

    info!(
        "level loaded: {} platform bodies, {} items",
        bodies.platforms.len(),
        bodies.items.len()
    );
    Ok(bodies)
}

/// One fixed body per filled cell, centered on the cell.
fn build_layer(
    world: &mut PhysicsWorld,
    layer: &TileLayer,
    channel: Channel,
    cell_size: f32,
    out: &mut Vec<RigidBodyHandle>,
) {
    for (col, row) in layer.filled_cells() {
        let center = Vec2::new(
            (col as f32 + 0.5) * cell_size,
            (row as f32 + 0.5) * cell_size,
        );
        out.push(world.add_platform(center, cell_size / 2.0, channel));
    }
}
