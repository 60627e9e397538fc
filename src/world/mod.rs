//! The tile world
//!
//! A [`World`] owns one [`Layer`] per [`LayerKind`] plus the player spawn
//! point. Physics reads only the foreground through [`World::at`]; editors
//! write through [`World::set`], and presentation code learns about writes
//! by draining [`World::take_edits`] rather than touching storage.

pub mod invalidate;
pub mod layer;
pub mod storage;
pub mod tile;

pub use invalidate::Debounce;
pub use layer::{Layer, LayerKind};
pub use storage::{Chunk, ChunkCoord, ChunkedTileStorage};
pub use tile::{COLLIDES, LETHAL, Tile};

use glam::DVec2;
use thiserror::Error;

use crate::persistence::{SavedLayers, SavedWorld};

/// Errors raised while building a world from a saved payload
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown tile code {0}")]
    UnknownTile(u8),
    #[error("rectangle {index} has zero-sized dimensions ({width}x{height})")]
    EmptyRect { index: usize, width: u32, height: u32 },
    #[error("rectangle {index} extends past the tile grid")]
    RectOutOfRange { index: usize },
    #[error("malformed world payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A cell that changed, reported to presentation code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileEdit {
    pub layer: LayerKind,
    pub x: i32,
    pub y: i32,
}

impl TileEdit {
    /// Cells within `radius` (Chebyshev distance) of the edit, which is
    /// the area a tile renderer blending neighbours must redraw
    pub fn neighborhood(self, radius: i32) -> impl Iterator<Item = (i32, i32)> {
        let (cx, cy) = (self.x, self.y);
        (-radius..=radius)
            .flat_map(move |dy| (-radius..=radius).map(move |dx| (cx + dx, cy + dy)))
    }
}

/// Authoritative tile map the simulation queries
#[derive(Debug, Clone)]
pub struct World {
    /// Where the player appears at start and after every death
    pub player_start: DVec2,
    layers: [Layer; 3],
    edits: Vec<TileEdit>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(DVec2::ZERO)
    }
}

impl World {
    /// Empty world with the given spawn point
    pub fn new(player_start: DVec2) -> Self {
        Self {
            player_start,
            layers: LayerKind::ALL.map(Layer::new),
            edits: Vec::new(),
        }
    }

    /// Materialize a world from its saved form
    pub fn from_saved(saved: &SavedWorld) -> Result<Self, WorldError> {
        let mut world = Self::new(saved.player.into());

        for kind in LayerKind::ALL {
            let rects = saved.layers.get(kind);
            world.layers[kind.index()].apply(rects)?;
            if !rects.is_empty() {
                let cells: u64 = rects.iter().map(|r| r.area()).sum();
                log::debug!("Layer {}: {} rects, {} cells", kind.as_str(), rects.len(), cells);
            }
        }

        log::info!(
            "World loaded: spawn ({}, {}), {} foreground rects",
            world.player_start.x,
            world.player_start.y,
            saved.layers.foreground.len()
        );

        Ok(world)
    }

    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Self::from_saved(&SavedWorld::from_json(json)?)
    }

    /// Tile on the collision layer
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Tile {
        self.layers[LayerKind::Foreground.index()].get(x, y)
    }

    /// Tile on any layer
    #[inline]
    pub fn at_in(&self, layer: LayerKind, x: i32, y: i32) -> Tile {
        self.layers[layer.index()].get(x, y)
    }

    /// Write a tile on the collision layer
    ///
    /// Returns `false` (and records nothing) if the cell already held `tile`.
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        self.set_in(LayerKind::Foreground, x, y, tile)
    }

    /// Write a tile on any layer; see [`World::set`]
    pub fn set_in(&mut self, layer: LayerKind, x: i32, y: i32, tile: Tile) -> bool {
        let target = &mut self.layers[layer.index()];
        if target.get(x, y) == tile {
            return false;
        }
        target.set(x, y, tile);
        self.edits.push(TileEdit { layer, x, y });
        true
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.index()]
    }

    /// Edits made since the last call, oldest first
    pub fn take_edits(&mut self) -> Vec<TileEdit> {
        std::mem::take(&mut self.edits)
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Spawn point plus every layer in compressed form
    pub fn save(&self) -> SavedWorld {
        let mut layers = SavedLayers::default();
        for layer in &self.layers {
            *layers.get_mut(layer.kind) = layer.save();
        }
        SavedWorld {
            player: self.player_start.into(),
            layers,
        }
    }

    pub fn to_json(&self) -> Result<String, WorldError> {
        self.save().to_json()
    }

    pub fn to_json_pretty(&self) -> Result<String, WorldError> {
        self.save().to_json_pretty()
    }
}
