//! A single tile plane and its rectangle compression
//!
//! Saving walks every non-empty cell and greedily grows a rectangle from
//! each cell not yet covered: first along the row, then upward one full row
//! at a time while every cell in the row matches. The cover is not minimal,
//! but it is deterministic for a given storage and covers each non-empty
//! cell exactly once.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ChunkedTileStorage, Tile, WorldError};
use crate::persistence::CompressedTile;

/// Which plane of the world a layer is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Collision layer; the only one physics reads
    Foreground,
    Midground,
    Background,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [
        LayerKind::Foreground,
        LayerKind::Midground,
        LayerKind::Background,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Foreground => "foreground",
            LayerKind::Midground => "midground",
            LayerKind::Background => "background",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A full tile plane backed by chunked storage
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    tiles: ChunkedTileStorage,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            tiles: ChunkedTileStorage::new(),
        }
    }

    /// Build a layer from saved rectangles
    pub fn restore(kind: LayerKind, rects: &[CompressedTile]) -> Result<Self, WorldError> {
        let mut layer = Self::new(kind);
        layer.apply(rects)?;
        Ok(layer)
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.tiles.get(x, y)
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        self.tiles.set(x, y, tile);
    }

    pub fn storage(&self) -> &ChunkedTileStorage {
        &self.tiles
    }

    /// Non-empty cells; see [`ChunkedTileStorage::entries`]
    pub fn entries(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        self.tiles.entries()
    }

    /// Write every rectangle into the layer
    ///
    /// All rectangles are validated before the first write, so a bad
    /// payload leaves the layer untouched.
    pub fn apply(&mut self, rects: &[CompressedTile]) -> Result<(), WorldError> {
        for (index, rect) in rects.iter().enumerate() {
            rect.validate(index)?;
        }

        for rect in rects {
            for (x, y) in rect.cells() {
                self.tiles.set(x, y, rect.tile);
            }
        }

        Ok(())
    }

    /// Compress the layer into rectangles of identical tiles
    pub fn save(&self) -> Vec<CompressedTile> {
        let mut rects = Vec::new();
        let mut visited: HashSet<(i32, i32)> = HashSet::new();

        let same = |visited: &HashSet<(i32, i32)>, x: i32, y: i32, tile: Tile| {
            self.tiles.get(x, y) == tile && !visited.contains(&(x, y))
        };

        for (x, y, tile) in self.tiles.entries() {
            if visited.contains(&(x, y)) {
                continue;
            }

            let mut width: i32 = 1;
            while x
                .checked_add(width)
                .is_some_and(|nx| same(&visited, nx, y, tile))
            {
                width += 1;
            }

            let mut height: i32 = 1;
            while let Some(ny) = y.checked_add(height) {
                if !(0..width).all(|dx| same(&visited, x + dx, ny, tile)) {
                    break;
                }
                height += 1;
            }

            for dy in 0..height {
                for dx in 0..width {
                    visited.insert((x + dx, y + dy));
                }
            }

            rects.push(CompressedTile {
                tile,
                x,
                y,
                width: width as u32,
                height: height as u32,
            });
        }

        rects
    }
}
