//! Saved-world payload
//!
//! The logical save format: a spawn point plus, per layer, the list of
//! compressed rectangles produced by [`crate::Layer::save`]. Field names
//! match the world files the level editor writes:
//!
//! ```json
//! { "player": { "x": 3.5, "y": 4 },
//!   "layers": { "foreground": [ { "tile": 1, "x": 0, "y": 0, "width": 10, "height": 1 } ] } }
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::world::{LayerKind, Tile, WorldError};

/// Player spawn point in tile units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
}

impl From<SpawnPoint> for DVec2 {
    fn from(p: SpawnPoint) -> DVec2 {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for SpawnPoint {
    fn from(v: DVec2) -> SpawnPoint {
        SpawnPoint { x: v.x, y: v.y }
    }
}

/// One rectangle of identical tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedTile {
    pub tile: Tile,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CompressedTile {
    /// Reject rectangles that cover nothing or run off the grid
    pub fn validate(&self, index: usize) -> Result<(), WorldError> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldError::EmptyRect {
                index,
                width: self.width,
                height: self.height,
            });
        }

        let fits = |start: i32, len: u32| {
            i32::try_from(len)
                .ok()
                .and_then(|len| start.checked_add(len - 1))
                .is_some()
        };
        if !fits(self.x, self.width) || !fits(self.y, self.height) {
            return Err(WorldError::RectOutOfRange { index });
        }

        Ok(())
    }

    /// Cells covered, row by row. Only meaningful after `validate`.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |dy| {
            (0..w).map(move |dx| (x.wrapping_add_unsigned(dx), y.wrapping_add_unsigned(dy)))
        })
    }

    /// Number of cells covered
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Per-layer rectangle lists
///
/// Only the foreground is required; worlds without decoration omit the
/// other two.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedLayers {
    pub foreground: Vec<CompressedTile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub midground: Vec<CompressedTile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub background: Vec<CompressedTile>,
}

impl SavedLayers {
    pub fn get(&self, kind: LayerKind) -> &[CompressedTile] {
        match kind {
            LayerKind::Foreground => &self.foreground,
            LayerKind::Midground => &self.midground,
            LayerKind::Background => &self.background,
        }
    }

    pub fn get_mut(&mut self, kind: LayerKind) -> &mut Vec<CompressedTile> {
        match kind {
            LayerKind::Foreground => &mut self.foreground,
            LayerKind::Midground => &mut self.midground,
            LayerKind::Background => &mut self.background,
        }
    }
}

/// Complete saved world
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedWorld {
    pub player: SpawnPoint,
    pub layers: SavedLayers,
}

impl SavedWorld {
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, WorldError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, WorldError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_foreground_only() {
        let json = r#"{
            "player": { "x": 3.5, "y": 4 },
            "layers": { "foreground": [
                { "tile": 1, "x": 0, "y": 0, "width": 10, "height": 1 },
                { "tile": 2, "x": -4, "y": -2, "width": 2, "height": 3 }
            ] }
        }"#;
        let saved = SavedWorld::from_json(json).unwrap();
        assert_eq!(saved.player, SpawnPoint { x: 3.5, y: 4.0 });
        assert_eq!(saved.layers.foreground.len(), 2);
        assert_eq!(saved.layers.foreground[1].tile, Tile::Lava);
        assert!(saved.layers.midground.is_empty());
        assert!(saved.layers.background.is_empty());
    }

    #[test]
    fn test_empty_layers_omitted() {
        let saved = SavedWorld::default();
        let json = saved.to_json().unwrap();
        assert!(json.contains("\"foreground\":[]"));
        assert!(!json.contains("midground"));
    }

    #[test]
    fn test_rejects_unknown_tile_and_negative_size() {
        let unknown = r#"{"player":{"x":0,"y":0},"layers":{"foreground":[
            {"tile":7,"x":0,"y":0,"width":1,"height":1}]}}"#;
        assert!(matches!(SavedWorld::from_json(unknown), Err(WorldError::Json(_))));

        let negative = r#"{"player":{"x":0,"y":0},"layers":{"foreground":[
            {"tile":1,"x":0,"y":0,"width":-1,"height":1}]}}"#;
        assert!(SavedWorld::from_json(negative).is_err());
    }

    #[test]
    fn test_rejects_lengths_past_i32() {
        let rect = |x: i32, width: u32| CompressedTile {
            tile: Tile::Earth,
            x,
            y: 0,
            width,
            height: 1,
        };

        assert!(matches!(
            rect(-5, 1 << 31).validate(3),
            Err(WorldError::RectOutOfRange { index: 3 })
        ));
        assert!(matches!(
            rect(i32::MIN, u32::MAX).validate(0),
            Err(WorldError::RectOutOfRange { index: 0 })
        ));

        // The widest rectangle that still fits
        let widest = rect(i32::MIN, i32::MAX as u32);
        assert!(widest.validate(0).is_ok());
        let first: Vec<_> = widest.cells().take(2).collect();
        assert_eq!(first, vec![(i32::MIN, 0), (i32::MIN + 1, 0)]);
    }

    #[test]
    fn test_cells_and_area() {
        let rect = CompressedTile {
            tile: Tile::Earth,
            x: -1,
            y: 2,
            width: 2,
            height: 2,
        };
        assert!(rect.validate(0).is_ok());
        assert_eq!(rect.area(), 4);
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(cells, vec![(-1, 2), (0, 2), (-1, 3), (0, 3)]);
    }
}
