//! Property tests for sparse storage and layer compression

use std::collections::HashMap;

use proptest::prelude::*;
use tile_platformer::{ChunkedTileStorage, Layer, LayerKind, Tile};

fn any_tile() -> impl Strategy<Value = Tile> {
    prop::sample::select(Tile::ALL.to_vec())
}

fn solid_tile() -> impl Strategy<Value = Tile> {
    prop::sample::select(vec![Tile::Earth, Tile::Lava, Tile::Rock])
}

/// Writes clustered around the origin so rectangles actually form and
/// chunk boundaries (multiples of 32, both signs) get crossed
fn writes() -> impl Strategy<Value = Vec<(i32, i32, Tile)>> {
    prop::collection::vec((-70i32..70, -70i32..70, any_tile()), 0..400)
}

proptest! {
    #[test]
    fn set_then_get(x in any::<i32>(), y in any::<i32>(), tile in solid_tile()) {
        let mut storage = ChunkedTileStorage::new();
        storage.set(x, y, tile);
        prop_assert_eq!(storage.get(x, y), tile);
    }

    #[test]
    fn unwritten_cells_are_empty(cells in writes(), px in -100i32..100, py in -100i32..100) {
        let mut storage = ChunkedTileStorage::new();
        for &(x, y, tile) in &cells {
            storage.set(x, y, tile);
        }
        if !cells.iter().any(|&(x, y, _)| x == px && y == py) {
            prop_assert_eq!(storage.get(px, py), Tile::Empty);
        }
    }

    #[test]
    fn entries_match_last_writes(cells in writes()) {
        let mut storage = ChunkedTileStorage::new();
        let mut expected = HashMap::new();
        for &(x, y, tile) in &cells {
            storage.set(x, y, tile);
            expected.insert((x, y), tile);
        }
        expected.retain(|_, tile| !tile.is_empty());

        let entries: HashMap<_, _> = storage.entries().map(|(x, y, t)| ((x, y), t)).collect();
        prop_assert_eq!(entries.len(), storage.entries().count());
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn compression_covers_each_cell_once(cells in writes()) {
        let mut layer = Layer::new(LayerKind::Foreground);
        for &(x, y, tile) in &cells {
            layer.set(x, y, tile);
        }

        let rects = layer.save();
        let mut covered: HashMap<(i32, i32), Tile> = HashMap::new();
        for rect in &rects {
            prop_assert!(rect.width >= 1 && rect.height >= 1);
            prop_assert!(!rect.tile.is_empty());
            for cell in rect.cells() {
                prop_assert!(covered.insert(cell, rect.tile).is_none(), "cell {:?} covered twice", cell);
            }
        }

        let occupied: HashMap<_, _> = layer.entries().map(|(x, y, t)| ((x, y), t)).collect();
        prop_assert_eq!(covered, occupied);
    }

    #[test]
    fn save_restore_round_trip(cells in writes()) {
        let mut layer = Layer::new(LayerKind::Foreground);
        for &(x, y, tile) in &cells {
            layer.set(x, y, tile);
        }

        let restored = Layer::restore(LayerKind::Foreground, &layer.save()).unwrap();
        for &(x, y, _) in &cells {
            prop_assert_eq!(restored.get(x, y), layer.get(x, y));
        }
        let before: Vec<_> = layer.entries().collect();
        let after: Vec<_> = restored.entries().collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn save_is_deterministic(cells in writes()) {
        let mut layer = Layer::new(LayerKind::Foreground);
        for &(x, y, tile) in &cells {
            layer.set(x, y, tile);
        }
        prop_assert_eq!(layer.save(), layer.clone().save());
    }
}
