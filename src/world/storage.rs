//! Sparse chunked tile storage
//!
//! The grid is unbounded in both directions. Chunks are allocated on the
//! first write that lands inside them and are never freed; a missing chunk
//! reads as all `Empty`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::Tile;
use crate::consts::{CHUNK_AREA, CHUNK_SIZE};

/// Chunk coordinate (tile coordinate floor-divided by `CHUNK_SIZE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    /// Chunk containing tile `(x, y)`. Uses floor division so that
    /// `-1` lands in chunk `-1`, not chunk `0`.
    #[inline]
    pub fn containing(x: i32, y: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            y: y.div_euclid(CHUNK_SIZE),
        }
    }

    /// World coordinate of the chunk's lower-left tile
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.y * CHUNK_SIZE)
    }
}

// Row-major across the world: lower chunk rows first, then left to right.
impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dense `CHUNK_SIZE x CHUNK_SIZE` block of tiles
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    tiles: Box<[Tile; CHUNK_AREA]>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self {
            tiles: Box::new([Tile::Empty; CHUNK_AREA]),
        }
    }
}

impl Chunk {
    #[inline]
    fn index(x: i32, y: i32) -> usize {
        let lx = x.rem_euclid(CHUNK_SIZE);
        let ly = y.rem_euclid(CHUNK_SIZE);
        (ly * CHUNK_SIZE + lx) as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.tiles[Self::index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        self.tiles[Self::index(x, y)] = tile;
    }

    /// Non-empty cells as `(local_x, local_y, tile)`, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, &tile)| {
            if tile.is_empty() {
                None
            } else {
                let i = i as i32;
                Some((i % CHUNK_SIZE, i / CHUNK_SIZE, tile))
            }
        })
    }
}

/// Sparse 2D tile grid keyed by chunk coordinate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkedTileStorage {
    chunks: BTreeMap<ChunkCoord, Chunk>,
}

impl ChunkedTileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile at `(x, y)`; `Empty` anywhere nothing was written
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.chunks
            .get(&ChunkCoord::containing(x, y))
            .map_or(Tile::Empty, |chunk| chunk.get(x, y))
    }

    /// Write a tile, allocating the owning chunk if needed
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        self.chunks
            .entry(ChunkCoord::containing(x, y))
            .or_default()
            .set(x, y, tile);
    }

    /// Number of allocated chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Every non-empty cell as `(x, y, tile)`
    ///
    /// Chunks are visited in `ChunkCoord` order, cells row-major inside
    /// each chunk. Calling again restarts the walk.
    pub fn entries(&self) -> impl Iterator<Item = (i32, i32, Tile)> + '_ {
        self.chunks.iter().flat_map(|(coord, chunk)| {
            let (ox, oy) = coord.origin();
            chunk
                .occupied()
                .map(move |(lx, ly, tile)| (ox + lx, oy + ly, tile))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_empty() {
        let storage = ChunkedTileStorage::new();
        assert_eq!(storage.get(0, 0), Tile::Empty);
        assert_eq!(storage.get(-1000, 77), Tile::Empty);
        assert_eq!(storage.chunk_count(), 0);
    }

    #[test]
    fn test_negative_coordinates_use_floor_division() {
        assert_eq!(ChunkCoord::containing(-1, -1), ChunkCoord { x: -1, y: -1 });
        assert_eq!(ChunkCoord::containing(-32, 31), ChunkCoord { x: -1, y: 0 });
        assert_eq!(ChunkCoord::containing(-33, 32), ChunkCoord { x: -2, y: 1 });

        let mut storage = ChunkedTileStorage::new();
        storage.set(-1, -1, Tile::Earth);
        storage.set(31, 31, Tile::Lava);
        assert_eq!(storage.get(-1, -1), Tile::Earth);
        assert_eq!(storage.get(31, 31), Tile::Lava);
        // Same local index, different chunk
        assert_eq!(storage.get(31, -1), Tile::Empty);
        assert_eq!(storage.chunk_count(), 2);
    }

    #[test]
    fn test_clear_keeps_chunk_allocated() {
        let mut storage = ChunkedTileStorage::new();
        storage.set(5, 5, Tile::Rock);
        storage.set(5, 5, Tile::Empty);
        assert_eq!(storage.get(5, 5), Tile::Empty);
        assert_eq!(storage.chunk_count(), 1);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_entries_order_and_restart() {
        let mut storage = ChunkedTileStorage::new();
        storage.set(40, 0, Tile::Earth);
        storage.set(1, 1, Tile::Lava);
        storage.set(0, 1, Tile::Earth);
        storage.set(-3, -40, Tile::Rock);

        let first: Vec<_> = storage.entries().collect();
        assert_eq!(
            first,
            vec![
                (-3, -40, Tile::Rock),
                (0, 1, Tile::Earth),
                (1, 1, Tile::Lava),
                (40, 0, Tile::Earth),
            ]
        );
        let second: Vec<_> = storage.entries().collect();
        assert_eq!(first, second);
    }
}
