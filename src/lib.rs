//! Tile Platformer - simulation core for a tile-based 2D platformer
//!
//! Core modules:
//! - `world`: Sparse chunked tile grid, layers and rectangle compression
//! - `sim`: Deterministic player physics (collision, coyote time, respawn)
//! - `game`: Frame driver tying world, physics and input together
//! - `persistence`: Saved-world payload (JSON)
//! - `tuning`: Data-driven player feel

pub mod game;
pub mod persistence;
pub mod sim;
pub mod tuning;
pub mod world;

pub use game::Game;
pub use persistence::{CompressedTile, SavedLayers, SavedWorld, SpawnPoint};
pub use tuning::Tuning;
pub use world::{ChunkedTileStorage, Layer, LayerKind, Tile, TileEdit, World, WorldError};

/// Engine constants that are not part of the tuning surface
pub mod consts {
    /// Chunk edge length in tiles
    pub const CHUNK_SIZE: i32 = 32;
    /// Tiles per chunk
    pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

    /// Offset applied when snapping to a tile boundary so the next step
    /// does not re-detect the same contact
    pub const SNAP_EPSILON: f64 = f64::EPSILON * (1u64 << 20) as f64;

    /// Largest time slice a single physics step will integrate (seconds)
    pub const MAX_STEP: f64 = 1.0 / 30.0;
}
