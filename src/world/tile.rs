//! Tile codes and their behaviour tables

use serde::{Deserialize, Serialize};

use super::WorldError;

/// Terrain code stored in one grid cell
///
/// Serialized as its integer code so saved worlds stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Earth = 1,
    Lava = 2,
    Rock = 3,
}

/// Tiles that block movement
pub const COLLIDES: &[Tile] = &[Tile::Earth, Tile::Rock];

/// Tiles that kill on contact
pub const LETHAL: &[Tile] = &[Tile::Lava];

impl Tile {
    /// Every known tile, in code order
    pub const ALL: [Tile; 4] = [Tile::Empty, Tile::Earth, Tile::Lava, Tile::Rock];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    /// Whether this tile blocks the player
    #[inline]
    pub fn collides(self) -> bool {
        COLLIDES.contains(&self)
    }

    /// Whether touching this tile kills the player
    #[inline]
    pub fn is_lethal(self) -> bool {
        LETHAL.contains(&self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tile::Empty => "Empty",
            Tile::Earth => "Earth",
            Tile::Lava => "Lava",
            Tile::Rock => "Rock",
        }
    }
}

impl TryFrom<u8> for Tile {
    type Error = WorldError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Tile::ALL
            .get(code as usize)
            .copied()
            .ok_or(WorldError::UnknownTile(code))
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile.code()
    }
}
