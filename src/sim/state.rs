//! Player and physics state
//!
//! Everything the physics step carries between ticks lives here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The player body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the bounding box (tiles, y up)
    pub pos: DVec2,
    /// Tiles per second
    pub vel: DVec2,
    /// Half the bounding box size
    pub half_extents: DVec2,
}

impl Player {
    pub fn new(pos: DVec2, half_extents: DVec2) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            half_extents,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y - self.half_extents.y
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y + self.half_extents.y
    }
}

/// Why the player was sent back to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched a lethal tile
    Lethal,
    /// Fell below the world floor
    FellOut,
    /// Reset requested from outside the simulation
    Reset,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Lethal => "lethal tile",
            DeathCause::FellOut => "fell out of world",
            DeathCause::Reset => "reset",
        }
    }
}

/// What happened during one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    /// Ordinary movement (possibly blocked)
    Moved,
    /// A buffered jump was consumed this step
    Jumped,
    /// The player died and is back at spawn
    Respawned(DeathCause),
}

/// Physics state carried across ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsState {
    pub player: Player,
    /// A jump was requested and not yet consumed or released
    pub jump_pending: bool,
    /// Timestamp of the last step that started on the ground.
    /// `None` until first contact and right after a jump.
    pub last_grounded: Option<f64>,
}

impl PhysicsState {
    /// Player standing still at `spawn`
    pub fn new(spawn: DVec2, tuning: &Tuning) -> Self {
        Self {
            player: Player::new(spawn, tuning.half_extents()),
            jump_pending: false,
            last_grounded: None,
        }
    }

    /// Latch a jump request
    pub fn request_jump(&mut self) {
        self.jump_pending = true;
    }

    /// Drop an unconsumed jump request
    pub fn cancel_jump(&mut self) {
        self.jump_pending = false;
    }

    /// Put the player back at spawn with zero velocity
    pub fn respawn(&mut self, spawn: DVec2) {
        self.player.pos = spawn;
        self.player.vel = DVec2::ZERO;
    }
}
