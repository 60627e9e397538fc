//! Frame driver
//!
//! `Game` ties the world, the physics state and the tuning together behind
//! a single `update(timestamp, input)` entry point. The host owns the frame
//! loop and passes wall-clock timestamps in; the only timing state kept here
//! is the previous timestamp.

use glam::DVec2;

use crate::sim::{self, DeathCause, PhysicsState, Player, StepEvent, TickInput};
use crate::tuning::Tuning;
use crate::world::{Tile, World, WorldError};

/// A play session over one world
#[derive(Debug, Clone)]
pub struct Game {
    pub world: World,
    pub physics: PhysicsState,
    pub tuning: Tuning,
    /// Timestamp of the previous `update` (seconds)
    last_time: Option<f64>,
}

impl Game {
    pub fn new(world: World, tuning: Tuning) -> Self {
        let physics = PhysicsState::new(world.player_start, &tuning);
        Self {
            world,
            physics,
            tuning,
            last_time: None,
        }
    }

    /// Start a session from a saved world
    pub fn from_json(json: &str, tuning: Tuning) -> Result<Self, WorldError> {
        Ok(Self::new(World::from_json(json)?, tuning))
    }

    /// Advance to `timestamp` (seconds)
    ///
    /// The first call only records the timestamp. Later calls step the
    /// physics by the elapsed time, clamped to `Tuning::max_step`.
    pub fn update(&mut self, timestamp: f64, input: &TickInput) -> Option<StepEvent> {
        let last = self.last_time.replace(timestamp)?;

        let elapsed = timestamp - last;
        if elapsed > self.tuning.max_step {
            log::debug!(
                "Frame hitch: {:.1} ms clamped to {:.1} ms",
                elapsed * 1000.0,
                self.tuning.max_step * 1000.0
            );
        }

        Some(sim::step(
            &mut self.physics,
            &self.world,
            input,
            &self.tuning,
            timestamp,
            elapsed,
        ))
    }

    /// Latch a jump request until it is consumed or cancelled
    pub fn jump(&mut self) {
        self.physics.request_jump();
    }

    pub fn cancel_jump(&mut self) {
        self.physics.cancel_jump();
    }

    /// Edit one cell of the collision layer
    ///
    /// Returns `false` if the cell already held `tile`.
    pub fn place(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        if !self.world.set(x, y, tile) {
            return false;
        }

        log::debug!("Placed {} at ({}, {})", tile.as_str(), x, y);
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = self.world.to_json() {
                log::trace!("World: {json}");
            }
        }
        true
    }

    /// Send the player back to spawn
    pub fn reset(&mut self) {
        sim::die(&mut self.physics, &self.world, DeathCause::Reset);
    }

    pub fn player(&self) -> &Player {
        &self.physics.player
    }

    pub fn player_pos(&self) -> DVec2 {
        self.physics.player.pos
    }

    pub fn is_on_ground(&self) -> bool {
        sim::is_on_ground(
            &self.world,
            self.physics.player.pos,
            self.physics.player.half_extents,
            &self.tuning,
        )
    }
}
