//! Deterministic simulation module
//!
//! Player physics over the tile world. This module must stay pure:
//! - Time comes in as arguments, never from a clock
//! - Reads the world through `World::at` only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    Collision, Footprint, classify, is_on_ground, snap, snaps_forward_x, snaps_forward_y,
};
pub use state::{DeathCause, PhysicsState, Player, StepEvent};
pub use tick::{TickInput, die, step};
