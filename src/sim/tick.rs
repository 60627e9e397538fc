//! Physics step
//!
//! Advances the player by one clamped time slice: ground bookkeeping,
//! coyote-time jump, integration with damping, then per-axis collision
//! resolution (X first, then Y against the resolved X).

use glam::DVec2;

use super::collision::{
    Collision, classify, is_on_ground, snap, snaps_forward_x, snaps_forward_y,
};
use super::state::{DeathCause, PhysicsState, StepEvent};
use crate::consts::SNAP_EPSILON;
use crate::tuning::Tuning;
use crate::world::World;

/// Input for a single step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left held
    pub left: bool,
    /// Right held
    pub right: bool,
    /// Jump went down since the last step
    pub jump_pressed: bool,
    /// Jump went up since the last step
    pub jump_released: bool,
}

impl TickInput {
    /// Horizontal acceleration from held directions; both held cancel out
    pub fn run_accel(&self, accel: f64) -> f64 {
        let mut ax = 0.0;
        if self.left {
            ax -= accel;
        }
        if self.right {
            ax += accel;
        }
        ax
    }
}

/// Advance the physics state by `dt` seconds at time `now`
pub fn step(
    state: &mut PhysicsState,
    world: &World,
    input: &TickInput,
    tuning: &Tuning,
    now: f64,
    dt: f64,
) -> StepEvent {
    let dt = tuning.clamp_step(dt);
    let half = state.player.half_extents;

    if input.jump_released {
        state.cancel_jump();
    }
    if input.jump_pressed {
        state.request_jump();
    }

    if is_on_ground(world, state.player.pos, half, tuning) {
        state.last_grounded = Some(now);
    }

    let mut event = StepEvent::Moved;

    let can_jump = state
        .last_grounded
        .is_some_and(|t| now - t < tuning.coyote_time);
    if can_jump && state.jump_pending {
        state.player.vel.y = tuning.jump_speed;
        state.jump_pending = false;
        state.last_grounded = None;
        event = StepEvent::Jumped;
    }

    // Integrate
    let accel = DVec2::new(input.run_accel(tuning.run_accel), tuning.gravity);
    let player = &mut state.player;
    let proposed = player.pos + player.vel * dt + accel * dt * dt / 2.0;
    player.vel += accel * dt;
    player.vel.x *= tuning.damping.powf(dt * tuning.horizontal_damping_rate);
    player.vel.y *= tuning.damping.powf(dt * tuning.vertical_damping_rate);

    // X axis
    match classify(world, DVec2::new(proposed.x, player.pos.y), half, tuning) {
        Collision::Death => return die(state, world, DeathCause::Lethal),
        Collision::Free => player.pos.x = proposed.x,
        Collision::Blocked => {
            player.pos.x = snap(proposed.x, snaps_forward_x(player.vel.x), half.x, SNAP_EPSILON);
            player.vel.x = 0.0;
        }
    }

    // Y axis, against the resolved X
    match classify(world, DVec2::new(player.pos.x, proposed.y), half, tuning) {
        Collision::Death => return die(state, world, DeathCause::Lethal),
        Collision::Free => player.pos.y = proposed.y,
        Collision::Blocked => {
            player.pos.y = snap(proposed.y, snaps_forward_y(player.vel.y), half.y, SNAP_EPSILON);
            player.vel.y = 0.0;
        }
    }

    if player.top() < tuning.world_floor {
        return die(state, world, DeathCause::FellOut);
    }

    log::trace!(
        "t={:.3} pos=({:.4}, {:.4}) vel=({:.3}, {:.3})",
        now,
        player.pos.x,
        player.pos.y,
        player.vel.x,
        player.vel.y
    );

    event
}

/// Send the player back to spawn
pub fn die(state: &mut PhysicsState, world: &World, cause: DeathCause) -> StepEvent {
    log::info!(
        "Player died ({}) at ({:.2}, {:.2}), respawning",
        cause.as_str(),
        state.player.pos.x,
        state.player.pos.y
    );
    state.respawn(world.player_start);
    StepEvent::Respawned(cause)
}
