//! Tile collision classification
//!
//! A proposed player position is classified by scanning every tile its
//! bounding box overlaps. Solid tiles block; lethal tiles kill, and a kill
//! always outranks a block found in the same scan.

use glam::DVec2;

use crate::consts::SNAP_EPSILON;
use crate::tuning::Tuning;
use crate::world::World;

/// Outcome of a collision query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Collision {
    Free,
    Blocked,
    Death,
}

/// Integer tile range a bounding box overlaps; `right` and `top` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl Footprint {
    pub fn of(center: DVec2, half_extents: DVec2) -> Self {
        let min = center - half_extents;
        let max = center + half_extents;
        Self {
            left: min.x.floor() as i32,
            right: max.x.ceil() as i32,
            bottom: min.y.floor() as i32,
            top: max.y.ceil() as i32,
        }
    }

    /// Every covered cell, column by column
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let Footprint {
            left,
            right,
            bottom,
            top,
        } = self;
        (left..right).flat_map(move |x| (bottom..top).map(move |y| (x, y)))
    }
}

/// Classify the player box centered at `center`
pub fn classify(world: &World, center: DVec2, half_extents: DVec2, tuning: &Tuning) -> Collision {
    let footprint = Footprint::of(center, half_extents);

    if tuning.left_wall.is_some_and(|wall| footprint.left < wall) {
        return Collision::Blocked;
    }

    let bottom_edge = center.y - half_extents.y;
    let mut collision = Collision::Free;

    for (x, y) in footprint.cells() {
        let tile = world.at(x, y);
        if tile.collides() {
            collision = collision.max(Collision::Blocked);
        } else if tile.is_lethal() && bottom_edge < y as f64 + tuning.lava_surface {
            // Lethal tiles are shorter than a full cell
            return Collision::Death;
        }
    }

    collision
}

/// Snap direction for a blocked horizontal move: only rightward motion
/// pulls back, a stalled box is pushed right
#[inline]
pub fn snaps_forward_x(vx: f64) -> bool {
    vx > 0.0
}

/// Snap direction for a blocked vertical move: only falling pushes up, a
/// box at rest vertically is pulled down under the ceiling
#[inline]
pub fn snaps_forward_y(vy: f64) -> bool {
    vy >= 0.0 || vy.is_nan()
}

/// Whether the player is standing on something solid
pub fn is_on_ground(world: &World, center: DVec2, half_extents: DVec2, tuning: &Tuning) -> bool {
    let probe = center - DVec2::new(0.0, SNAP_EPSILON * 2.0);
    classify(world, probe, half_extents, tuning) == Collision::Blocked
}

/// Snap one axis of a blocked move back to the tile boundary it crossed
///
/// With `forward` set the far edge is pulled back to the boundary below it;
/// otherwise the near edge is pushed forward to the boundary above it.
/// `epsilon` keeps the box strictly off the boundary.
#[inline]
pub fn snap(proposed: f64, forward: bool, half: f64, epsilon: f64) -> f64 {
    if forward {
        (proposed + half).floor() - half - epsilon
    } else {
        (proposed - half).ceil() + half + epsilon
    }
}
