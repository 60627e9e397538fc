//! Player-feel tuning
//!
//! Every number that shapes how the player moves lives here so it can be
//! tweaked from data. Partial JSON documents override only the fields they
//! name.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_STEP;

/// Physics and collision tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Forces (tiles/s²) ===
    /// Vertical acceleration, negative is down
    pub gravity: f64,
    /// Horizontal acceleration per held direction
    pub run_accel: f64,
    /// Vertical speed set on jump (tiles/s)
    pub jump_speed: f64,

    // === Damping ===
    /// Base of the exponential velocity decay
    pub damping: f64,
    /// Horizontal decay rate (ground friction)
    pub horizontal_damping_rate: f64,
    /// Vertical decay rate (air resistance, lighter)
    pub vertical_damping_rate: f64,

    // === Timing ===
    /// Seconds after leaving the ground during which a jump is still accepted
    pub coyote_time: f64,
    /// Largest time slice integrated in one step (seconds)
    pub max_step: f64,

    // === Player ===
    /// Full bounding box width (tiles)
    pub player_width: f64,
    /// Full bounding box height (tiles)
    pub player_height: f64,

    // === Map rules ===
    /// Fraction of a lava cell, from its bottom, that kills
    pub lava_surface: f64,
    /// Hard wall column; footprints left of it are blocked. `None` disables it.
    pub left_wall: Option<i32>,
    /// Respawn once the player's top edge falls below this height
    pub world_floor: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -100.0,
            run_accel: 120.0,
            jump_speed: 25.0,

            damping: 0.9,
            horizontal_damping_rate: 120.0,
            vertical_damping_rate: 30.0,

            coyote_time: 0.1,
            max_step: MAX_STEP,

            player_width: 0.75,
            player_height: 1.75,

            lava_surface: 0.75,
            left_wall: Some(0),
            world_floor: -1.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Half of the player's bounding box
    #[inline]
    pub fn half_extents(&self) -> DVec2 {
        DVec2::new(self.player_width, self.player_height) / 2.0
    }

    /// Clamp a frame delta to the integrable slice
    ///
    /// Never panics: a NaN `dt` or a negative `max_step` yields a zero
    /// step, and a NaN `max_step` leaves only the lower bound.
    #[inline]
    pub fn clamp_step(&self, dt: f64) -> f64 {
        if dt.is_nan() {
            return 0.0;
        }
        dt.min(self.max_step).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuning = Tuning::default();
        assert_eq!(tuning.half_extents(), DVec2::new(0.375, 0.875));
        assert_eq!(tuning.left_wall, Some(0));
        assert!((tuning.max_step - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": -50.0, "left_wall": null }"#).unwrap();
        assert_eq!(tuning.gravity, -50.0);
        assert_eq!(tuning.left_wall, None);
        assert_eq!(tuning.jump_speed, 25.0);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            coyote_time: 0.2,
            ..Default::default()
        };
        let restored = Tuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(restored, tuning);
    }

    #[test]
    fn test_clamp_step() {
        let tuning = Tuning::default();
        assert_eq!(tuning.clamp_step(0.01), 0.01);
        assert_eq!(tuning.clamp_step(0.5), tuning.max_step);
        assert_eq!(tuning.clamp_step(-1.0), 0.0);
    }

    #[test]
    fn test_clamp_step_with_bad_max_step() {
        let negative = Tuning::from_json(r#"{ "max_step": -0.5 }"#).unwrap();
        assert_eq!(negative.clamp_step(0.01), 0.0);

        let nan = Tuning {
            max_step: f64::NAN,
            ..Default::default()
        };
        assert_eq!(nan.clamp_step(0.01), 0.01);
        assert_eq!(nan.clamp_step(-0.01), 0.0);
        assert_eq!(Tuning::default().clamp_step(f64::NAN), 0.0);
    }
}
