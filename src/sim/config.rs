//! Round configuration and validation
//!
//! Every tunable the simulation consumes lives here as a plain named value.
//! Validation happens once, at round start; after that the core trusts the
//! configuration completely and `advance` never fails.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when starting a round.
#[derive(Debug, Error)]
pub enum SimError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Static configuration for one arena round.
///
/// Distances are in world units (pixels), speeds in world units per tick,
/// durations in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Arena width in world units.
    pub world_width: f32,
    /// Arena height in world units.
    pub world_height: f32,
    /// Player body radius.
    pub player_radius: f32,
    /// Star pickup radius.
    pub star_radius: f32,
    /// Obstacle body radius.
    pub obstacle_radius: f32,
    /// Power-up pickup radius.
    pub power_radius: f32,
    /// Target speed with no dash or boost active.
    pub base_speed: f32,
    /// Target speed while a collected power-up boost is active.
    pub boost_speed: f32,
    /// Target speed during a dash window. Must exceed `boost_speed`.
    pub dash_speed: f32,
    /// Per-tick blend factor pulling velocity toward the control vector.
    pub accel_factor: f32,
    /// Per-tick velocity retention, strictly inside (0, 1).
    pub friction: f32,
    /// Length of one dash window.
    pub dash_duration_ms: f64,
    /// Minimum time between dash activations.
    pub dash_cooldown_ms: f64,
    /// Length of a speed boost granted by a power-up.
    pub boost_duration_ms: f64,
    /// Concurrent star cap.
    pub max_stars: usize,
    /// Minimum time between star spawns.
    pub star_respawn_ms: f64,
    /// Interval between power-up spawn rolls.
    pub power_check_ms: f64,
    /// Probability that a spawn roll produces a power-up, in [0, 1].
    pub power_probability: f64,
    /// Concurrent power-up cap.
    pub max_power_ups: usize,
    /// Number of obstacles regenerated at round start.
    pub obstacle_count: usize,
    /// Lower bound of the random obstacle speed range.
    pub obstacle_speed_min: f32,
    /// Upper bound of the random obstacle speed range.
    pub obstacle_speed_max: f32,
    /// Round length on the countdown clock.
    pub round_duration_ms: f64,
    /// Score that ends the round immediately; `None` plays to the timer only.
    pub win_score: Option<u32>,
    /// Player A spawn point.
    pub spawn_a: Vec2,
    /// Player B spawn point.
    pub spawn_b: Vec2,
    /// Inset from the walls for randomly spawned entities.
    pub wall_margin: f32,
    /// Shrink factor applied to pickup radii when testing collection, in (0, 1].
    pub pickup_radius_scale: f32,
    /// Velocity impulse applied along the contact normal on a collision.
    pub knockback_impulse: f32,
    /// Scale applied to per-tick position integration. 1.0 reproduces the
    /// classic frame-locked feel; a fixed-timestep driver can substitute
    /// its own value without touching collision or scoring logic.
    pub step_scale: f32,
    /// Optional RNG seed for reproducible rounds.
    pub rng_seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            player_radius: 18.0,
            star_radius: 12.0,
            obstacle_radius: 16.0,
            power_radius: 14.0,
            base_speed: 4.0,
            boost_speed: 6.5,
            dash_speed: 10.0,
            accel_factor: 0.2,
            friction: 0.85,
            dash_duration_ms: 180.0,
            dash_cooldown_ms: 900.0,
            boost_duration_ms: 4_000.0,
            max_stars: 5,
            star_respawn_ms: 1_200.0,
            power_check_ms: 3_000.0,
            power_probability: 0.5,
            max_power_ups: 2,
            obstacle_count: 4,
            obstacle_speed_min: 1.0,
            obstacle_speed_max: 2.5,
            round_duration_ms: 60_000.0,
            win_score: Some(10),
            spawn_a: Vec2::new(200.0, 300.0),
            spawn_b: Vec2::new(600.0, 300.0),
            wall_margin: 40.0,
            pickup_radius_scale: 0.7,
            knockback_impulse: 6.0,
            step_scale: 1.0,
            rng_seed: None,
        }
    }
}

impl ArenaConfig {
    /// Validates the configuration. Called by `World::start_round`; callers
    /// constructing configs by hand can also invoke it directly.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(SimError::InvalidConfig(
                "world dimensions must be positive",
            ));
        }
        if self.player_radius <= 0.0
            || self.star_radius <= 0.0
            || self.obstacle_radius <= 0.0
            || self.power_radius <= 0.0
        {
            return Err(SimError::InvalidConfig("entity radii must be positive"));
        }
        if self.world_width <= 2.0 * self.player_radius
            || self.world_height <= 2.0 * self.player_radius
        {
            return Err(SimError::InvalidConfig(
                "arena too small to contain a player",
            ));
        }
        if self.base_speed <= 0.0 {
            return Err(SimError::InvalidConfig("base_speed must be positive"));
        }
        if self.boost_speed <= self.base_speed {
            return Err(SimError::InvalidConfig(
                "boost_speed must exceed base_speed",
            ));
        }
        if self.dash_speed <= self.boost_speed {
            return Err(SimError::InvalidConfig(
                "dash_speed must exceed boost_speed",
            ));
        }
        if self.accel_factor <= 0.0 {
            return Err(SimError::InvalidConfig("accel_factor must be positive"));
        }
        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(SimError::InvalidConfig(
                "friction must lie strictly inside (0, 1)",
            ));
        }
        if self.dash_duration_ms <= 0.0
            || self.dash_cooldown_ms <= 0.0
            || self.boost_duration_ms <= 0.0
        {
            return Err(SimError::InvalidConfig(
                "dash and boost durations must be positive",
            ));
        }
        if self.star_respawn_ms <= 0.0 || self.power_check_ms <= 0.0 {
            return Err(SimError::InvalidConfig(
                "spawn intervals must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.power_probability) {
            return Err(SimError::InvalidConfig(
                "power_probability must lie in [0, 1]",
            ));
        }
        if self.obstacle_speed_min <= 0.0 || self.obstacle_speed_max < self.obstacle_speed_min {
            return Err(SimError::InvalidConfig(
                "obstacle speed range must be positive and ordered",
            ));
        }
        if self.round_duration_ms <= 0.0 {
            return Err(SimError::InvalidConfig(
                "round_duration_ms must be positive",
            ));
        }
        if self.pickup_radius_scale <= 0.0 || self.pickup_radius_scale > 1.0 {
            return Err(SimError::InvalidConfig(
                "pickup_radius_scale must lie in (0, 1]",
            ));
        }
        if self.knockback_impulse < 0.0 {
            return Err(SimError::InvalidConfig(
                "knockback_impulse must be non-negative",
            ));
        }
        if self.step_scale <= 0.0 {
            return Err(SimError::InvalidConfig("step_scale must be positive"));
        }
        if self.wall_margin < 0.0
            || 2.0 * self.wall_margin >= self.world_width.min(self.world_height)
        {
            return Err(SimError::InvalidConfig(
                "wall_margin must be non-negative and leave a playable interior",
            ));
        }
        for spawn in [self.spawn_a, self.spawn_b] {
            if spawn.x < self.player_radius
                || spawn.x > self.world_width - self.player_radius
                || spawn.y < self.player_radius
                || spawn.y > self.world_height - self.player_radius
            {
                return Err(SimError::InvalidConfig(
                    "spawn points must lie inside the playable interior",
                ));
            }
        }
        Ok(())
    }

    /// Returns the configured RNG, seeded from entropy if no seed is set.
    pub(crate) fn seeded_rng(&self) -> Pcg32 {
        match self.rng_seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::seed_from_u64(rand::random()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ArenaConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_nonpositive_round_duration() {
        let config = ArenaConfig {
            round_duration_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig("round_duration_ms must be positive"))
        ));
    }

    #[test]
    fn rejects_unordered_speed_tiers() {
        let config = ArenaConfig {
            dash_speed: 5.0,
            boost_speed: 6.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_friction_outside_unit_interval() {
        for friction in [0.0, 1.0, 1.3, -0.2] {
            let config = ArenaConfig {
                friction,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "friction {friction} accepted");
        }
    }

    #[test]
    fn rejects_out_of_bounds_spawn() {
        let config = ArenaConfig {
            spawn_b: Vec2::new(795.0, 300.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let config = ArenaConfig {
            power_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
