//! Star Rush - a two-player arena star-chase mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, pickups, round clock)
//! - `scoreboard`: Session win tally across rounds
//!
//! Rendering, input devices, and UI chrome are external collaborators: a
//! renderer reads world snapshots after each tick, an input layer owns the
//! per-player control state the simulation reads.

pub mod scoreboard;
pub mod sim;

pub use scoreboard::Scoreboard;
pub use sim::{ArenaConfig, ControlInput, Controls, SimError, World};

use glam::Vec2;

/// Internal simulation constants (not part of the tunable configuration)
pub mod consts {
    /// Demo/test timestep in milliseconds (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Extra clearance on top of penetration depth when separating bodies
    pub const SEPARATION_EPSILON: f32 = 0.01;
    /// How long the renderer-facing hit flash stays set after a knockback
    pub const HIT_FLASH_MS: f64 = 200.0;
}

/// Clamp each component of a control vector to [-1, 1]
#[inline]
pub fn clamp_axis(v: Vec2) -> Vec2 {
    Vec2::new(v.x.clamp(-1.0, 1.0), v.y.clamp(-1.0, 1.0))
}

/// Clamp a point into the axis-aligned rectangle spanned by `min` and `max`
#[inline]
pub fn clamp_to_rect(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(p.x.clamp(min.x, max.x), p.y.clamp(min.y, max.y))
}
