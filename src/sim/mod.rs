//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One `advance` call per rendered frame, driven by the caller
//! - Seeded RNG only (all spawn randomness flows through the world's RNG)
//! - Stable iteration order (player A before player B, entities by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod state;
pub mod tick;

pub use collision::{Contact, circle_contact, reflect_in_rect};
pub use config::{ArenaConfig, SimError};
pub use state::{
    Millis, Obstacle, Player, PlayerId, PlayerView, PowerUp, PowerUpKind, RoundOutcome, Star,
    World, WorldSnapshot,
};
pub use tick::{ControlInput, Controls, advance};
