//! World and entity state
//!
//! The `World` is the authoritative simulation state for one round. It is
//! exclusively owned and mutated by the simulation; the renderer and HUD
//! read it through `&World` accessors or a cloned [`WorldSnapshot`].

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::{ArenaConfig, SimError};

/// Milliseconds from an arbitrary monotonic origin.
///
/// The origin does not matter; only differences do. All timestamps handed
/// to the simulation must come from the same clock.
pub type Millis = f64;

/// Which of the two players an entity or outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
    A,
    B,
}

impl PlayerId {
    /// Index into the world's player array.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::A => 0,
            PlayerId::B => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::A => "player A",
            PlayerId::B => "player B",
        }
    }
}

/// Terminal result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// One player won, by score at the buzzer or by reaching the score cap.
    Win(PlayerId),
    Draw,
}

/// One controllable character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Stars collected this round. Never decreases while the round runs.
    pub score: u32,
    /// End of the active power-up boost window, if any.
    pub boost_until: Option<Millis>,
    /// End of the active dash window, if any.
    pub dash_until: Option<Millis>,
    /// When the last dash was granted, for cooldown gating.
    pub last_dash: Option<Millis>,
    /// Renderer-only flash window after a knockback. No gameplay effect.
    pub hit_flash_until: Millis,
}

impl Player {
    pub fn new(id: PlayerId, spawn: Vec2) -> Self {
        Self {
            id,
            pos: spawn,
            vel: Vec2::ZERO,
            score: 0,
            boost_until: None,
            dash_until: None,
            last_dash: None,
            hit_flash_until: 0.0,
        }
    }

    #[inline]
    pub fn dash_active(&self, now: Millis) -> bool {
        self.dash_until.is_some_and(|until| now < until)
    }

    #[inline]
    pub fn boost_active(&self, now: Millis) -> bool {
        self.boost_until.is_some_and(|until| now < until)
    }

    /// Target speed for this tick: dash outranks boost outranks base.
    pub fn effective_speed(&self, config: &ArenaConfig, now: Millis) -> f32 {
        if self.dash_active(now) {
            config.dash_speed
        } else if self.boost_active(now) {
            config.boost_speed
        } else {
            config.base_speed
        }
    }
}

/// A circular moving hazard. Bounces elastically off the arena walls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A scoring pickup. Collecting it is worth exactly one point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub id: u32,
    pub pos: Vec2,
}

/// Temporary-buff pickup variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
}

/// A temporary-buff pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Authoritative simulation state for one round.
#[derive(Debug, Clone)]
pub struct World {
    /// Validated configuration this round was started with.
    pub config: ArenaConfig,
    pub players: [Player; 2],
    pub stars: Vec<Star>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    /// Timestamp `start_round` was called with.
    pub started_at: Millis,
    /// Timestamp of the most recent `advance` call (or `started_at`).
    pub(crate) now: Millis,
    pub(crate) elapsed_ms: Millis,
    pub(crate) remaining_ms: Millis,
    pub(crate) last_star_spawn: Millis,
    pub(crate) last_power_check: Millis,
    pub(crate) winner: Option<RoundOutcome>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Start a round. Validates the configuration, resets both players to
    /// their spawn points, clears pickups, and regenerates obstacles.
    ///
    /// Restarting is calling this again; the previous world is discarded.
    pub fn start_round(config: ArenaConfig, now: Millis) -> Result<Self, SimError> {
        config.validate()?;

        let rng = config.seeded_rng();
        let mut world = Self {
            players: [
                Player::new(PlayerId::A, config.spawn_a),
                Player::new(PlayerId::B, config.spawn_b),
            ],
            stars: Vec::with_capacity(config.max_stars),
            power_ups: Vec::with_capacity(config.max_power_ups),
            obstacles: Vec::with_capacity(config.obstacle_count),
            started_at: now,
            now,
            elapsed_ms: 0.0,
            remaining_ms: config.round_duration_ms,
            last_star_spawn: now,
            last_power_check: now,
            winner: None,
            rng,
            next_id: 1,
            config,
        };

        world.regenerate_obstacles();
        log::info!(
            "round started: {}x{} arena, {} obstacles, {:.0}s on the clock",
            world.config.world_width,
            world.config.world_height,
            world.obstacles.len(),
            world.config.round_duration_ms / 1000.0
        );
        Ok(world)
    }

    /// Allocate a new entity id.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniformly random point inside the wall-margin-inset rectangle.
    pub(crate) fn random_inset_point(&mut self) -> Vec2 {
        let margin = self.config.wall_margin;
        let x = self
            .rng
            .random_range(margin..=self.config.world_width - margin);
        let y = self
            .rng
            .random_range(margin..=self.config.world_height - margin);
        Vec2::new(x, y)
    }

    /// Discard all obstacles and roll a fresh set from the configured count
    /// and speed range.
    fn regenerate_obstacles(&mut self) {
        self.obstacles.clear();
        for _ in 0..self.config.obstacle_count {
            let pos = self.random_inset_point();
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self
                .rng
                .random_range(self.config.obstacle_speed_min..=self.config.obstacle_speed_max);
            let id = self.next_entity_id();
            self.obstacles.push(Obstacle {
                id,
                pos,
                vel: Vec2::from_angle(angle) * speed,
                radius: self.config.obstacle_radius,
            });
        }
    }

    pub(crate) fn spawn_star(&mut self, now: Millis) {
        let id = self.next_entity_id();
        let pos = self.random_inset_point();
        log::debug!("star {id} spawned at ({:.0}, {:.0})", pos.x, pos.y);
        self.stars.push(Star { id, pos });
        self.last_star_spawn = now;
    }

    pub(crate) fn spawn_power_up(&mut self) {
        let id = self.next_entity_id();
        let pos = self.random_inset_point();
        log::debug!("power-up {id} spawned at ({:.0}, {:.0})", pos.x, pos.y);
        self.power_ups.push(PowerUp {
            id,
            kind: PowerUpKind::SpeedBoost,
            pos,
        });
    }

    /// Time elapsed on the round clock as of the last `advance`.
    #[inline]
    pub fn elapsed_ms(&self) -> Millis {
        self.elapsed_ms
    }

    /// Time left on the round clock as of the last `advance`. Saturates at 0.
    #[inline]
    pub fn remaining_ms(&self) -> Millis {
        self.remaining_ms
    }

    /// Terminal outcome, once the round has ended.
    #[inline]
    pub fn winner(&self) -> Option<RoundOutcome> {
        self.winner
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Serializable read-only copy for the renderer/HUD boundary.
    pub fn snapshot(&self) -> WorldSnapshot {
        let now = self.now;
        let view = |player: &Player| PlayerView {
            id: player.id,
            pos: player.pos,
            vel: player.vel,
            score: player.score,
            boost_active: player.boost_active(now),
            dash_active: player.dash_active(now),
            hit_flash: now < player.hit_flash_until,
        };
        WorldSnapshot {
            players: [view(&self.players[0]), view(&self.players[1])],
            stars: self.stars.clone(),
            power_ups: self.power_ups.clone(),
            obstacles: self.obstacles.clone(),
            elapsed_ms: self.elapsed_ms,
            remaining_ms: self.remaining_ms,
            winner: self.winner,
        }
    }
}

/// Renderer-facing view of one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub score: u32,
    pub boost_active: bool,
    pub dash_active: bool,
    pub hit_flash: bool,
}

/// A consistent copy of everything a renderer or HUD needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub players: [PlayerView; 2],
    pub stars: Vec<Star>,
    pub power_ups: Vec<PowerUp>,
    pub obstacles: Vec<Obstacle>,
    pub elapsed_ms: Millis,
    pub remaining_ms: Millis,
    pub winner: Option<RoundOutcome>,
}
