//! One simulation tick
//!
//! [`advance`] is the single entry point the game loop calls, once per
//! rendered frame. The step order inside a tick is fixed: collisions must
//! see post-movement positions and scoring must see post-collision
//! positions, or the game feels wrong.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_contact, reflect_in_rect, within_reach};
use super::state::{Millis, Player, PlayerId, PowerUpKind, RoundOutcome, World};
use crate::consts::{HIT_FLASH_MS, SEPARATION_EPSILON};
use crate::{clamp_axis, clamp_to_rect};

/// Per-player control state, owned by the input layer.
///
/// The simulation reads this once per tick and treats it as immutable,
/// with one exception: `dash_active` is set when a dash is granted and
/// cleared when the dash window elapses. `dash_requested` is an edge
/// trigger; the input layer clears it after the tick that consumed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    /// Steering direction. Each component is clamped to [-1, 1] on read.
    pub axis: Vec2,
    /// Set by the input layer when the dash button goes down.
    pub dash_requested: bool,
    /// Mirror of the player's dash window, kept for the input layer's
    /// cooldown indicator. The one field the simulation writes.
    pub dash_active: bool,
}

/// Both players' control state for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    pub a: ControlInput,
    pub b: ControlInput,
}

impl Controls {
    fn get_mut(&mut self, id: PlayerId) -> &mut ControlInput {
        match id {
            PlayerId::A => &mut self.a,
            PlayerId::B => &mut self.b,
        }
    }
}

/// Advance the world by one tick.
///
/// `now` is an absolute timestamp on the same clock `start_round` was
/// called with; clock readings are derived from it rather than accumulated,
/// so variable frame deltas cannot drift the round timer. Velocity
/// increments are applied per call (frame-locked arcade feel), scaled only
/// by the configured `step_scale`.
///
/// Once a round has ended the world is frozen: only the clock readings are
/// refreshed and the winner is never rewritten.
pub fn advance(world: &mut World, controls: &mut Controls, now: Millis) {
    world.now = now;
    world.elapsed_ms = (now - world.started_at).max(0.0);
    world.remaining_ms = (world.config.round_duration_ms - world.elapsed_ms).max(0.0);

    if world.is_over() {
        return;
    }
    if world.remaining_ms <= 0.0 {
        let outcome = outcome_by_score(&world.players);
        finish_round(world, outcome, "time up");
        return;
    }

    maintain_spawns(world, now);
    move_obstacles(world);
    integrate_players(world, controls, now);
    resolve_obstacle_hits(world, now);
    resolve_player_overlap(world);
    collect_pickups(world, now);
    check_score_cap(world);
}

/// Compare scores: greater wins, equal is a draw.
fn outcome_by_score(players: &[Player; 2]) -> RoundOutcome {
    use std::cmp::Ordering;
    match players[0].score.cmp(&players[1].score) {
        Ordering::Greater => RoundOutcome::Win(PlayerId::A),
        Ordering::Less => RoundOutcome::Win(PlayerId::B),
        Ordering::Equal => RoundOutcome::Draw,
    }
}

fn finish_round(world: &mut World, outcome: RoundOutcome, reason: &str) {
    let (a, b) = (world.players[0].score, world.players[1].score);
    world.winner = Some(outcome);
    match outcome {
        RoundOutcome::Win(id) => {
            log::info!("round over ({reason}): {} wins {a}-{b}", id.label());
        }
        RoundOutcome::Draw => log::info!("round over ({reason}): draw {a}-{b}"),
    }
}

/// Replenish stars on their respawn clock and roll the power-up coin on its
/// own, longer interval.
fn maintain_spawns(world: &mut World, now: Millis) {
    if world.stars.len() < world.config.max_stars
        && now - world.last_star_spawn >= world.config.star_respawn_ms
    {
        world.spawn_star(now);
    }

    if now - world.last_power_check >= world.config.power_check_ms {
        world.last_power_check = now;
        if world.power_ups.len() < world.config.max_power_ups {
            let probability = world.config.power_probability;
            if world.rng.random_bool(probability) {
                world.spawn_power_up();
            }
        }
    }
}

fn move_obstacles(world: &mut World) {
    let width = world.config.world_width;
    let height = world.config.world_height;
    let step = world.config.step_scale;
    for obstacle in &mut world.obstacles {
        obstacle.pos += obstacle.vel * step;
        reflect_in_rect(&mut obstacle.pos, &mut obstacle.vel, obstacle.radius, width, height);
    }
}

/// Movement for both players: dash gating, acceleration toward the control
/// vector, friction, integration, and the hard clamp into the arena.
fn integrate_players(world: &mut World, controls: &mut Controls, now: Millis) {
    let config = &world.config;
    let min = Vec2::splat(config.player_radius);
    let max = Vec2::new(config.world_width, config.world_height) - min;

    for player in &mut world.players {
        let control = controls.get_mut(player.id);

        if control.dash_requested {
            let off_cooldown = player
                .last_dash
                .is_none_or(|at| now - at >= config.dash_cooldown_ms);
            if off_cooldown {
                player.dash_until = Some(now + config.dash_duration_ms);
                player.last_dash = Some(now);
                control.dash_active = true;
                log::debug!("{} dashes", player.id.label());
            }
        }

        let speed = player.effective_speed(config, now);
        player.vel += clamp_axis(control.axis) * speed * config.accel_factor;
        player.vel *= config.friction;
        player.pos += player.vel * config.step_scale;
        player.pos = clamp_to_rect(player.pos, min, max);

        // The one write-back into the input layer's state: the dash window
        // elapsed, so its mirror flag goes down.
        if let Some(until) = player.dash_until {
            if now >= until {
                player.dash_until = None;
                control.dash_active = false;
            }
        }
    }
}

/// Push players out of obstacles along the contact normal and knock them
/// back. Positions are re-clamped so a push-out can never leave the arena.
fn resolve_obstacle_hits(world: &mut World, now: Millis) {
    let config = &world.config;
    let min = Vec2::splat(config.player_radius);
    let max = Vec2::new(config.world_width, config.world_height) - min;

    for player in &mut world.players {
        for obstacle in &world.obstacles {
            let Some(contact) =
                circle_contact(player.pos, config.player_radius, obstacle.pos, obstacle.radius)
            else {
                continue;
            };
            player.pos += contact.normal * (contact.penetration + SEPARATION_EPSILON);
            player.vel += contact.normal * config.knockback_impulse;
            player.pos = clamp_to_rect(player.pos, min, max);
            player.hit_flash_until = now + HIT_FLASH_MS;
        }
    }
}

/// Symmetric separation when the two players overlap. Coincident centers
/// produce no contact, so resolution is skipped for that tick.
fn resolve_player_overlap(world: &mut World) {
    let config = &world.config;
    let min = Vec2::splat(config.player_radius);
    let max = Vec2::new(config.world_width, config.world_height) - min;

    let [a, b] = &mut world.players;
    let Some(contact) = circle_contact(a.pos, config.player_radius, b.pos, config.player_radius)
    else {
        return;
    };
    let push = contact.normal * (contact.penetration * 0.5 + SEPARATION_EPSILON);
    a.pos = clamp_to_rect(a.pos + push, min, max);
    b.pos = clamp_to_rect(b.pos - push, min, max);
    a.vel += contact.normal * config.knockback_impulse;
    b.vel -= contact.normal * config.knockback_impulse;
}

/// Pickup resolution. Player A is checked before player B, so A wins any
/// star both players reach in the same tick; a removed pickup can never be
/// collected twice.
fn collect_pickups(world: &mut World, now: Millis) {
    let scale = world.config.pickup_radius_scale;
    let star_reach = world.config.player_radius + world.config.star_radius * scale;
    let power_reach = world.config.player_radius + world.config.power_radius * scale;
    let boost_ms = world.config.boost_duration_ms;

    for index in 0..world.players.len() {
        let pos = world.players[index].pos;

        let before = world.stars.len();
        world.stars.retain(|star| !within_reach(star.pos, pos, star_reach));
        let collected = (before - world.stars.len()) as u32;
        if collected > 0 {
            let player = &mut world.players[index];
            player.score += collected;
            log::debug!(
                "{} collects {collected} star(s), score now {}",
                player.id.label(),
                player.score
            );
        }

        let mut grabbed: Vec<PowerUpKind> = Vec::new();
        world.power_ups.retain(|power| {
            if within_reach(power.pos, pos, power_reach) {
                grabbed.push(power.kind);
                false
            } else {
                true
            }
        });
        for kind in grabbed {
            let player = &mut world.players[index];
            match kind {
                PowerUpKind::SpeedBoost => {
                    player.boost_until = Some(now + boost_ms);
                    log::debug!("{} grabs a speed boost", player.id.label());
                }
            }
        }
    }
}

/// End the round the moment a player reaches the configured score cap.
/// If both cross in the same tick the higher score wins; exactly equal
/// scores fall back to a draw.
fn check_score_cap(world: &mut World) {
    let Some(cap) = world.config.win_score else {
        return;
    };
    if world.players.iter().all(|player| player.score < cap) {
        return;
    }
    let outcome = outcome_by_score(&world.players);
    finish_round(world, outcome, "score cap");
}
