//! Star Rush headless demo
//!
//! Drives a short session of rounds at a fixed 60 Hz step with scripted
//! controls and prints the outcomes. Shows the caller-owns-the-loop
//! contract: the driver owns the world, the control state, and the clock,
//! and clears one-shot inputs after each tick.

use glam::Vec2;

use star_rush::Scoreboard;
use star_rush::consts::TICK_MS;
use star_rush::sim::{ArenaConfig, Controls, RoundOutcome, World, advance};

fn main() {
    env_logger::init();
    log::info!("star-rush headless demo starting");

    let config = ArenaConfig {
        rng_seed: Some(2024),
        round_duration_ms: 30_000.0,
        ..Default::default()
    };
    let mut scoreboard = Scoreboard::new();

    for round in 1..=3 {
        // A fresh clock origin per round; only differences matter
        let started_at = round as f64 * 60_000.0;
        let mut world =
            World::start_round(config.clone(), started_at).expect("demo config is valid");
        let mut controls = Controls::default();

        let mut tick: u64 = 0;
        while !world.is_over() {
            tick += 1;
            script_controls(&mut controls, tick);
            advance(&mut world, &mut controls, started_at + tick as f64 * TICK_MS);
            controls.a.dash_requested = false;
            controls.b.dash_requested = false;
        }

        let outcome = world.winner().expect("loop exits only on a finished round");
        scoreboard.record(outcome);
        let verdict = match outcome {
            RoundOutcome::Win(id) => id.label(),
            RoundOutcome::Draw => "draw",
        };
        println!(
            "round {round}: {verdict}  ({} - {})",
            world.players[0].score, world.players[1].score
        );
    }

    println!(
        "session: A {} / B {} / draws {}",
        scoreboard.wins_a, scoreboard.wins_b, scoreboard.draws
    );
}

/// Two scripted wanderers: A sweeps the arena, B orbits, both dash on a
/// fixed cadence.
fn script_controls(controls: &mut Controls, tick: u64) {
    let t = tick as f32 * 0.02;
    controls.a.axis = Vec2::new(t.sin(), (t * 0.6).cos());
    controls.b.axis = Vec2::new(-(t * 0.8).cos(), (t * 1.1).sin());
    controls.a.dash_requested = tick % 150 == 0;
    controls.b.dash_requested = tick % 180 == 0;
}
