//! Asteroid Blaster headless driver
//!
//! Runs the simulation at a fixed 60 Hz with an autopilot in every seat and
//! logs round transitions. Usage: `asteroid-blaster [settings.json] [--multi]`

use glam::Vec2;

use asteroid_blaster::Settings;
use asteroid_blaster::consts::DEMO_DT;
use asteroid_blaster::sim::{FrameInput, RoundMode, Session, Ship, ShipIntent, tick};

/// Rounds to play before exiting
const ROUNDS: u32 = 3;
/// Safety stop (10 simulated minutes)
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings_path = None;
    let mut multiplayer = false;
    for arg in std::env::args().skip(1) {
        if arg == "--multi" {
            multiplayer = true;
        } else {
            settings_path = Some(arg);
        }
    }

    let settings = match settings_path {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut session = match Session::from_settings(&settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Asteroid Blaster starting with seed {}", settings.seed);

    let mut input = FrameInput {
        toggle_multiplayer: multiplayer,
        start: true,
        ..Default::default()
    };

    let mut rounds = 0;
    let mut frame = 0u64;
    while frame < MAX_FRAMES {
        let before = session.mode;
        tick(&mut session, &input, DEMO_DT);
        frame += 1;

        // One-shot signals are consumed by the tick
        input.toggle_multiplayer = false;
        input.start = false;

        if before == RoundMode::Playing && session.mode == RoundMode::GameOver {
            rounds += 1;
            let snap = session.snapshot();
            log::info!(
                "Round {rounds} over at wave {} after {:.1}s, scores {:?}",
                snap.wave,
                frame as f32 * DEMO_DT,
                snap.scores
            );
            if rounds >= ROUNDS {
                break;
            }
            input.start = true;
        }

        for ship in &session.ships {
            input.ships[ship.player.index()] = autopilot(&session, ship);
        }
    }

    match serde_json::to_string(&session.snapshot()) {
        Ok(json) => log::debug!("Final frame: {json}"),
        Err(e) => log::warn!("Could not serialize final frame: {e}"),
    }
    log::info!(
        "Finished after {frame} frames; {} asteroid instances pooled",
        session.asteroid_pool.total_count()
    );
}

/// Steer toward the nearest asteroid (through the wrap) and keep firing
fn autopilot(session: &Session, ship: &Ship) -> ShipIntent {
    let size = session.arena.size();
    let nearest = session
        .asteroids()
        .map(|a| {
            let mut delta = a.pos - ship.pos;
            // Shortest path on the torus
            if delta.x.abs() > size.x / 2.0 {
                delta.x -= size.x.copysign(delta.x);
            }
            if delta.y.abs() > size.y / 2.0 {
                delta.y -= size.y.copysign(delta.y);
            }
            delta
        })
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

    let Some(delta) = nearest else {
        return ShipIntent::default();
    };

    // Hold off at a distance so the ship points at targets without ramming them
    let toward = if delta.length() > 150.0 { delta } else { -delta * 0.25 + delta.perp() };
    let dir = toward.normalize_or_zero();
    let dead_zone = 0.3;
    ShipIntent {
        up: dir.y < -dead_zone,
        down: dir.y > dead_zone,
        left: dir.x < -dead_zone,
        right: dir.x > dead_zone,
        fire: dir != Vec2::ZERO,
    }
}
