//! Whole-round scenarios driven through the public API

use glam::Vec2;
use proptest::prelude::*;

use asteroid_blaster::Settings;
use asteroid_blaster::consts::DEMO_DT;
use asteroid_blaster::sim::{
    AsteroidSize, FrameInput, Player, Projectile, RoundMode, Session, ShipIntent, tick,
};

fn start() -> FrameInput {
    FrameInput {
        start: true,
        ..Default::default()
    }
}

/// Started single-player session with an empty field except for one idle
/// asteroid in a corner, so clearing the field never triggers a wave.
fn quiet_round(seed: u64) -> Session {
    let mut session = Session::new(seed);
    tick(&mut session, &start(), DEMO_DT);
    session.clear_asteroids();
    session.spawn_asteroid(AsteroidSize::Medium, Vec2::new(40.0, 40.0), Vec2::ZERO);
    session
}

#[test]
fn start_single_player_round() {
    let mut session = Session::new(2024);
    assert_eq!(session.mode, RoundMode::NotStarted);

    tick(&mut session, &start(), DEMO_DT);

    let snap = session.snapshot();
    assert_eq!(snap.mode, RoundMode::Playing);
    assert!(!snap.multiplayer);
    assert_eq!(snap.ships.len(), 1);
    assert_eq!(snap.ships[0].pos, Vec2::new(400.0, 300.0));
    assert_eq!(snap.ships[0].health, 3);
    assert_eq!(snap.asteroids.len(), 4);
    assert!(snap.asteroids.iter().all(|a| a.size == AsteroidSize::Huge));
    assert_eq!(snap.scores, vec![0]);
}

#[test]
fn third_collision_ends_the_round() {
    let mut session = quiet_round(8);
    let ship_pos = session.ships[0].pos;

    for expected_health in [2, 1] {
        session.spawn_asteroid(AsteroidSize::Huge, ship_pos, Vec2::ZERO);
        tick(&mut session, &FrameInput::default(), DEMO_DT);
        assert_eq!(session.ships[0].health, expected_health);
        assert_eq!(session.mode, RoundMode::Playing);
    }

    session.spawn_asteroid(AsteroidSize::Huge, ship_pos, Vec2::ZERO);
    tick(&mut session, &FrameInput::default(), DEMO_DT);
    assert_eq!(session.ships[0].health, 0);
    assert_eq!(session.mode, RoundMode::GameOver);
}

#[test]
fn shooting_a_huge_asteroid_nets_one_more() {
    let mut session = quiet_round(9);
    let target = Vec2::new(600.0, 450.0);
    session.spawn_asteroid(AsteroidSize::Huge, target, Vec2::new(10.0, 5.0));
    session.ships[0].projectiles.push(Projectile::new(target, 0.0));
    let before = session.live_asteroids.len();

    tick(&mut session, &FrameInput::default(), 0.0);

    assert_eq!(session.live_asteroids.len(), before + 1);
    assert_eq!(session.score(Player::One), 10);
    let large = session
        .asteroids()
        .filter(|a| a.size == AsteroidSize::Large)
        .count();
    assert_eq!(large, 2);
}

#[test]
fn multiplayer_round_and_restart() {
    let mut session = Session::new(77);
    let toggle = FrameInput {
        toggle_multiplayer: true,
        ..Default::default()
    };
    tick(&mut session, &toggle, DEMO_DT);
    tick(&mut session, &start(), DEMO_DT);
    assert_eq!(session.ships.len(), 2);
    assert_eq!(session.snapshot().scores, vec![0, 0]);

    // Player two's ship gets rammed until the round ends
    session.clear_asteroids();
    let p2 = session.ship(Player::Two).unwrap().pos;
    for _ in 0..3 {
        session.spawn_asteroid(AsteroidSize::Medium, p2, Vec2::ZERO);
    }
    tick(&mut session, &FrameInput::default(), 0.0);
    assert_eq!(session.mode, RoundMode::GameOver);
    assert_eq!(session.ship(Player::One).unwrap().health, 3);

    tick(&mut session, &start(), DEMO_DT);
    assert_eq!(session.mode, RoundMode::Playing);
    assert!(session.multiplayer);
    assert!(session.ships.iter().all(|s| s.health == 3));
}

#[test]
fn abandon_returns_to_start_screen() {
    let mut session = Session::new(3);
    tick(&mut session, &start(), DEMO_DT);
    session.abandon();

    assert_eq!(session.mode, RoundMode::NotStarted);
    assert!(session.ships.is_empty());
    assert!(session.live_asteroids.is_empty());
    assert_eq!(session.asteroid_pool.in_use_count(), 0);
    assert_eq!(session.asteroid_pool.available_count(), 4);

    tick(&mut session, &start(), DEMO_DT);
    assert_eq!(session.mode, RoundMode::Playing);
    assert_eq!(session.asteroid_pool.total_count(), 4);
}

#[test]
fn custom_arena_from_settings() {
    let settings = Settings::from_json(r#"{ "arena_width": 1000.0, "arena_height": 400.0 }"#)
        .unwrap();
    let mut session = Session::from_settings(&settings).unwrap();
    tick(&mut session, &start(), DEMO_DT);
    assert_eq!(session.ships[0].pos, Vec2::new(500.0, 200.0));
    for _ in 0..600 {
        tick(&mut session, &FrameInput::default(), DEMO_DT);
        assert!(session.asteroids().all(|a| session.arena.contains(a.pos)));
    }
}

fn intent_strategy() -> impl Strategy<Value = ShipIntent> {
    any::<[bool; 5]>().prop_map(|[up, down, left, right, fire]| ShipIntent {
        up,
        down,
        left,
        right,
        fire,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every entity is inside the arena after every frame, and the pool's
    /// in-use count always matches the live asteroid list.
    #[test]
    fn entities_stay_in_arena(
        seed in any::<u64>(),
        frames in proptest::collection::vec((intent_strategy(), intent_strategy(), 0.0f32..0.05), 1..240),
    ) {
        let mut session = Session::new(seed);
        session.multiplayer = true;
        tick(&mut session, &start(), DEMO_DT);

        for (p1, p2, dt) in frames {
            let input = FrameInput { ships: [p1, p2], ..Default::default() };
            tick(&mut session, &input, dt);
            if session.mode == RoundMode::GameOver {
                tick(&mut session, &start(), DEMO_DT);
            }

            let arena = session.arena;
            for ship in &session.ships {
                prop_assert!(arena.contains(ship.pos));
                for projectile in &ship.projectiles {
                    prop_assert!(arena.contains(projectile.pos));
                }
            }
            for asteroid in session.asteroids() {
                prop_assert!(arena.contains(asteroid.pos));
            }
            prop_assert_eq!(session.asteroid_pool.in_use_count(), session.live_asteroids.len());
            prop_assert_eq!(
                session.asteroid_pool.in_use_count() + session.asteroid_pool.available_count(),
                session.asteroid_pool.total_count()
            );
        }
    }

    /// Scores only move in steps of 10 and never decrease mid-round
    #[test]
    fn scores_increase_in_fixed_steps(
        seed in any::<u64>(),
        frames in proptest::collection::vec(intent_strategy(), 1..300),
    ) {
        let mut session = Session::new(seed);
        tick(&mut session, &start(), DEMO_DT);
        let mut last = 0;
        for intent in frames {
            if session.mode != RoundMode::Playing {
                break;
            }
            let input = FrameInput { ships: [intent, ShipIntent::default()], ..Default::default() };
            tick(&mut session, &input, DEMO_DT);
            let score = session.score(Player::One);
            prop_assert!(score >= last);
            prop_assert_eq!(score % 10, 0);
            last = score;
        }
    }
}
