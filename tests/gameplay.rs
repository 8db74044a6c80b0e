//! End-to-end gameplay scenarios driven through the host-facing `Game` API

use brick_breaker::sim::{BrickGrid, BrickRef, GameEvent, GamePhase, Rect, overlaps};
use brick_breaker::{Game, GameConfig};
use glam::Vec2;
use proptest::prelude::*;

const DT: f32 = 0.010;

/// Default 9x10 grid on the reference screen, density 1 (3 px per tick)
fn reference_config() -> GameConfig {
    GameConfig {
        density: 1.0,
        ..GameConfig::default()
    }
}

fn started(config: GameConfig) -> Game {
    let mut game = Game::new(config);
    game.on_new_game_requested();
    game.drain_events();
    game
}

/// Place the ball so that after one tick its top-left lands on `target`
fn aim(game: &mut Game, target: Vec2, vel: Vec2) {
    let ball = &mut game.state_mut().ball;
    ball.vel = vel;
    ball.pos = target - vel * DT;
}

#[test]
fn fresh_game_has_full_grid() {
    let game = started(reference_config());
    let snap = game.snapshot();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.lives, 3);
    assert_eq!(snap.score, 0);
    assert_eq!((snap.brick_rows, snap.brick_cols), (9, 10));
    assert_eq!(snap.bricks_visible.iter().filter(|v| **v).count(), 90);
}

#[test]
fn five_paddle_bounces() {
    let mut game = started(reference_config());
    // Paddle spans x 415..665, top at y 2140
    let paddle = game.state().paddle.rect();
    assert_eq!(paddle, Rect::new(415.0, 2140.0, 250.0, 40.0));

    for bounce in 1..=5 {
        // Bottom edge lands 1 px into the paddle
        aim(&mut game, Vec2::new(500.0, 2101.0), Vec2::new(300.0, 300.0));
        assert!(game.on_tick());
        assert_eq!(game.score(), bounce);
        assert!(game.state().ball.vel.y < 0.0);

        // Next tick carries it back out without a second bounce
        assert!(game.on_tick());
        assert_eq!(game.score(), bounce);
    }

    assert_eq!(game.score(), 5);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().bricks.visible_count(), 90);

    let bounces = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::PaddleBounce { .. }))
        .count();
    assert_eq!(bounces, 5);
}

#[test]
fn destroying_every_brick_wins() {
    let mut game = started(reference_config());
    let ball_half = Vec2::splat(20.0);

    for row in 0..9 {
        for col in 0..10 {
            let brick = game.state().bricks.brick_rect(row, col);
            aim(&mut game, brick.center() - ball_half, Vec2::new(300.0, -300.0));
            assert!(game.on_tick());

            assert!(!game.state().bricks.is_visible(row, col));
            // The hit tick short-circuits, so even the 90th hit is not yet a win
            assert_eq!(game.phase(), GamePhase::Playing);
            assert!(game.state().ball.is_moving());
        }
    }
    assert_eq!(game.score(), 90);
    assert!(game.state().bricks.all_destroyed());

    let destroyed: Vec<_> = game
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::BrickDestroyed { row, col, .. } => Some((row, col)),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed.len(), 90);
    assert_eq!(destroyed[0], (0, 0));
    assert_eq!(destroyed[89], (8, 9));

    // Next tick declares victory and freezes the ball
    aim(&mut game, Vec2::new(500.0, 1200.0), Vec2::new(300.0, -300.0));
    assert!(game.on_tick());
    assert_eq!(game.phase(), GamePhase::Victory);
    assert_eq!(game.state().ball.vel, Vec2::ZERO);
    assert_eq!(game.score(), 90);
    assert_eq!(game.drain_events(), vec![GameEvent::Victory]);

    // Loop halted
    assert!(!game.is_running());
    assert!(!game.on_tick());
    assert!(game.show_new_game_control());
}

#[test]
fn three_misses_end_the_game() {
    let mut game = started(reference_config());

    // Earn a point first so the reset is observable
    aim(&mut game, Vec2::new(500.0, 2101.0), Vec2::new(300.0, 300.0));
    game.on_tick();
    assert_eq!(game.score(), 1);
    game.drain_events();

    game.on_paddle_input(-5000.0);
    for expected_lives in [2, 1] {
        aim(&mut game, Vec2::new(500.0, 2301.0), Vec2::new(300.0, 300.0));
        assert!(game.on_tick());
        assert_eq!(game.lives(), expected_lives);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::LifeLost {
                remaining: expected_lives
            }]
        );
        // Respawned below center with the launch velocity, paddle recentered
        assert_eq!(game.state().ball.pos, Vec2::new(520.0, 1150.0 + 525.0));
        assert_eq!(game.state().ball.vel, Vec2::new(300.0, -300.0));
        assert_eq!(game.state().paddle.x, 415.0);
        game.on_paddle_input(-5000.0);
    }

    aim(&mut game, Vec2::new(500.0, 2301.0), Vec2::new(300.0, 300.0));
    assert!(game.on_tick());
    assert_eq!(game.lives(), 0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.score(), 0);
    assert_eq!(game.drain_events(), vec![GameEvent::GameOver]);
    assert!(!game.is_running());

    // New game from GameOver performs a full reset
    game.on_new_game_requested();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.score(), 0);
    assert_eq!(game.state().bricks.visible_count(), 90);
}

#[test]
fn brick_hit_on_floor_tick_keeps_life() {
    // One row of two bricks sitting on the floor of a small screen
    let config = GameConfig {
        screen_width: 400.0,
        screen_height: 800.0,
        density: 1.0,
        brick_rows: 1,
        brick_cols: 2,
        brick_origin_x: 0.0,
        brick_origin_y: 770.0,
        ..GameConfig::default()
    };
    let mut game = started(config);
    game.on_paddle_input(-5000.0);

    // Over brick (0,0) only, bottom edge past the floor
    aim(&mut game, Vec2::new(20.0, 765.0), Vec2::new(300.0, 300.0));
    assert!(game.on_tick());
    assert_eq!(game.lives(), 3);
    assert!(!game.state().bricks.is_visible(0, 0));
    assert!(game.state().bricks.is_visible(0, 1));

    // Still past the floor next tick, and nothing to hit: the life goes
    assert!(game.on_tick());
    assert_eq!(game.lives(), 2);
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn idle_game_ignores_input_and_ticks() {
    let mut game = Game::new(reference_config());
    let before = game.snapshot();
    game.on_paddle_input(10.0);
    assert!(!game.on_tick());
    assert_eq!(game.snapshot(), before);
    assert!(game.drain_events().is_empty());
}

#[test]
fn score_tracks_events_under_autopilot() {
    let mut game = started(GameConfig::default());
    let mut last_score = game.score();

    for _ in 0..20_000 {
        if !game.is_running() {
            break;
        }
        let ball = game.state().ball.rect();
        game.on_paddle_input(ball.center().x);
        game.on_tick();

        let events = game.drain_events();
        let scored = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::PaddleBounce { .. } | GameEvent::BrickDestroyed { .. }
                )
            })
            .count() as u32;

        if events.contains(&GameEvent::GameOver) {
            assert_eq!(game.score(), 0);
        } else {
            assert_eq!(game.score(), last_score + scored);
        }
        last_score = game.score();

        if game.phase() == GamePhase::Playing {
            assert!(game.state().ball.is_moving());
        }
    }
}

proptest! {
    #[test]
    fn free_flight_is_linear(
        x in 2000.0f32..8000.0,
        y in 2000.0f32..8000.0,
        vx in 50.0f32..500.0,
        vy in 50.0f32..500.0,
        flip_x in any::<bool>(),
        flip_y in any::<bool>(),
        n in 1u32..100,
    ) {
        let config = GameConfig {
            screen_width: 10_000.0,
            screen_height: 10_000.0,
            density: 1.0,
            ..GameConfig::default()
        };
        let mut game = started(config);
        let vel = Vec2::new(
            if flip_x { -vx } else { vx },
            if flip_y { -vy } else { vy },
        );
        let start = Vec2::new(x, y);
        {
            let ball = &mut game.state_mut().ball;
            ball.pos = start;
            ball.vel = vel;
        }

        for _ in 0..n {
            prop_assert!(game.on_tick());
        }

        let expected = start + vel * (n as f32) * DT;
        let actual = game.state().ball.pos;
        prop_assert!((actual - expected).length() < 0.1, "{actual} vs {expected}");
        prop_assert_eq!(game.state().ball.vel, vel);
        prop_assert_eq!(game.score(), 0);
    }

    #[test]
    fn brick_scan_takes_first_in_row_major_order(
        x in -50.0f32..1100.0,
        y in 100.0f32..600.0,
        w in 1.0f32..300.0,
        h in 1.0f32..150.0,
    ) {
        let mut grid = BrickGrid::layout(
            9,
            10,
            Vec2::new(100.0, 40.0),
            4.0,
            Vec2::new(4.0, 160.0),
        );
        let ball = Rect::new(x, y, w, h);

        let expected = (0..9)
            .flat_map(|row| (0..10).map(move |col| (row, col)))
            .find(|&(row, col)| overlaps(&ball, &grid.brick_rect(row, col)))
            .map(|(row, col)| BrickRef { row, col });

        let before = grid.visible_count();
        let hit = grid.hit(&ball);
        prop_assert_eq!(hit, expected);
        let destroyed = before - grid.visible_count();
        prop_assert_eq!(destroyed, usize::from(hit.is_some()));
    }
}
