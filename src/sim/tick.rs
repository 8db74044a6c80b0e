//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the simulation deterministically.
//!
//! Per-tick ordering while Playing:
//! 1. integrate the ball
//! 2. side walls invert vx, ceiling inverts vy
//! 3. paddle overlap inverts vy and scores
//! 4. brick hit inverts vy, scores, and ENDS the tick
//! 5. all bricks gone: Victory
//! 6. floor: lose a life, respawn or GameOver
//!
//! Step 4 ending the tick is part of the rules: on a tick where a brick is
//! destroyed neither the victory check nor the floor check runs, even if
//! the ball is also past the floor. Victory is therefore reported on the
//! tick after the last brick falls.

use glam::Vec2;

use super::collision::{overlaps, reflect_x, reflect_y, wall_contacts};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one fixed timestep
///
/// Does nothing unless the session is Playing.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        log::trace!("Tick ignored in phase {}", state.phase.as_str());
        return;
    }

    state.time_ticks += 1;

    // 1. Motion
    state.ball.integrate(dt);

    // 2. Walls
    let walls = wall_contacts(&state.ball.rect(), state.arena.width, state.arena.height);
    if walls.side {
        state.ball.vel = reflect_x(state.ball.vel);
    }
    if walls.top {
        state.ball.vel = reflect_y(state.ball.vel);
    }

    // 3. Paddle
    if overlaps(&state.ball.rect(), &state.paddle.rect()) {
        state.ball.vel = reflect_y(state.ball.vel);
        state.score += 1;
        state.push_event(GameEvent::PaddleBounce { score: state.score });
    }

    // 4. Bricks (short-circuits the rest of the tick)
    let ball_rect = state.ball.rect();
    if let Some(hit) = state.bricks.hit(&ball_rect) {
        state.ball.vel = reflect_y(state.ball.vel);
        state.score += 1;
        state.push_event(GameEvent::BrickDestroyed {
            row: hit.row,
            col: hit.col,
            score: state.score,
        });
        log::debug!(
            "Brick ({}, {}) destroyed, {} left",
            hit.row,
            hit.col,
            state.bricks.visible_count()
        );
        return;
    }

    // 5. Victory
    if state.bricks.all_destroyed() {
        state.ball.vel = Vec2::ZERO;
        state.phase = GamePhase::Victory;
        state.push_event(GameEvent::Victory);
        log::info!("Victory with score {}", state.score);
        return;
    }

    // 6. Floor
    if walls.bottom {
        state.lives = state.lives.saturating_sub(1);
        if state.lives > 0 {
            log::info!("Ball lost, {} lives left", state.lives);
            state.push_event(GameEvent::LifeLost {
                remaining: state.lives,
            });
            state.respawn_ball();
        } else {
            log::info!("Game over after {} ticks", state.time_ticks);
            state.phase = GamePhase::GameOver;
            state.score = 0;
            state.push_event(GameEvent::GameOver);
        }
    }
}
