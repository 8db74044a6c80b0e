//! Game state and core simulation types
//!
//! One `GameState` is one session's worth of simulation data. It is owned by
//! the host-facing `Game` and passed by `&mut` into the tick; nothing here is
//! global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bricks::BrickGrid;
use super::rect::Rect;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No active ball, waiting for a new-game request
    #[default]
    Idle,
    /// Tick loop active
    Playing,
    /// Every brick destroyed; ball frozen, tick loop halted
    Victory,
    /// Out of lives; tick loop halted
    GameOver,
}

impl GamePhase {
    /// Victory and GameOver stop the tick loop until a new game is requested
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "Idle",
            GamePhase::Playing => "Playing",
            GamePhase::Victory => "Victory",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh session started
    NewGame,
    /// Ball bounced off the paddle
    PaddleBounce { score: u32 },
    /// A brick was destroyed
    BrickDestroyed { row: usize, col: usize, score: u32 },
    /// Ball passed the paddle but lives remain
    LifeLost { remaining: u32 },
    /// All bricks destroyed
    Victory,
    /// Last life lost
    GameOver,
}

impl GameEvent {
    /// Short transient notice text for the host to show (toast style)
    pub fn notice(&self) -> Option<String> {
        match self {
            GameEvent::LifeLost { remaining } => Some(format!("{} balls left", remaining)),
            GameEvent::Victory => Some("You Win!".to_string()),
            GameEvent::GameOver => Some("Game Over".to_string()),
            _ => None,
        }
    }
}

/// Screen metrics the simulation runs inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Display density; scales the ball speed
    pub density: f32,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub size: Vec2,
}

impl Ball {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Advance position by one fixed step. No wall-clock compensation.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Fresh-start position: centered on screen
    pub fn center_in(&mut self, arena: &Arena) {
        self.pos = Vec2::new(
            arena.width / 2.0 - self.size.x / 2.0,
            arena.height / 2.0 - self.size.y / 2.0,
        );
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// The player's paddle. Only moves horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the session)
    pub y: f32,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(size: Vec2, y: f32) -> Self {
        Self { x: 0.0, y, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size.x, self.size.y)
    }

    /// Center the paddle under a raw input x coordinate
    ///
    /// Not clamped: the paddle may be dragged partly or fully off-screen.
    pub fn set_target(&mut self, raw_x: f32) {
        self.x = raw_x - self.size.x / 2.0;
    }

    /// Like `set_target`, but keeps the paddle fully on-screen
    pub fn set_target_clamped(&mut self, raw_x: f32, screen_width: f32) {
        self.set_target(raw_x);
        let max_x = (screen_width - self.size.x).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }

    pub fn center_in(&mut self, arena: &Arena) {
        self.x = arena.width / 2.0 - self.size.x / 2.0;
    }
}

/// Complete game state for one session (deterministic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub arena: Arena,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: u32,
    pub lives: u32,
    /// Ticks simulated in the current session
    pub time_ticks: u64,
    /// Pending events for the host (drained each frame)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state: no bricks, ball parked at the center, not moving
    pub fn new(config: GameConfig) -> Self {
        let arena = Arena {
            width: config.screen_width,
            height: config.screen_height,
            density: config.density,
        };
        let mut ball = Ball::new(Vec2::splat(config.ball_size));
        ball.center_in(&arena);
        let mut paddle = Paddle::new(
            Vec2::new(config.paddle_width, config.paddle_height),
            config.screen_height - config.paddle_bottom_offset,
        );
        paddle.center_in(&arena);

        Self {
            lives: config.initial_lives,
            config,
            arena,
            phase: GamePhase::Idle,
            ball,
            paddle,
            bricks: BrickGrid::empty(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Launch/respawn velocity: up and to the right, scaled by density
    pub fn launch_velocity(&self) -> Vec2 {
        let speed = self.config.base_speed * self.arena.density;
        Vec2::new(speed, -speed)
    }

    /// Full reset followed by a fresh start
    ///
    /// Valid from any phase. Lives and score reset, the grid is rebuilt from
    /// scratch, ball and paddle are recentered (no respawn offset).
    pub fn start_new_game(&mut self) {
        self.lives = self.config.initial_lives;
        self.score = 0;
        self.time_ticks = 0;
        self.bricks = BrickGrid::layout(
            self.config.brick_rows,
            self.config.brick_cols,
            Vec2::new(self.config.brick_width, self.config.brick_height),
            self.config.brick_margin,
            Vec2::new(self.config.brick_origin_x, self.config.brick_origin_y),
        );

        self.paddle.center_in(&self.arena);
        self.ball.center_in(&self.arena);
        self.ball.vel = self.launch_velocity();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::NewGame);

        log::info!(
            "New game: {}x{} bricks, {} lives",
            self.bricks.rows(),
            self.bricks.cols(),
            self.lives
        );
    }

    /// Reposition after a lost life
    ///
    /// Differs from the fresh start: the ball drops by the respawn offset.
    /// The paddle is recentered and the launch velocity restored.
    pub fn respawn_ball(&mut self) {
        self.ball.center_in(&self.arena);
        self.ball.pos.y += self.config.respawn_offset_y;
        self.ball.vel = self.launch_velocity();
        self.paddle.center_in(&self.arena);
    }

    /// Move the paddle toward a raw input x. Ignored before the first game.
    pub fn set_paddle_target(&mut self, raw_x: f32) {
        if self.phase == GamePhase::Idle {
            log::trace!("Paddle input ignored while idle");
            return;
        }
        if self.config.clamp_paddle {
            self.paddle.set_target_clamped(raw_x, self.arena.width);
        } else {
            self.paddle.set_target(raw_x);
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The new-game control is shown whenever no session is running
    pub fn show_new_game_control(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Everything the presentation layer needs to draw a frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            ball: self.ball.rect(),
            paddle: self.paddle.rect(),
            brick_rows: self.bricks.rows(),
            brick_cols: self.bricks.cols(),
            bricks_visible: self.bricks.visibility_mask(),
            show_new_game: self.show_new_game_control(),
        }
    }
}

/// Pollable view of the session for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub ball: Rect,
    pub paddle: Rect,
    pub brick_rows: usize,
    pub brick_cols: usize,
    /// Row-major visibility flags
    pub bricks_visible: Vec<bool>,
    pub show_new_game: bool,
}
