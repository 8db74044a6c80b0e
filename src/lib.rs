//! Brick Breaker - A single-screen brick breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, brick grid, game state)
//! - `game`: Session object and single-flight tick loop driven by the host
//! - `audio`: Background music worker synchronized with the host lifecycle
//! - `app`: Lifecycle composition of game and audio
//! - `config`: Data-driven screen/grid/timing configuration

pub mod app;
pub mod audio;
pub mod config;
pub mod game;
pub mod sim;

pub use app::App;
pub use config::{AudioConfig, ConfigError, GameConfig};
pub use game::{Game, TickLoop};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (10 ms per tick)
    pub const SIM_DT: f32 = 0.010;
    /// Tick cadence in milliseconds (matches SIM_DT)
    pub const TICK_INTERVAL_MS: u64 = 10;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Reference screen (portrait phone, pixels)
    pub const SCREEN_WIDTH: f32 = 1080.0;
    pub const SCREEN_HEIGHT: f32 = 2340.0;
    pub const SCREEN_DENSITY: f32 = 2.75;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 9;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 40.0;
    pub const BRICK_MARGIN: f32 = 4.0;
    /// Top-left of the first brick (room for the score line above)
    pub const BRICK_ORIGIN_X: f32 = 4.0;
    pub const BRICK_ORIGIN_Y: f32 = 160.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 40.0;
    /// Launch speed per axis at density 1.0 (3 px per 10 ms tick)
    pub const BALL_BASE_SPEED: f32 = 300.0;
    /// Extra downward offset applied when the ball respawns after a lost life
    pub const RESPAWN_OFFSET_Y: f32 = 525.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 250.0;
    pub const PADDLE_HEIGHT: f32 = 40.0;
    /// Distance from the paddle top to the bottom of the screen
    pub const PADDLE_BOTTOM_OFFSET: f32 = 200.0;

    pub const INITIAL_LIVES: u32 = 3;

    /// How often the audio watchdog checks that playback is still running
    pub const AUDIO_WATCHDOG_MS: u64 = 50;
}
