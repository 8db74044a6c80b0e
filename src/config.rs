//! Game configuration
//!
//! Screen metrics, grid layout, sizes and timing. Loaded from JSON; any field
//! left out falls back to the defaults in `crate::consts`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Background music settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Play background music at all
    pub enabled: bool,
    /// Ask the stream to loop on its own
    pub looping: bool,
    /// How often the watchdog checks that playback is still running (ms)
    pub watchdog_interval_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            looping: true,
            watchdog_interval_ms: AUDIO_WATCHDOG_MS,
        }
    }
}

impl AudioConfig {
    /// Watchdog period, never shorter than 1 ms
    pub fn watchdog_interval(&self) -> Duration {
        Duration::from_millis(self.watchdog_interval_ms.max(1))
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Display density (scales ball speed)
    pub density: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_margin: f32,
    pub brick_origin_x: f32,
    pub brick_origin_y: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Speed per axis at density 1.0 (pixels per second)
    pub base_speed: f32,
    /// Extra downward offset when respawning after a lost life
    pub respawn_offset_y: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the paddle top to the screen bottom
    pub paddle_bottom_offset: f32,
    /// Keep the paddle fully on-screen (off by default)
    pub clamp_paddle: bool,

    // === Rules / timing ===
    pub initial_lives: u32,
    pub tick_interval_ms: u64,

    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            density: SCREEN_DENSITY,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_margin: BRICK_MARGIN,
            brick_origin_x: BRICK_ORIGIN_X,
            brick_origin_y: BRICK_ORIGIN_Y,

            ball_size: BALL_SIZE,
            base_speed: BALL_BASE_SPEED,
            respawn_offset_y: RESPAWN_OFFSET_Y,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            clamp_paddle: false,

            initial_lives: INITIAL_LIVES,
            tick_interval_ms: TICK_INTERVAL_MS,

            audio: AudioConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse from a JSON string and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::Invalid("screen size must be positive"));
        }
        if !(self.density > 0.0) {
            return Err(ConfigError::Invalid("density must be positive"));
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(ConfigError::Invalid("brick grid must have at least one row and column"));
        }
        if self.brick_width < 0.0 || self.brick_height < 0.0 || self.brick_margin < 0.0 {
            return Err(ConfigError::Invalid("brick size and margin must be non-negative"));
        }
        if !(self.ball_size > 0.0) {
            return Err(ConfigError::Invalid("ball size must be positive"));
        }
        if !(self.base_speed > 0.0) {
            return Err(ConfigError::Invalid("base speed must be positive"));
        }
        if self.paddle_width < 0.0 || self.paddle_height < 0.0 {
            return Err(ConfigError::Invalid("paddle size must be non-negative"));
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::Invalid("initial lives must be at least 1"));
        }
        let paddle_top = self.screen_height - self.paddle_bottom_offset;
        if !(paddle_top > 0.0) {
            return Err(ConfigError::Invalid("paddle must sit inside the screen"));
        }
        if self.respawn_bottom() >= paddle_top {
            return Err(ConfigError::Invalid("respawned ball must start above the paddle"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick interval must be at least 1 ms"));
        }
        if self.audio.watchdog_interval_ms == 0 {
            return Err(ConfigError::Invalid("audio watchdog interval must be at least 1 ms"));
        }
        Ok(())
    }

    /// Bottom edge of the ball right after a respawn
    fn respawn_bottom(&self) -> f32 {
        self.screen_height / 2.0 - self.ball_size / 2.0 + self.respawn_offset_y + self.ball_size
    }

    /// Simulated time per tick in seconds
    pub fn tick_dt(&self) -> f32 {
        self.tick_interval().as_secs_f32()
    }

    /// Tick period, never shorter than 1 ms
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
