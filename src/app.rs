//! Lifecycle composition
//!
//! The game and the music worker share nothing. They only meet here, where
//! host lifecycle signals are mapped onto them:
//! - foreground: resume music
//! - background: pause music
//! - teardown: stop music, halt the tick loop

use std::time::Duration;

use crate::audio::{AudioController, AudioStatus, MusicSource};
use crate::config::GameConfig;
use crate::game::Game;
use crate::sim::{GameEvent, GamePhase, Snapshot};

/// A running application: one game session plus background music
pub struct App {
    game: Game,
    audio: Option<AudioController>,
    torn_down: bool,
}

impl App {
    /// Build the app and start the music worker
    ///
    /// Audio is optional: if the worker can't be spawned the failure is
    /// logged and the game runs silently.
    pub fn new(config: GameConfig, music: impl MusicSource) -> Self {
        let audio = if config.audio.enabled {
            match AudioController::spawn(music, &config.audio) {
                Ok(audio) => Some(audio),
                Err(e) => {
                    log::error!("Running without music: {}", e);
                    None
                }
            }
        } else {
            log::info!("Music disabled by config");
            None
        };

        Self {
            game: Game::new(config),
            audio,
            torn_down: false,
        }
    }

    /// Build the app with no music worker at all
    pub fn silent(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
            audio: None,
            torn_down: false,
        }
    }

    // === Lifecycle ===

    pub fn on_foreground(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(audio) = &self.audio {
            audio.resume();
        }
    }

    pub fn on_background(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(audio) = &self.audio {
            audio.pause();
        }
    }

    /// Release everything. Further calls are ignored.
    pub fn on_teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(audio) = self.audio.as_mut() {
            audio.stop();
        }
        self.game.halt();
        log::info!("App torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // === Game input ===

    pub fn on_tick(&mut self) -> bool {
        !self.torn_down && self.game.on_tick()
    }

    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.torn_down {
            return 0;
        }
        self.game.advance(elapsed)
    }

    pub fn on_paddle_input(&mut self, raw_x: f32) {
        if !self.torn_down {
            self.game.on_paddle_input(raw_x);
        }
    }

    pub fn on_new_game_requested(&mut self) {
        if self.torn_down {
            log::debug!("New game requested after teardown");
            return;
        }
        self.game.on_new_game_requested();
    }

    // === Output ===

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// `None` when running without a music worker
    pub fn audio_status(&self) -> Option<AudioStatus> {
        self.audio.as_ref().map(AudioController::status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentSource;
    use std::time::Instant;

    fn wait_for_status(app: &App, status: AudioStatus) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if app.audio_status() == Some(status) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        false
    }

    fn config() -> GameConfig {
        let mut config = GameConfig::default();
        config.audio.watchdog_interval_ms = 2;
        config
    }

    #[test]
    fn test_lifecycle_drives_audio() {
        let source = SilentSource::new();
        let mut app = App::new(config(), source.clone());
        assert!(wait_for_status(&app, AudioStatus::Playing));

        app.on_background();
        assert_eq!(app.audio_status(), Some(AudioStatus::Paused));

        app.on_foreground();
        assert!(wait_for_status(&app, AudioStatus::Playing));

        app.on_teardown();
        assert_eq!(app.audio_status(), Some(AudioStatus::Stopped));
        assert!(source.released());
    }

    #[test]
    fn test_teardown_halts_game() {
        let mut app = App::silent(config());
        app.on_new_game_requested();
        assert!(app.on_tick());

        app.on_teardown();
        app.on_teardown();
        assert!(app.is_torn_down());
        assert!(!app.on_tick());
        assert_eq!(app.advance(Duration::from_millis(50)), 0);

        app.on_new_game_requested();
        assert!(!app.game().is_running());
    }

    #[test]
    fn test_audio_disabled_by_config() {
        let mut config = config();
        config.audio.enabled = false;
        let mut app = App::new(config, SilentSource::new());
        assert_eq!(app.audio_status(), None);
        app.on_background();
        app.on_foreground();
        app.on_teardown();
    }

    #[test]
    fn test_game_and_audio_are_independent() {
        let mut app = App::new(config(), SilentSource::new());
        app.on_new_game_requested();
        app.on_background();

        // The game keeps ticking while music is paused
        assert_eq!(app.advance(Duration::from_millis(30)), 3);
        assert_eq!(app.phase(), GamePhase::Playing);
        app.on_teardown();
    }
}
