//! Host-supplied audio resource
//!
//! The music asset is opaque to the game: the host hands over a
//! `MusicSource`, and the worker opens one `MusicStream` from it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// Audio failures
#[derive(Debug, Error)]
pub enum AudioError {
    /// The music resource could not be acquired
    #[error("audio resource unavailable: {0}")]
    Unavailable(String),

    /// The stream refused to start
    #[error("playback failed: {0}")]
    Playback(String),

    /// The worker thread could not be spawned
    #[error("failed to spawn audio worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A playable, loopable music stream
pub trait MusicStream: Send {
    /// Ask the stream to loop on its own when it reaches the end
    fn set_looping(&mut self, looping: bool);

    /// Start or continue playback
    fn start(&mut self) -> Result<(), AudioError>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    fn is_playing(&self) -> bool;

    /// Free the underlying resource. Called exactly once by the controller.
    fn release(&mut self);
}

/// Factory for the music stream (the host's asset loader)
pub trait MusicSource: Send + 'static {
    fn open(&self) -> Result<Box<dyn MusicStream>, AudioError>;
}

impl<F> MusicSource for F
where
    F: Fn() -> Result<Box<dyn MusicStream>, AudioError> + Send + 'static,
{
    fn open(&self) -> Result<Box<dyn MusicStream>, AudioError> {
        self()
    }
}

/// A stream that produces no sound but tracks play state
///
/// Used by the headless binary and anywhere no audio device exists.
#[derive(Debug, Default)]
pub struct SilentStream {
    playing: bool,
    released: Arc<AtomicBool>,
}

impl MusicStream for SilentStream {
    // Nothing to loop
    fn set_looping(&mut self, _looping: bool) {}

    fn start(&mut self) -> Result<(), AudioError> {
        if self.released.load(Ordering::Acquire) {
            return Err(AudioError::Playback("stream already released".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn release(&mut self) {
        self.playing = false;
        self.released.store(true, Ordering::Release);
    }
}

/// Source that hands out `SilentStream`s
#[derive(Debug, Clone, Default)]
pub struct SilentSource {
    released: Arc<AtomicBool>,
}

impl SilentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the stream opened from this source has been released
    pub fn released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl MusicSource for SilentSource {
    fn open(&self) -> Result<Box<dyn MusicStream>, AudioError> {
        Ok(Box::new(SilentStream {
            released: Arc::clone(&self.released),
            ..SilentStream::default()
        }))
    }
}
