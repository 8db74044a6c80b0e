//! Background music worker
//!
//! One thread, one `Mutex`/`Condvar` pair. The mutex guards the paused and
//! stopped flags and the stream itself, so `pause`, `resume`, `stop` and the
//! worker's watchdog check never interleave.
//!
//! Worker loop:
//! - paused: block on the condvar until `resume` or `stop` (no timeout)
//! - playing: if the stream stopped on its own, start it again, then sleep
//!   on the condvar for one watchdog interval
//! - stopped: exit

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use super::stream::{AudioError, MusicSource, MusicStream};
use crate::config::AudioConfig;

/// Worker status as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioStatus {
    /// Not started yet, or stopped
    #[default]
    Stopped,
    Playing,
    Paused,
    /// The resource could not be acquired; the worker has exited
    Failed,
}

/// State shared between the host thread and the worker
struct Inner {
    paused: bool,
    stopped: bool,
    status: AudioStatus,
    stream: Option<Box<dyn MusicStream>>,
    /// Set by `resume`; the next start is a resume, not a restart
    resumed: bool,
    /// Watchdog restarts since spawn, resumes excluded
    restarts: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    wake: Condvar,
}

/// Handle to the background music worker
pub struct AudioController {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl AudioController {
    /// Spawn the worker. It acquires the stream and starts playing on its own.
    pub fn spawn(source: impl MusicSource, config: &AudioConfig) -> Result<Self, AudioError> {
        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                paused: false,
                stopped: false,
                status: AudioStatus::Stopped,
                stream: None,
                resumed: false,
                restarts: 0,
            }),
            wake: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let looping = config.looping;
        let interval = config.watchdog_interval();
        let worker = std::thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || run(worker_shared, source, looping, interval))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Pause the stream. The worker is not woken; it parks on its next check.
    pub fn pause(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.stopped {
            return;
        }
        if let Some(stream) = inner.stream.as_mut() {
            stream.pause();
        }
        inner.paused = true;
        if inner.status == AudioStatus::Playing {
            inner.status = AudioStatus::Paused;
        }
        log::debug!("Audio paused");
    }

    /// Clear the pause and wake the worker, which restarts playback
    pub fn resume(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.stopped {
            return;
        }
        inner.paused = false;
        inner.resumed = true;
        self.shared.wake.notify_one();
        log::debug!("Audio resumed");
    }

    /// Release the stream and end the worker. Safe to call more than once.
    pub fn stop(&mut self) {
        {
            let mut inner = self.shared.inner.lock();
            if !inner.stopped {
                inner.stopped = true;
                release(&mut inner);
                self.shared.wake.notify_one();
            }
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Audio worker panicked");
            }
            log::info!("Audio stopped");
        }
    }

    pub fn status(&self) -> AudioStatus {
        self.shared.inner.lock().status
    }

    pub fn is_paused(&self) -> bool {
        self.shared.inner.lock().paused
    }

    /// How many times the watchdog had to restart playback that stopped on
    /// its own. Starts after `resume` are not counted.
    pub fn restarts(&self) -> u64 {
        self.shared.inner.lock().restarts
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Release the stream if still held. Leaves a `Failed` status alone.
fn release(inner: &mut Inner) {
    if let Some(mut stream) = inner.stream.take() {
        stream.release();
    }
    if inner.status != AudioStatus::Failed {
        inner.status = AudioStatus::Stopped;
    }
}

fn run(shared: Arc<Shared>, source: impl MusicSource, looping: bool, interval: Duration) {
    // Acquire outside the lock; opening an asset may be slow
    let mut stream = match source.open() {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("Background music disabled: {}", e);
            shared.inner.lock().status = AudioStatus::Failed;
            return;
        }
    };

    let mut inner = shared.inner.lock();
    if inner.stopped {
        // stop() raced the acquisition; the stream was never handed over
        stream.release();
        return;
    }
    stream.set_looping(looping);
    if !inner.paused {
        match stream.start() {
            Ok(()) => inner.status = AudioStatus::Playing,
            Err(e) => log::warn!("Initial playback failed, will retry: {}", e),
        }
    }
    inner.stream = Some(stream);
    log::info!("Audio worker started");

    loop {
        while inner.paused && !inner.stopped {
            inner.status = AudioStatus::Paused;
            shared.wake.wait(&mut inner);
        }
        if inner.stopped {
            break;
        }

        let resuming = std::mem::take(&mut inner.resumed);
        let mut restarted = false;
        let mut playing = false;
        if let Some(stream) = inner.stream.as_mut() {
            if !stream.is_playing() {
                match stream.start() {
                    Ok(()) => restarted = true,
                    Err(e) => log::warn!("Playback restart failed: {}", e),
                }
            }
            playing = stream.is_playing();
        }
        if playing {
            inner.status = AudioStatus::Playing;
        }
        if restarted && !resuming {
            inner.restarts += 1;
            log::debug!("Audio watchdog restarted playback ({} total)", inner.restarts);
        }

        shared.wake.wait_for(&mut inner, interval);
    }

    log::debug!("Audio worker exiting");
}
