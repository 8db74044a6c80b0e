//! Host-facing game session
//!
//! `Game` owns the session state and a single-flight tick loop. The host
//! (presentation layer) calls into it from one thread: input, ticks and
//! new-game requests. Nothing here locks.

use std::time::Duration;

use crate::config::GameConfig;
use crate::consts::MAX_SUBSTEPS;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, tick};

/// Fixed-cadence tick scheduler
///
/// Models a self re-posting timer: while armed, one tick is due every
/// `interval`. The loop halts by not being re-armed after a tick that left
/// the session outside Playing. Ticks never overlap because running one
/// needs `&mut` access to the loop.
#[derive(Debug, Clone)]
pub struct TickLoop {
    interval: Duration,
    armed: bool,
    accumulator: Duration,
}

impl TickLoop {
    /// `interval` is raised to 1 ms if shorter, so a due tick always consumes time
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            armed: false,
            accumulator: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm(&mut self) {
        self.armed = true;
        self.accumulator = Duration::ZERO;
    }

    /// Stop re-posting; any time already accumulated is dropped
    pub fn disarm(&mut self) {
        self.armed = false;
        self.accumulator = Duration::ZERO;
    }

    /// Add elapsed wall time, capped so a long stall can't queue unbounded ticks
    fn accumulate(&mut self, elapsed: Duration) {
        if !self.armed {
            return;
        }
        let cap = self.interval * MAX_SUBSTEPS;
        self.accumulator = (self.accumulator + elapsed).min(cap);
    }

    /// Consume one interval if a tick is due
    fn take_due(&mut self) -> bool {
        if self.armed && self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// One player's game: session state plus its tick loop
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    tick_loop: TickLoop,
    dt: f32,
}

impl Game {
    /// Create an idle game. Nothing moves until `on_new_game_requested`.
    pub fn new(config: GameConfig) -> Self {
        let tick_loop = TickLoop::new(config.tick_interval());
        let dt = config.tick_dt();
        Self {
            state: GameState::new(config),
            tick_loop,
            dt,
        }
    }

    /// Reset everything and start playing
    pub fn on_new_game_requested(&mut self) {
        self.state.start_new_game();
        self.tick_loop.arm();
    }

    /// Run one simulation step if the loop is armed
    ///
    /// Returns whether a step ran. After a step that ends the session the
    /// loop is not re-armed.
    pub fn on_tick(&mut self) -> bool {
        if !self.tick_loop.is_armed() {
            log::trace!("Tick delivered while the loop is halted");
            return false;
        }
        tick(&mut self.state, self.dt);
        if self.state.phase != GamePhase::Playing {
            log::debug!("Tick loop halted ({})", self.state.phase.as_str());
            self.tick_loop.disarm();
        }
        true
    }

    /// Run every tick due after `elapsed` of wall time (at most MAX_SUBSTEPS)
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.tick_loop.accumulate(elapsed);
        let mut ticks = 0;
        while self.tick_loop.take_due() {
            if self.on_tick() {
                ticks += 1;
            }
        }
        ticks
    }

    /// Pointer moved to `raw_x`
    pub fn on_paddle_input(&mut self, raw_x: f32) {
        self.state.set_paddle_target(raw_x);
    }

    /// Stop ticking without touching the session (host teardown)
    pub fn halt(&mut self) {
        self.tick_loop.disarm();
    }

    pub fn is_running(&self) -> bool {
        self.tick_loop.is_armed()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn show_new_game_control(&self) -> bool {
        self.state.show_new_game_control()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_loop.interval()
    }
}
