//! Brick Breaker headless entry point
//!
//! Plays one session with an autopilot that keeps the paddle under the ball,
//! then prints the final snapshot as JSON. Rendering and touch input belong
//! to the host; this binary stands in for it.
//!
//! Usage: `brick-breaker [--realtime] [config.json]`

use std::time::Instant;

use brick_breaker::audio::SilentSource;
use brick_breaker::{App, GameConfig};

/// Stop after this many ticks if the session hasn't ended (~10 minutes of play)
const MAX_TICKS: u64 = 60_000;
/// Simulate the app going to the background for a while mid-game
const BACKGROUND_AT_TICK: u64 = 500;
const FOREGROUND_AT_TICK: u64 = 800;

fn main() {
    env_logger::init();

    let mut realtime = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            _ => config_path = Some(arg),
        }
    }

    let config = match config_path {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    log::info!("Brick Breaker (headless) starting...");
    let interval = config.tick_interval();
    let mut app = App::new(config, SilentSource::new());
    app.on_foreground();
    app.on_new_game_requested();

    let mut ticks = 0u64;
    let mut backgrounded = false;
    let mut foregrounded = false;
    let mut last = Instant::now();
    while ticks < MAX_TICKS && app.game().is_running() {
        // Autopilot: center the paddle under the ball
        let ball = app.snapshot().ball;
        app.on_paddle_input(ball.center().x);

        let ran = if realtime {
            std::thread::sleep(interval);
            let now = Instant::now();
            let ran = app.advance(now - last);
            last = now;
            ran
        } else {
            u32::from(app.on_tick())
        };
        ticks += u64::from(ran);

        for event in app.drain_events() {
            match event.notice() {
                Some(text) => log::info!("{}", text),
                None => log::debug!("{:?}", event),
            }
        }

        if !backgrounded && ticks >= BACKGROUND_AT_TICK {
            backgrounded = true;
            app.on_background();
        } else if backgrounded && !foregrounded && ticks >= FOREGROUND_AT_TICK {
            foregrounded = true;
            app.on_foreground();
        }
    }

    let snapshot = app.snapshot();
    log::info!(
        "Finished after {} ticks ({:?} simulated): {} with score {}",
        ticks,
        interval * ticks as u32,
        snapshot.phase.as_str(),
        snapshot.score
    );
    app.on_teardown();

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
