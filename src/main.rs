//! Sun Dash headless demo entry point
//!
//! Runs the simulation core without a renderer: an autoplay loop strafes the
//! player, logs score changes, and exercises a full game-over/restart cycle.

use std::time::{Duration, Instant};

use sun_dash::GameConfig;
use sun_dash::bridge::{GameOverDisplay, HeadlessBridge, InstantAssets, ScoreDisplay};
use sun_dash::sim::{Command, GamePhase, Session, run_frame};

/// Logs score updates to the console
struct ConsoleScore;

impl ScoreDisplay for ConsoleScore {
    fn set_score(&mut self, score: u64) {
        log::info!("score: {score}");
    }
}

/// Logs the terminal banner to the console
struct ConsoleBanner;

impl GameOverDisplay for ConsoleBanner {
    fn show(&mut self, message: &str) {
        log::info!("{message}");
    }
}

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameConfig::default();
    };
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            log::error!("cannot read config {path}: {err}");
            std::process::exit(1);
        }
    };
    match GameConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid config {path}: {err}");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Sun Dash (headless) starting...");

    let config = load_config();
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(err) => {
            log::error!("invalid config: {err}");
            std::process::exit(1);
        }
    };

    let mut bridge = HeadlessBridge::new();
    let mut assets = InstantAssets;
    let mut score = ConsoleScore;
    let mut banner = ConsoleBanner;

    session.try_populate(&mut assets, &mut bridge);
    session.clock.start();
    log::info!(
        "session live: {} powerups, {} enemies",
        session.powerups.len(),
        session.enemies.len()
    );

    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    let mut best_score = 0u64;
    let mut restarted = false;

    for frame in 0u64.. {
        let now = Instant::now();
        let frame_dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        // Scripted autoplay: strafe back and forth, hop now and then
        if frame % 45 == 0 {
            let command = if (frame / 45) % 2 == 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            };
            session.apply_command(command, &mut bridge, &mut assets, &mut score);
        }
        if frame % 240 == 120 {
            session.apply_command(Command::Jump, &mut bridge, &mut assets, &mut score);
        }

        run_frame(
            &mut session,
            &mut accumulator,
            frame_dt,
            &mut bridge,
            &mut score,
            &mut banner,
        );
        best_score = best_score.max(session.score);

        // Once the ejection has played out, restart a single time to show
        // the full reset, then let the second run end the demo
        if session.phase == GamePhase::GameOver && session.player.is_none() {
            if restarted {
                break;
            }
            restarted = true;
            log::info!("restarting to exercise the full session reset");
            session.apply_command(Command::Restart, &mut bridge, &mut assets, &mut score);
        }

        if started.elapsed() > Duration::from_secs(180) {
            log::info!("demo time limit reached");
            break;
        }
        std::thread::sleep(Duration::from_millis(16));
    }

    log::info!(
        "demo finished after {:.1?}: best score {}, difficulty reached {:.2}",
        started.elapsed(),
        best_score,
        session.difficulty()
    );
}
