//! Emupanel entry point
//!
//! A headless driver standing in for the panel UI: it validates the
//! content path at the boundary, feeds control events into the session,
//! drives the clock, and mirrors pulled snapshots into the log. The
//! simulation core itself never touches a file or the terminal.

use std::env;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use emupanel::highscores::HighScores;
use emupanel::settings::Settings;
use emupanel::sim::{Clock, PhysicsMode, Session, Speed};

/// Demo run length driven by the binary
const DEMO_SECONDS: f32 = 5.0;
/// Snapshot mirror cadence in ticks (~every half second)
const REPORT_EVERY: u64 = 30;

const SETTINGS_FILE: &str = "emupanel-settings.json";
const HIGHSCORES_FILE: &str = "emupanel-highscores.json";

fn main() {
    env_logger::init();
    log::info!("emupanel starting");

    let mut args = env::args().skip(1);
    let content_arg = args.next();
    let mode_arg = args.next().and_then(|s| PhysicsMode::from_str(&s));
    let speed_arg = args.next().and_then(|s| Speed::from_str(&s));

    let settings_path = PathBuf::from(SETTINGS_FILE);
    let mut settings = Settings::load_from(&settings_path);
    if let Some(mode) = mode_arg {
        settings.mode = mode;
    }
    if let Some(speed) = speed_arg {
        settings.speed = speed;
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = Session::with_mode(settings.mode, seed);
    session.set_speed(settings.speed);
    log::info!(
        "session: mode {} speed {} seed {seed}",
        settings.mode.as_str(),
        settings.speed.as_str()
    );

    // Boundary validation: an unreadable path is rejected here and never
    // reaches the core.
    let Some(content) = content_arg else {
        eprintln!("usage: emupanel <content-file> [mode] [speed]");
        // Starting with nothing selected is a rejected transition, not a crash
        if let Err(notice) = session.start(Instant::now()) {
            log::warn!("{notice}");
        }
        return;
    };
    let path = PathBuf::from(&content);
    if !path.is_file() {
        log::error!("invalid file: {}", path.display());
        return;
    }
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(content.clone());

    session.select_content(content.clone(), display_name);
    settings.last_content_path = Some(content);
    if let Err(err) = settings.save_to(&settings_path) {
        log::warn!("could not save settings: {err}");
    }

    if let Err(notice) = session.start(Instant::now()) {
        log::error!("{notice}");
        return;
    }

    // Drive a bounded demo run, mirroring the panel's pull-based refresh
    let clock = Clock::new();
    let mut next_report = 0;
    clock.run_while(&mut session, |s| {
        if s.tick_count() >= next_report {
            let snap = s.snapshot(Instant::now());
            log::info!(
                "{} | score {} | {:.1}s",
                snap.status,
                snap.score,
                snap.elapsed_seconds
            );
            next_report = s.tick_count() + REPORT_EVERY;
        }
        s.stats().elapsed_seconds(Instant::now()) < DEMO_SECONDS
    });

    let now = Instant::now();
    session.pause(now);
    let snap = session.snapshot(now);
    match serde_json::to_string_pretty(&snap) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialize failed: {err}"),
    }

    let scores_path = PathBuf::from(HIGHSCORES_FILE);
    let mut scores = HighScores::load_from(&scores_path);
    let ended_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    if let Some(rank) = scores.add_run(snap.score, snap.elapsed_seconds, ended_ms) {
        log::info!("run ranked #{rank}");
        if let Err(err) = scores.save_to(&scores_path) {
            log::warn!("could not save high scores: {err}");
        }
    }

    session.reset();
    log::info!("{}", session.status_line());
}
