//! Emupanel - the simulation core behind an emulator-style control panel
//!
//! Core modules:
//! - `sim`: deterministic fixed-tick simulation (bodies, collisions, session state)
//! - `settings`: user preferences (mode, speed, remembered content path)
//! - `highscores`: best-runs leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::{ControlError, PhysicsMode, Session, SimPhase, Speed};

/// Panel configuration constants
pub mod consts {
    use std::time::Duration;

    /// Nominal tick interval (~60 Hz)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(16);
    /// Tick rate shown on the panel while running
    pub const NOMINAL_FPS: u32 = 60;

    /// Play-field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 512.0;
    pub const FIELD_HEIGHT: f32 = 240.0;

    /// Every body is a 20x20 square
    pub const BODY_SIZE: f32 = 20.0;

    /// Top of the ground strip in the bounce modes
    pub const GROUND_Y: f32 = 200.0;

    /// Bouncing rect spawn state
    pub const RECT_START_X: f32 = 0.0;
    pub const RECT_START_Y: f32 = 180.0;
    pub const RECT_VX: f32 = 5.0;
    /// Initial upward velocity in gravity mode
    pub const RECT_LAUNCH_VY: f32 = -10.0;

    /// Gravity mode physics
    pub const GRAVITY: f32 = 0.5;
    /// Fraction of vertical speed kept after a ground bounce
    pub const RESTITUTION: f32 = 0.8;

    /// Player spawn and movement (obstacle mode)
    pub const PLAYER_START_X: f32 = 256.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    /// Horizontal displacement per move event
    pub const PLAYER_STEP: f32 = 10.0;

    /// Obstacle drift per tick, before the speed multiplier
    pub const OBSTACLE_VX: f32 = 2.0;
    /// Live obstacles the pool keeps topped up
    pub const POOL_CAPACITY: usize = 5;
}

/// Truncate a simulation coordinate for display
///
/// The canvas works in whole pixels; the simulation itself never loses
/// fractional precision.
#[inline]
pub fn display_px(coord: f32) -> i32 {
    coord as i32
}
