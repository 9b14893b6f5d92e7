//! Session state and control operations
//!
//! Everything the panel displays lives here, owned by [`Session`] and kept
//! independent of any display layer. The UI holds a reference, feeds in
//! control events, and pulls [`PanelSnapshot`]s on its own refresh cadence.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::display_px;
use crate::sim::body::Body;
use crate::sim::pool::ObstaclePool;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Nothing to simulate; covers both "no content" and "content
    /// selected but not started"
    #[default]
    Idle,
    /// The clock advances the simulation
    Running,
    /// State frozen, elapsed time stops accumulating
    Paused,
}

/// The physics variant animating the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicsMode {
    /// A rect sliding over the ground, reflecting off the side walls
    Bounce,
    /// The same rect under gravity with a damped ground bounce
    GravityBounce,
    /// A player catching drifting obstacles for score
    #[default]
    ObstacleRun,
}

impl PhysicsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsMode::Bounce => "bounce",
            PhysicsMode::GravityBounce => "gravity-bounce",
            PhysicsMode::ObstacleRun => "obstacle-run",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounce" => Some(PhysicsMode::Bounce),
            "gravity-bounce" | "gravity" => Some(PhysicsMode::GravityBounce),
            "obstacle-run" | "obstacles" => Some(PhysicsMode::ObstacleRun),
            _ => None,
        }
    }

    /// Per-mode physics constants at the given speed step
    pub fn params(&self, speed: Speed) -> PhysicsParams {
        let (gravity, restitution) = match self {
            PhysicsMode::GravityBounce => (GRAVITY, RESTITUTION),
            _ => (0.0, 0.0),
        };
        PhysicsParams {
            gravity,
            restitution,
            speed_multiplier: speed.multiplier(),
        }
    }
}

/// Per-session physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub restitution: f32,
    /// Scales per-tick displacement; the tick cadence itself never changes
    pub speed_multiplier: f32,
}

/// Selectable steps of the panel's speed combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Speed {
    Half,
    ThreeQuarter,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

impl Speed {
    pub const ALL: [Speed; 5] = [
        Speed::Half,
        Speed::ThreeQuarter,
        Speed::Normal,
        Speed::OneAndHalf,
        Speed::Double,
    ];

    pub fn multiplier(&self) -> f32 {
        match self {
            Speed::Half => 0.5,
            Speed::ThreeQuarter => 0.75,
            Speed::Normal => 1.0,
            Speed::OneAndHalf => 1.5,
            Speed::Double => 2.0,
        }
    }

    /// Label shown in the speed selector
    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Half => "0.5x",
            Speed::ThreeQuarter => "0.75x",
            Speed::Normal => "1.0x",
            Speed::OneAndHalf => "1.5x",
            Speed::Double => "2.0x",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_end_matches('x') {
            "0.5" => Some(Speed::Half),
            "0.75" => Some(Speed::ThreeQuarter),
            "1.0" | "1" => Some(Speed::Normal),
            "1.5" => Some(Speed::OneAndHalf),
            "2.0" | "2" => Some(Speed::Double),
            _ => None,
        }
    }

    /// Snap a raw multiplier onto the nearest selectable step, if close
    pub fn from_multiplier(m: f32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| (s.multiplier() - m).abs() < 1e-3)
    }
}

/// The selected content; nothing is parsed, only the name is displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInfo {
    pub path: String,
    pub display_name: String,
}

/// Score and elapsed-time tracking for one run
///
/// Elapsed time is wall-clock derived, not tick-counted, so it is robust
/// to dropped ticks. The caller supplies `now` on every transition and
/// observation, which keeps the tracker testable without sleeping.
#[derive(Debug, Clone)]
pub struct RunStats {
    score: u64,
    /// Run time accumulated over completed Running stretches
    elapsed_base: f32,
    /// Anchor of the current Running stretch
    started_at: Option<Instant>,
}

impl RunStats {
    fn new() -> Self {
        Self {
            score: 0,
            elapsed_base: 0.0,
            started_at: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Start a Running stretch. Re-anchors, so paused time is never counted.
    fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Close the current Running stretch, banking its duration
    fn pause(&mut self, now: Instant) {
        if let Some(anchor) = self.started_at.take() {
            self.elapsed_base += now.saturating_duration_since(anchor).as_secs_f32();
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    /// Seconds of run time: banked stretches plus the live one
    pub fn elapsed_seconds(&self, now: Instant) -> f32 {
        let live = self
            .started_at
            .map(|anchor| now.saturating_duration_since(anchor).as_secs_f32())
            .unwrap_or(0.0);
        self.elapsed_base + live
    }
}

/// Rejected control transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Start requested before any content was selected
    NoContentSelected,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::NoContentSelected => {
                write!(f, "no content selected - open a file first")
            }
        }
    }
}

impl Error for ControlError {}

/// One simulation session
///
/// Single-threaded by design: all mutation happens through the control
/// operations below or through [`tick`](crate::sim::tick::tick()), which the
/// clock runs to completion before the next one is scheduled.
#[derive(Debug)]
pub struct Session {
    pub(crate) mode: PhysicsMode,
    pub(crate) speed: Speed,
    pub(crate) phase: SimPhase,
    pub(crate) content: Option<ContentInfo>,
    /// The single focus body; `None` until a run has started
    pub(crate) player: Option<Body>,
    pub(crate) pool: ObstaclePool,
    pub(crate) stats: RunStats,
    pub(crate) tick_count: u64,
    status: String,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_mode(PhysicsMode::default(), seed)
    }

    pub fn with_mode(mode: PhysicsMode, seed: u64) -> Self {
        Self {
            mode,
            speed: Speed::default(),
            phase: SimPhase::Idle,
            content: None,
            player: None,
            pool: ObstaclePool::new(seed),
            stats: RunStats::new(),
            tick_count: 0,
            status: "Ready".to_string(),
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn mode(&self) -> PhysicsMode {
        self.mode
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn content(&self) -> Option<&ContentInfo> {
        self.content.as_ref()
    }

    pub fn player(&self) -> Option<&Body> {
        self.player.as_ref()
    }

    pub fn pool(&self) -> &ObstaclePool {
        &self.pool
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Status-bar text for the panel
    pub fn status_line(&self) -> &str {
        &self.status
    }

    /// Physics constants for the current mode and speed step
    pub fn params(&self) -> PhysicsParams {
        self.mode.params(self.speed)
    }

    /// Select content for the session
    ///
    /// Only the display name is ever used; the path is remembered so the
    /// panel can reopen it. Selecting stops and resets any run in flight.
    pub fn select_content(&mut self, path: impl Into<String>, display_name: impl Into<String>) {
        let content = ContentInfo {
            path: path.into(),
            display_name: display_name.into(),
        };
        log::info!("content selected: {}", content.display_name);
        let name = content.display_name.clone();
        self.content = Some(content);
        self.reset();
        // reset() wrote "Reset: ..."; a fresh selection reads differently
        self.status = format!("Loaded: {name}");
    }

    /// Deselect content, returning to pure Idle
    pub fn clear_content(&mut self) {
        if self.content.take().is_some() {
            log::info!("content cleared");
        }
        self.reset();
    }

    /// Start a run, or resume a paused one
    ///
    /// Rejected with a user-facing notice when no content is selected.
    /// The scene is built once per episode; resuming from Paused keeps
    /// every body where it was.
    pub fn start(&mut self, now: Instant) -> Result<(), ControlError> {
        let Some(content) = &self.content else {
            log::warn!("start rejected: no content selected");
            return Err(ControlError::NoContentSelected);
        };
        let name = content.display_name.clone();

        if self.player.is_none() {
            self.init_scene();
        }

        if self.phase != SimPhase::Running {
            self.phase = SimPhase::Running;
            self.stats.resume(now);
            log::info!("running: {name}");
        }

        self.status = format!("Running: {name}");
        Ok(())
    }

    /// Freeze the run. Idempotent outside Running.
    pub fn pause(&mut self, now: Instant) {
        if self.phase != SimPhase::Running {
            return;
        }
        self.phase = SimPhase::Paused;
        self.stats.pause(now);
        if let Some(content) = &self.content {
            self.status = format!("Paused: {}", content.display_name);
            log::info!("paused: {}", content.display_name);
        }
    }

    /// Tear the run down to Idle, keeping the selected content
    ///
    /// Clears bodies, obstacles, and stats; the scene is rebuilt on the
    /// next start.
    pub fn reset(&mut self) {
        self.phase = SimPhase::Idle;
        self.player = None;
        self.pool.clear();
        self.stats.reset();
        self.tick_count = 0;
        self.status = match &self.content {
            Some(content) => {
                log::info!("reset: {}", content.display_name);
                format!("Reset: {}", content.display_name)
            }
            None => "Ready".to_string(),
        };
    }

    /// Flip Running and Paused with one input
    pub fn toggle(&mut self, now: Instant) -> Result<(), ControlError> {
        if self.phase == SimPhase::Running {
            self.pause(now);
            Ok(())
        } else {
            self.start(now)
        }
    }

    /// Move the player one step left. Running + obstacle mode only.
    pub fn move_left(&mut self) {
        self.nudge_player(-PLAYER_STEP);
    }

    /// Move the player one step right. Running + obstacle mode only.
    pub fn move_right(&mut self) {
        self.nudge_player(PLAYER_STEP);
    }

    fn nudge_player(&mut self, dx: f32) {
        if self.phase != SimPhase::Running || self.mode != PhysicsMode::ObstacleRun {
            return;
        }
        if let Some(player) = &mut self.player {
            player.nudge_x(dx, FIELD_WIDTH);
        }
    }

    /// Change the speed step. Takes effect on the next tick.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        log::debug!("speed set to {}", speed.as_str());
    }

    /// Switch the physics variant. Takes effect through a reset.
    pub fn set_mode(&mut self, mode: PhysicsMode) {
        self.mode = mode;
        log::info!("mode set to {}", mode.as_str());
        self.reset();
    }

    /// Build the mode's scene: exactly one focus body, plus the obstacle
    /// pool in obstacle mode
    fn init_scene(&mut self) {
        let player = match self.mode {
            PhysicsMode::Bounce => Body::new(
                Vec2::new(RECT_START_X, RECT_START_Y),
                Vec2::new(RECT_VX, 0.0),
            ),
            PhysicsMode::GravityBounce => Body::new(
                Vec2::new(RECT_START_X, RECT_START_Y),
                Vec2::new(RECT_VX, RECT_LAUNCH_VY),
            ),
            PhysicsMode::ObstacleRun => {
                self.pool.top_up();
                Body::stationary(Vec2::new(PLAYER_START_X, PLAYER_START_Y))
            }
        };
        self.player = Some(player);
    }

    /// Pull-based display state
    pub fn snapshot(&self, now: Instant) -> PanelSnapshot {
        PanelSnapshot {
            phase: self.phase,
            mode: self.mode,
            speed_label: self.speed.as_str().to_string(),
            score: self.stats.score(),
            elapsed_seconds: self.stats.elapsed_seconds(now),
            status: self.status.clone(),
            content_name: self.content.as_ref().map(|c| c.display_name.clone()),
            fps: match self.phase {
                SimPhase::Running => Some(NOMINAL_FPS),
                _ => None,
            },
            player: self.player.as_ref().map(DisplayRect::from_body),
            obstacles: self
                .pool
                .iter()
                .map(|o| DisplayRect::from_body(&o.body))
                .collect(),
        }
    }
}

/// Whole-pixel rectangle for the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl DisplayRect {
    pub fn from_body(body: &Body) -> Self {
        Self {
            x: display_px(body.pos.x),
            y: display_px(body.pos.y),
            w: display_px(body.size.x),
            h: display_px(body.size.y),
        }
    }
}

/// Everything the panel needs to draw one frame of UI chrome
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub phase: SimPhase,
    pub mode: PhysicsMode,
    pub speed_label: String,
    pub score: u64,
    pub elapsed_seconds: f32,
    pub status: String,
    pub content_name: Option<String>,
    /// Nominal tick rate while running, `None` otherwise
    pub fps: Option<u32>,
    pub player: Option<DisplayRect>,
    pub obstacles: Vec<DisplayRect>,
}
