//! Fixed-interval clock
//!
//! The clock is the one recurrence in the system: it runs [`tick`] to
//! completion, then re-arms only if the session is still Running. Setting
//! the phase away from Running is the whole cancellation story; there is
//! no separate cancel token. An in-flight tick always finishes its step.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::TICK_INTERVAL;
use crate::sim::state::{Session, SimPhase};
use crate::sim::tick::tick;

/// Drives a session at a fixed wall-clock cadence
///
/// Speed changes never touch the interval; they scale per-tick
/// displacement inside [`tick`].
#[derive(Debug, Clone)]
pub struct Clock {
    interval: Duration,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// A clock at the nominal 16 ms cadence
    pub fn new() -> Self {
        Self {
            interval: TICK_INTERVAL,
        }
    }

    /// A clock with a custom cadence (tests mostly)
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run ticks until the session leaves Running
    pub fn run(&self, session: &mut Session) {
        self.run_while(session, |_| true);
    }

    /// Run ticks until the session leaves Running or `keep_going` says stop
    ///
    /// `keep_going` is consulted between ticks; the driver uses it to bound
    /// demo runs and the UI could use it to interleave redraws. Each tick's
    /// processing time is deducted from the sleep, so the cadence tracks
    /// wall clock rather than drifting by the cost of the tick.
    pub fn run_while<F>(&self, session: &mut Session, mut keep_going: F)
    where
        F: FnMut(&Session) -> bool,
    {
        while session.phase() == SimPhase::Running && keep_going(session) {
            let tick_started = Instant::now();
            tick(session);

            // Re-arm only while still Running
            if session.phase() != SimPhase::Running {
                break;
            }
            let spent = tick_started.elapsed();
            if spent < self.interval {
                thread::sleep(self.interval - spent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PhysicsMode;

    fn running_session() -> Session {
        let mut s = Session::with_mode(PhysicsMode::Bounce, 5);
        s.select_content("/tmp/demo.sfc", "demo.sfc");
        s.start(Instant::now()).unwrap();
        s
    }

    #[test]
    fn test_no_ticks_outside_running() {
        let clock = Clock::with_interval(Duration::ZERO);
        let mut s = Session::with_mode(PhysicsMode::Bounce, 5);
        clock.run(&mut s);
        assert_eq!(s.tick_count(), 0);
    }

    #[test]
    fn test_stops_when_predicate_ends_the_run() {
        let clock = Clock::with_interval(Duration::ZERO);
        let mut s = running_session();
        clock.run_while(&mut s, |s| s.tick_count() < 50);
        assert_eq!(s.tick_count(), 50);
        assert_eq!(s.phase(), SimPhase::Running);
    }

    #[test]
    fn test_pause_cancels_future_ticks() {
        let clock = Clock::with_interval(Duration::ZERO);
        let mut s = running_session();
        clock.run_while(&mut s, |s| s.tick_count() < 10);
        assert_eq!(s.tick_count(), 10);

        // Leaving Running is the cancellation mechanism
        s.pause(Instant::now());
        clock.run(&mut s);
        assert_eq!(s.tick_count(), 10);
    }

    #[test]
    fn test_nominal_interval_is_sixteen_millis() {
        assert_eq!(Clock::new().interval(), Duration::from_millis(16));
    }
}
