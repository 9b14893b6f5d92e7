//! Fixed-tick simulation advance
//!
//! One call = one simulation step. The clock invokes this at the nominal
//! 16 ms cadence while the session is Running; the speed multiplier scales
//! displacement, never the cadence. Each step runs to completion before
//! the next is scheduled, so no locking is needed anywhere in here.

use crate::consts::{FIELD_WIDTH, GROUND_Y};
use crate::sim::state::{PhysicsMode, Session, SimPhase};

/// Advance the session by one tick
///
/// Gated on the phase: outside Running this is a no-op, which is also the
/// cancellation mechanism for the clock (see [`Clock`](crate::sim::clock::Clock)).
pub fn tick(session: &mut Session) {
    if session.phase != SimPhase::Running {
        return;
    }

    let params = session.params();
    let speed = params.speed_multiplier;
    session.tick_count += 1;

    match session.mode {
        PhysicsMode::Bounce => {
            if let Some(rect) = &mut session.player {
                rect.integrate(speed);
                rect.reflect_walls(FIELD_WIDTH);
            }
        }

        PhysicsMode::GravityBounce => {
            if let Some(rect) = &mut session.player {
                rect.apply_gravity(params.gravity, speed);
                rect.integrate(speed);
                rect.reflect_walls(FIELD_WIDTH);
                rect.bounce_ground(GROUND_Y, params.restitution);
            }
        }

        PhysicsMode::ObstacleRun => {
            session.pool.drift(speed);
            if let Some(player) = &session.player {
                let consumed = session.pool.consume_overlapping(player);
                if consumed > 0 {
                    session.stats.add_score(consumed);
                    log::debug!(
                        "tick {}: +{} score (total {})",
                        session.tick_count,
                        consumed,
                        session.stats.score()
                    );
                }
            }
            session.pool.top_up();
        }
    }
}
