//! Deterministic simulation module
//!
//! The whole animation core lives here. The module is single-threaded and
//! deterministic:
//! - Fixed 16 ms tick, run to completion before the next is scheduled
//! - Seeded RNG only (obstacle spawns replay from the session seed)
//! - No rendering or platform dependencies; the UI pulls snapshots

pub mod body;
pub mod clock;
pub mod collision;
pub mod pool;
pub mod state;
pub mod tick;

pub use body::Body;
pub use clock::Clock;
pub use collision::aabb_overlap;
pub use pool::{Obstacle, ObstaclePool};
pub use state::{
    ContentInfo, ControlError, DisplayRect, PanelSnapshot, PhysicsMode, PhysicsParams, RunStats,
    Session, SimPhase, Speed,
};
pub use tick::tick;
