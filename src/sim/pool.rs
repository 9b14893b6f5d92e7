//! Obstacle pool management
//!
//! The pool owns every obstacle on the field. It keeps a bounded set of
//! drifting bodies topped up to capacity, consuming the ones the player
//! overlaps and spawning replacements at seeded-random positions so a
//! session replays identically from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BODY_SIZE, FIELD_HEIGHT, FIELD_WIDTH, OBSTACLE_VX, POOL_CAPACITY};
use crate::sim::body::Body;
use crate::sim::collision::aabb_overlap;

/// A pooled obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub body: Body,
    /// Cleared the tick the obstacle overlaps the player, swept the same tick
    pub alive: bool,
}

/// Bounded set of drifting obstacles
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
    next_id: u32,
}

impl ObstaclePool {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::with_capacity(POOL_CAPACITY),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Spawn a single obstacle at a random in-bounds position
    ///
    /// The position is not checked against the player; spawning on top of
    /// it is allowed and scores on the next tick.
    fn spawn_one(&mut self) {
        let x = self.rng.random_range(0..=(FIELD_WIDTH - BODY_SIZE) as i32) as f32;
        let y = self.rng.random_range(0..=(FIELD_HEIGHT - BODY_SIZE) as i32) as f32;

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            body: Body::new(Vec2::new(x, y), Vec2::new(OBSTACLE_VX, 0.0)),
            alive: true,
        });
    }

    /// Refill the pool to capacity, one obstacle at a time
    pub fn top_up(&mut self) {
        while self.obstacles.len() < POOL_CAPACITY {
            self.spawn_one();
        }
    }

    /// Drift every obstacle rightward, wrapping past the field edge
    pub fn drift(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.body.integrate(speed);
            obstacle.body.wrap_right(FIELD_WIDTH);
        }
    }

    /// Consume every obstacle overlapping the player
    ///
    /// Consumed obstacles are removed before this returns, so none is
    /// tested or scored twice in a tick. Returns the number consumed.
    pub fn consume_overlapping(&mut self, player: &Body) -> u64 {
        let mut consumed = 0;
        for obstacle in &mut self.obstacles {
            if obstacle.alive && aabb_overlap(player, &obstacle.body) {
                obstacle.alive = false;
                consumed += 1;
                log::debug!("obstacle {} consumed", obstacle.id);
            }
        }
        if consumed > 0 {
            self.obstacles.retain(|o| o.alive);
        }
        consumed
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Place an obstacle deliberately (tests only)
    #[cfg(test)]
    pub(crate) fn spawn_at(&mut self, pos: Vec2) {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            body: Body::new(pos, Vec2::new(OBSTACLE_VX, 0.0)),
            alive: true,
        });
    }
}
