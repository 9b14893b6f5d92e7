//! Kinematic bodies
//!
//! A [`Body`] is an axis-aligned moving rectangle. Integration is per-tick
//! (displacement = velocity * speed multiplier, no dt), matching the fixed
//! 16 ms cadence of the clock. Boundary policies are applied after
//! integration, in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BODY_SIZE;

/// A moving axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per tick at 1.0x speed
    pub vel: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::splat(BODY_SIZE),
        }
    }

    /// A body with no velocity, moved only by discrete input events
    pub fn stationary(pos: Vec2) -> Self {
        Self::new(pos, Vec2::ZERO)
    }

    /// Accelerate downward. Applied before integration in gravity mode.
    pub fn apply_gravity(&mut self, gravity: f32, speed: f32) {
        self.vel.y += gravity * speed;
    }

    /// Advance one tick worth of movement
    pub fn integrate(&mut self, speed: f32) {
        self.pos += self.vel * speed;
    }

    /// Reflect off the vertical field edges
    ///
    /// Elastic: only the velocity flips; the position is left where
    /// integration put it and re-enters bounds on the following ticks.
    pub fn reflect_walls(&mut self, field_width: f32) {
        if self.pos.x < 0.0 || self.pos.x > field_width - self.size.x {
            self.vel.x = -self.vel.x;
        }
    }

    /// Bounce off the ground with energy loss
    ///
    /// Clamps the body onto the ground and inverts the damped vertical
    /// velocity (restitution 0.8 keeps 80% of the speed).
    pub fn bounce_ground(&mut self, ground_y: f32, restitution: f32) {
        if self.pos.y > ground_y - self.size.y {
            self.pos.y = ground_y - self.size.y;
            self.vel.y = -self.vel.y * restitution;
        }
    }

    /// Wrap past the right field edge back in from the left
    pub fn wrap_right(&mut self, field_width: f32) {
        if self.pos.x > field_width {
            self.pos.x = -self.size.x;
        }
    }

    /// Displace horizontally by a discrete step, clamped to the field
    pub fn nudge_x(&mut self, dx: f32, field_width: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, field_width - self.size.x);
    }

    /// Right edge (exclusive)
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge (exclusive)
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIELD_WIDTH, GROUND_Y, RESTITUTION};

    #[test]
    fn test_integrate_scales_with_speed() {
        let mut body = Body::new(Vec2::new(100.0, 50.0), Vec2::new(5.0, 0.0));
        body.integrate(2.0);
        assert_eq!(body.pos, Vec2::new(110.0, 50.0));
    }

    #[test]
    fn test_reflect_after_move_policy() {
        // vx=5 at x=510: the tick moves to 515 first, then the wall check
        // flips vx for the next tick. The position is not pre-clamped.
        let mut body = Body::new(Vec2::new(510.0, 100.0), Vec2::new(5.0, 0.0));
        body.integrate(1.0);
        body.reflect_walls(FIELD_WIDTH);
        assert_eq!(body.pos.x, 515.0);
        assert_eq!(body.vel.x, -5.0);
    }

    #[test]
    fn test_reflect_left_wall() {
        let mut body = Body::new(Vec2::new(2.0, 100.0), Vec2::new(-5.0, 0.0));
        body.integrate(1.0);
        body.reflect_walls(FIELD_WIDTH);
        assert_eq!(body.pos.x, -3.0);
        assert_eq!(body.vel.x, 5.0);
    }

    #[test]
    fn test_ground_bounce_damps_velocity() {
        let mut body = Body::new(Vec2::new(0.0, 185.0), Vec2::new(0.0, 10.0));
        body.integrate(1.0);
        body.bounce_ground(GROUND_Y, RESTITUTION);
        assert_eq!(body.pos.y, 180.0);
        assert!((body.vel.y - (-8.0)).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_right_reenters_left() {
        let mut body = Body::new(Vec2::new(511.0, 60.0), Vec2::new(2.0, 0.0));
        body.integrate(1.0);
        body.wrap_right(FIELD_WIDTH);
        assert_eq!(body.pos.x, -20.0);
    }

    #[test]
    fn test_nudge_clamps_to_field() {
        let mut body = Body::stationary(Vec2::new(5.0, 200.0));
        body.nudge_x(-10.0, FIELD_WIDTH);
        assert_eq!(body.pos.x, 0.0);

        let mut body = Body::stationary(Vec2::new(490.0, 200.0));
        body.nudge_x(10.0, FIELD_WIDTH);
        assert_eq!(body.pos.x, FIELD_WIDTH - BODY_SIZE);
    }
}
