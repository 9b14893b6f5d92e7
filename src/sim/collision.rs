//! AABB collision detection
//!
//! Everything on the play field is an axis-aligned rectangle, so overlap
//! testing is the four-comparison AABB check. Comparisons are strict:
//! rectangles that merely touch along an edge do not collide.

use crate::sim::body::Body;

/// Strict AABB overlap test
///
/// Half-open semantics: a shared edge (`a.max_x() == b.pos.x`) is not an
/// overlap. Symmetric in its arguments.
#[inline]
pub fn aabb_overlap(a: &Body, b: &Body) -> bool {
    a.pos.x < b.max_x()
        && a.max_x() > b.pos.x
        && a.pos.y < b.max_y()
        && a.max_y() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::stationary(Vec2::new(x, y))
    }

    #[test]
    fn test_overlap_basic() {
        let a = body_at(10.0, 10.0);
        let b = body_at(15.0, 15.0);
        assert!(aabb_overlap(&a, &b));
    }

    #[test]
    fn test_touching_edge_does_not_collide() {
        // a spans x in [10, 30); b starting exactly at 30 only touches
        let a = body_at(10.0, 10.0);
        let b = body_at(30.0, 10.0);
        assert!(!aabb_overlap(&a, &b));

        // any positive overlap collides
        let c = body_at(29.999, 10.0);
        assert!(aabb_overlap(&a, &c));
    }

    #[test]
    fn test_touching_corner_does_not_collide() {
        let a = body_at(10.0, 10.0);
        let b = body_at(30.0, 30.0);
        assert!(!aabb_overlap(&a, &b));
    }

    #[test]
    fn test_containment_collides() {
        let a = body_at(10.0, 10.0);
        let b = body_at(10.0, 10.0);
        assert!(aabb_overlap(&a, &b));
    }

    #[test]
    fn test_vertical_separation() {
        let a = body_at(10.0, 10.0);
        let b = body_at(10.0, 31.0);
        assert!(!aabb_overlap(&a, &b));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -50.0f32..550.0, ay in -50.0f32..300.0,
            bx in -50.0f32..550.0, by in -50.0f32..300.0,
        ) {
            let a = body_at(ax, ay);
            let b = body_at(bx, by);
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }

        #[test]
        fn prop_separated_on_x_never_overlaps(
            ax in 0.0f32..200.0, ay in 0.0f32..200.0,
            gap in 0.0f32..100.0, by in 0.0f32..200.0,
        ) {
            let a = body_at(ax, ay);
            let b = body_at(ax + a.size.x + gap, by);
            prop_assert!(!aabb_overlap(&a, &b));
        }

        #[test]
        fn prop_overlap_iff_both_axes_overlap(
            ax in 0i32..500, ay in 0i32..220,
            bx in 0i32..500, by in 0i32..220,
        ) {
            // Whole-pixel lattice, the same grid spawns land on
            let a = body_at(ax as f32, ay as f32);
            let b = body_at(bx as f32, by as f32);
            let x_overlap = (ax - bx).abs() < 20;
            let y_overlap = (ay - by).abs() < 20;
            prop_assert_eq!(aabb_overlap(&a, &b), x_overlap && y_overlap);
        }
    }
}
