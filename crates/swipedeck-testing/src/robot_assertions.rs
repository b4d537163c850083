//! Assertion utilities for robot testing
//!
//! Float helpers for checking offsets and visuals that come out of eased
//! animations, where exact equality is only guaranteed at rest.

use swipedeck_core::DerivedVisual;
use swipedeck_geometry::Point;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a point is approximately equal to another.
pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that at most one overlay badge is visible.
pub fn assert_single_overlay(visual: &DerivedVisual, msg: &str) {
    let visible = [
        visual.like_overlay_opacity,
        visual.pass_overlay_opacity,
        visual.super_like_overlay_opacity,
    ]
    .iter()
    .filter(|opacity| **opacity > 0.0)
    .count();
    assert!(
        visible <= 1,
        "{}: {} overlays visible in {:?}",
        msg,
        visible,
        visual
    );
}

/// Assert that a visual is exactly the resting visual.
pub fn assert_at_rest(visual: &DerivedVisual, msg: &str) {
    assert_eq!(*visual, DerivedVisual::REST, "{}: card not at rest", msg);
}
