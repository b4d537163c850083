//! Geometry and threshold policy.
//!
//! Pure functions from a drag offset (and, at release, a velocity sample) to
//! a [`SwipeOutcome`] and to the [`DerivedVisual`] a host renders. Nothing in
//! here holds interaction state.
//!
//! # Axis priority
//!
//! When a gesture breaches both the horizontal and the upward threshold, the
//! axis with the larger normalized magnitude (`|value| / threshold`, taking
//! the larger of the distance and velocity ratios) wins. Exact ties go to the
//! horizontal axis. Overlay badges use the same rule so that the badge shown
//! while dragging always names the outcome a release would produce.

use swipedeck_animation::Lerp;
use swipedeck_geometry::{Point, Size, Velocity};

use crate::config::SwipeConfig;
use crate::error::ConfigError;
use crate::types::{DerivedVisual, SwipeOutcome};

/// Absolute thresholds resolved against the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub distance_x: f32,
    pub distance_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl Thresholds {
    fn resolve(config: &SwipeConfig) -> Self {
        Self {
            distance_x: config.viewport.width * config.horizontal_threshold_fraction,
            distance_y: config.viewport.height * config.vertical_threshold_fraction,
            velocity_x: config.horizontal_velocity_threshold,
            velocity_y: config.vertical_velocity_threshold,
        }
    }
}

/// Normalized progress of each axis toward its threshold (1.0 = at threshold).
#[derive(Debug, Clone, Copy)]
struct AxisScores {
    horizontal: f32,
    /// Upward only; downward motion scores zero.
    vertical: f32,
}

impl AxisScores {
    fn horizontal_dominates(&self) -> bool {
        self.horizontal >= self.vertical
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipePolicy {
    config: SwipeConfig,
    thresholds: Thresholds,
}

impl SwipePolicy {
    pub fn new(config: SwipeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            thresholds: Thresholds::resolve(&config),
            config,
        })
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn viewport(&self) -> Size {
        self.config.viewport
    }

    /// Re-resolve thresholds for a new viewport. The policy is unchanged on error.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), ConfigError> {
        let config = self.config.with_viewport(viewport);
        config.validate()?;
        self.thresholds = Thresholds::resolve(&config);
        self.config = config;
        Ok(())
    }

    /// Classify a released gesture.
    ///
    /// A fast short flick classifies the same as a slow long drag: either the
    /// distance or the velocity may breach an axis threshold. Comparisons are
    /// strict, so an offset exactly on the threshold is `Cancelled`.
    pub fn classify(&self, offset: Point, velocity: Velocity) -> SwipeOutcome {
        let offset = offset.sanitized();
        let velocity = velocity.clamp_each_axis(self.config.max_release_velocity);
        let t = self.thresholds;

        let horizontal_breach = offset.x.abs() > t.distance_x || velocity.x.abs() > t.velocity_x;
        let vertical_breach = -offset.y > t.distance_y || -velocity.y > t.velocity_y;

        if !horizontal_breach && !vertical_breach {
            return SwipeOutcome::Cancelled;
        }
        if horizontal_breach
            && (!vertical_breach || self.release_scores(offset, velocity).horizontal_dominates())
        {
            return self.horizontal_outcome(offset, velocity);
        }
        SwipeOutcome::SuperLike
    }

    /// Render parameters for a card dragged to `offset`.
    pub fn derive_visual(&self, offset: Point) -> DerivedVisual {
        let offset = offset.sanitized();
        let width = self.config.viewport.width;
        let rotation_max = self.config.rotation_max_deg;

        let rotation_deg = (offset.x / width * rotation_max).clamp(-rotation_max, rotation_max);
        let scale = (1.0 - offset.x.abs() / width * self.config.scale_falloff)
            .clamp(self.config.min_scale, 1.0);

        let mut visual = DerivedVisual {
            offset,
            rotation_deg,
            scale,
            ..DerivedVisual::REST
        };
        if let Some((outcome, opacity)) = self.dominant_overlay(offset) {
            set_overlay(&mut visual, outcome, opacity);
        }
        visual
    }

    /// The single overlay that should be visible for `offset`, with its opacity.
    ///
    /// Each overlay ramps linearly from 0 at rest to 1 at its threshold.
    /// Returns `None` while every ramp is zero.
    pub fn dominant_overlay(&self, offset: Point) -> Option<(SwipeOutcome, f32)> {
        let offset = offset.sanitized();
        let scores = self.offset_scores(offset);
        let (outcome, score) = if scores.horizontal_dominates() {
            let outcome = if offset.x >= 0.0 {
                SwipeOutcome::Like
            } else {
                SwipeOutcome::Pass
            };
            (outcome, scores.horizontal)
        } else {
            (SwipeOutcome::SuperLike, scores.vertical)
        };

        let opacity = score.clamp(0.0, 1.0);
        (opacity > 0.0).then_some((outcome, opacity))
    }

    /// Where a committed card flies to, starting from `from`.
    ///
    /// Like and Pass leave sideways to `±exit_distance_factor × width`,
    /// keeping their vertical offset. SuperLike does not leave sideways: it
    /// goes up to `-exit_distance_factor × height`, keeping its horizontal
    /// offset, so the card leaves in the direction it was thrown.
    /// `Cancelled` returns home.
    pub fn exit_target(&self, outcome: SwipeOutcome, from: Point) -> Point {
        let factor = self.config.exit_distance_factor;
        let Size { width, height } = self.config.viewport;
        match outcome {
            SwipeOutcome::Like => Point::new(factor * width, from.y),
            SwipeOutcome::Pass => Point::new(-factor * width, from.y),
            SwipeOutcome::SuperLike => Point::new(from.x, -factor * height),
            SwipeOutcome::Cancelled => Point::ZERO,
        }
    }

    /// Visual of a committed card `fraction` of the way through its exit.
    ///
    /// `start` is the offset at the moment of commit. The card fades out,
    /// the committed outcome's overlay is fully shown, and sideways exits keep
    /// tilting toward the maximum rotation.
    pub fn exit_visual(&self, outcome: SwipeOutcome, start: Point, fraction: f32) -> DerivedVisual {
        let fraction = fraction.clamp(0.0, 1.0);
        let start = start.sanitized();
        let offset = start.lerp(&self.exit_target(outcome, start), fraction);
        let rotation_max = self.config.rotation_max_deg;

        let mut visual = self.derive_visual(offset);
        let start_rotation = self.derive_visual(start).rotation_deg;
        visual.rotation_deg = match outcome {
            SwipeOutcome::Like => Lerp::lerp(&start_rotation, &rotation_max, fraction),
            SwipeOutcome::Pass => Lerp::lerp(&start_rotation, &-rotation_max, fraction),
            SwipeOutcome::SuperLike | SwipeOutcome::Cancelled => visual.rotation_deg,
        };
        visual.opacity = 1.0 - fraction;
        visual.like_overlay_opacity = 0.0;
        visual.pass_overlay_opacity = 0.0;
        visual.super_like_overlay_opacity = 0.0;
        set_overlay(&mut visual, outcome, 1.0);
        visual
    }

    /// Scale of the card directly behind the active card.
    ///
    /// Grows from the configured peek scale to 1.0 as the active card's
    /// visible overlay ramps up, so the next card rises as the top one leaves.
    pub fn peek_scale(&self, active: &DerivedVisual) -> f32 {
        let progress = active
            .like_overlay_opacity
            .max(active.pass_overlay_opacity)
            .max(active.super_like_overlay_opacity)
            .clamp(0.0, 1.0);
        Lerp::lerp(&self.config.peek_scale, &1.0, progress)
    }

    /// Bound a raw drag offset to the configured multiple of the viewport width.
    pub fn clamp_drag(&self, offset: Point) -> Point {
        offset
            .sanitized()
            .clamp_each_axis(self.config.drag_clamp_factor * self.config.viewport.width)
    }

    pub fn clamp_velocity(&self, velocity: Velocity) -> Velocity {
        velocity.clamp_each_axis(self.config.max_release_velocity)
    }

    fn offset_scores(&self, offset: Point) -> AxisScores {
        let t = self.thresholds;
        AxisScores {
            horizontal: offset.x.abs() / t.distance_x,
            vertical: (-offset.y / t.distance_y).max(0.0),
        }
    }

    fn release_scores(&self, offset: Point, velocity: Velocity) -> AxisScores {
        let t = self.thresholds;
        let distance = self.offset_scores(offset);
        AxisScores {
            horizontal: distance.horizontal.max(velocity.x.abs() / t.velocity_x),
            vertical: distance.vertical.max(-velocity.y / t.velocity_y),
        }
    }

    /// Direction comes from whichever of distance or velocity is further past
    /// its threshold; distance wins ties.
    fn horizontal_outcome(&self, offset: Point, velocity: Velocity) -> SwipeOutcome {
        let t = self.thresholds;
        let distance_ratio = offset.x.abs() / t.distance_x;
        let velocity_ratio = velocity.x.abs() / t.velocity_x;
        let direction = if distance_ratio >= velocity_ratio {
            offset.x
        } else {
            velocity.x
        };
        if direction >= 0.0 {
            SwipeOutcome::Like
        } else {
            SwipeOutcome::Pass
        }
    }
}

fn set_overlay(visual: &mut DerivedVisual, outcome: SwipeOutcome, opacity: f32) {
    match outcome {
        SwipeOutcome::Like => visual.like_overlay_opacity = opacity,
        SwipeOutcome::Pass => visual.pass_overlay_opacity = opacity,
        SwipeOutcome::SuperLike => visual.super_like_overlay_opacity = opacity,
        SwipeOutcome::Cancelled => {}
    }
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod tests;
