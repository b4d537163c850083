//! Drag session: the continuous state of one pointer interaction.

use swipedeck_geometry::{Point, Velocity};

use crate::policy::SwipePolicy;
use crate::velocity_tracker::VelocityTracker;

/// Offset and velocity bookkeeping between pointer-down and pointer-up.
///
/// The session starts every drag at `(0, 0)` and hands back the final offset
/// plus a single velocity sample on release.
#[derive(Clone, Debug, Default)]
pub struct DragSession {
    offset: Point,
    tracker: VelocityTracker,
    active: bool,
}

/// Final state of a drag handed to classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRelease {
    pub offset: Point,
    pub velocity: Velocity,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, time_ms: i64) {
        self.offset = Point::ZERO;
        self.tracker.reset();
        self.tracker.add_position(time_ms, Point::ZERO);
        self.active = true;
    }

    /// Record the pointer's displacement from drag start. Returns the clamped offset.
    pub fn update(&mut self, policy: &SwipePolicy, offset: Point, time_ms: i64) -> Point {
        if !self.active {
            return self.offset;
        }
        self.offset = policy.clamp_drag(offset);
        self.tracker.add_position(time_ms, self.offset);
        self.offset
    }

    /// End the session.
    ///
    /// The release velocity is the host's sample when given, otherwise the
    /// tracker's estimate; either way it is capped by the policy.
    pub fn release(
        &mut self,
        policy: &SwipePolicy,
        explicit_velocity: Option<Velocity>,
    ) -> DragRelease {
        let max = policy.config().max_release_velocity;
        let velocity = match explicit_velocity {
            Some(velocity) => policy.clamp_velocity(velocity),
            None => self.tracker.velocity(max),
        };
        let release = DragRelease {
            offset: self.offset,
            velocity,
        };
        self.end();
        release
    }

    /// Abandon the session without producing a release.
    pub fn end(&mut self) {
        self.active = false;
        self.offset = Point::ZERO;
        self.tracker.reset();
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
