//! Time-sampled animations with easing curves and spring physics.
//!
//! An [`Animatable`] holds a value and, optionally, an in-flight animation
//! toward a target. It never schedules itself: callers advance it with
//! [`Animatable::tick`], passing the time elapsed since the previous frame.

use swipedeck_geometry::Point;

use crate::NANOS_PER_MILLI;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            Lerp::lerp(&self.x, &target.x, fraction),
            Lerp::lerp(&self.y, &target.y, fraction),
        )
    }
}

/// Easing curves applied to linear time progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Ease in using cubic curve.
    EaseIn,
    /// Ease out using cubic curve.
    EaseOut,
    /// Ease in and out using cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Linear out, slow in. Used for entering elements.
    LinearOutSlowInEasing,
    /// Fast out, linear in. Used for elements leaving the screen.
    FastOutLinearEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let curve = match self {
            Easing::LinearEasing => return fraction.clamp(0.0, 1.0),
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowInEasing => CubicBezier::new(0.4, 0.0, 0.2, 1.0),
            Easing::LinearOutSlowInEasing => CubicBezier::new(0.0, 0.0, 0.2, 1.0),
            Easing::FastOutLinearEasing => CubicBezier::new(0.4, 0.0, 1.0, 1.0),
        };
        curve.sample(fraction)
    }
}

/// Polynomial coefficients of a unit cubic bezier through (0,0) and (1,1).
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x_at(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn y_at(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn dx_at(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    fn sample(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        self.y_at(self.solve_t(fraction))
    }

    /// Finds the curve parameter whose x equals `x`.
    ///
    /// Newton-Raphson first; bisection when the derivative flattens out.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let err = self.x_at(t) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let slope = self.dx_at(t);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..16 {
            let err = self.x_at(t) - x;
            if err.abs() < 1e-6 {
                break;
            }
            if err > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    fn duration_nanos(&self) -> u64 {
        (self.duration_millis * NANOS_PER_MILLI).max(1)
    }

    fn delay_nanos(&self) -> u64 {
        self.delay_millis * NANOS_PER_MILLI
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Progress velocity (fraction/sec) under which the spring may settle.
    pub velocity_threshold: f32,
    /// Progress distance from the target under which the spring may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Create a stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    /// Whether a spring with these parameters comes to rest.
    ///
    /// Stiffness and damping ratio must be finite and positive; the settle
    /// thresholds must be finite and positive.
    pub fn can_settle(&self) -> bool {
        [
            self.stiffness,
            self.damping_ratio,
            self.velocity_threshold,
            self.position_threshold,
        ]
        .iter()
        .all(|value| value.is_finite() && *value > 0.0)
    }

    /// Longest integration step that keeps this spring numerically stable.
    fn max_step_secs(&self) -> f32 {
        let natural = self.stiffness.sqrt();
        let damping = 2.0 * self.damping_ratio * natural;
        SPRING_TIMESTEP_SECS.min(0.5 / natural).min(1.0 / damping)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

impl From<AnimationSpec> for AnimationType {
    fn from(spec: AnimationSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}

/// Longest integration step for spring physics (~60fps).
const SPRING_TIMESTEP_SECS: f32 = 0.016;

/// Generic animatable value holder driven by explicit frame ticks.
#[derive(Debug, Clone)]
pub struct Animatable<T: Lerp + Clone> {
    current: T,
    start: T,
    target: T,
    animation_type: AnimationType,
    running: bool,
    elapsed_nanos: u64,
    /// Interpolation fraction between `start` and `target` after easing.
    fraction: f32,
    /// Spring velocity in fraction/sec.
    velocity: f32,
}

impl<T: Lerp + Clone> Animatable<T> {
    /// Create a new animatable at rest on `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            running: false,
            elapsed_nanos: 0,
            fraction: 1.0,
            velocity: 0.0,
        }
    }

    /// Animate from the current value to `target`.
    ///
    /// Any in-flight animation is replaced; the new one starts from wherever
    /// the value currently is.
    pub fn animate_to(&mut self, target: T, animation: impl Into<AnimationType>) {
        self.start = self.current.clone();
        self.target = target;
        self.animation_type = animation.into();
        self.running = true;
        self.elapsed_nanos = 0;
        self.fraction = 0.0;
        self.velocity = 0.0;
    }

    /// Snap immediately to `value`, stopping any animation.
    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.start = value.clone();
        self.target = value;
        self.running = false;
        self.elapsed_nanos = 0;
        self.fraction = 1.0;
        self.velocity = 0.0;
    }

    /// Stop animating and jump to the target.
    pub fn finish(&mut self) {
        let target = self.target.clone();
        self.snap_to(target);
    }

    pub fn value(&self) -> T {
        self.current.clone()
    }

    /// Return the current animation target.
    pub fn target(&self) -> T {
        self.target.clone()
    }

    /// Return the animation spec currently driving this animatable.
    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Interpolation fraction between the animation's start and target.
    ///
    /// `1.0` when at rest. Springs may overshoot past `1.0`.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Advance the animation by `dt_nanos`.
    ///
    /// Returns `true` only on the tick where the animation reaches its
    /// target. Ticking an idle animatable is a no-op returning `false`.
    pub fn tick(&mut self, dt_nanos: u64) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_nanos = self.elapsed_nanos.saturating_add(dt_nanos);

        let finished = match self.animation_type {
            AnimationType::Tween(spec) => self.step_tween(spec),
            AnimationType::Spring(spec) => self.step_spring(spec, dt_nanos),
        };

        if finished {
            self.finish();
        }
        finished
    }

    fn step_tween(&mut self, spec: AnimationSpec) -> bool {
        let delay = spec.delay_nanos();
        if self.elapsed_nanos < delay {
            return false;
        }
        let played = self.elapsed_nanos - delay;
        let linear = (played as f64 / spec.duration_nanos() as f64).clamp(0.0, 1.0) as f32;
        self.fraction = spec.easing.transform(linear);
        self.current = self.start.lerp(&self.target, self.fraction);
        linear >= 1.0
    }

    fn step_spring(&mut self, spec: SpringSpec, dt_nanos: u64) -> bool {
        let dt = dt_nanos as f32 / 1_000_000_000.0;
        if dt <= 0.0 {
            return false;
        }

        if !spec.can_settle() {
            return true;
        }

        // Damped harmonic oscillator on the normalized fraction, target at 1.0.
        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        // Semi-implicit Euler is stable while step * sqrt(k) and step * c stay small.
        let max_step = spec.max_step_secs();
        let mut simulated = 0.0f32;
        while simulated < dt {
            let step = max_step.min(dt - simulated);
            let displacement = self.fraction - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.fraction += self.velocity * step;
            simulated += step;
        }
        self.current = self
            .start
            .lerp(&self.target, self.fraction.clamp(0.0, 2.0));

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (1.0 - self.fraction).abs() < spec.position_threshold;
        at_rest && near_target
    }
}

impl<T: Lerp + Clone + Default> Default for Animatable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
