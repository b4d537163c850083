//! Tunable parameters for the swipe engine.

use swipedeck_animation::{AnimationSpec, Easing, SpringSpec};
use swipedeck_geometry::Size;

use crate::error::ConfigError;
use crate::gesture_constants::*;

/// Swipe engine configuration.
///
/// Start from [`SwipeConfig::new`] (or `default()`) and override with the
/// `with_*` builders. Values are checked by [`SwipeConfig::validate`], which
/// [`SwipePolicy::new`](crate::SwipePolicy::new) calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub viewport: Size,
    pub horizontal_threshold_fraction: f32,
    pub vertical_threshold_fraction: f32,
    pub horizontal_velocity_threshold: f32,
    pub vertical_velocity_threshold: f32,
    pub max_release_velocity: f32,
    pub rotation_max_deg: f32,
    pub scale_falloff: f32,
    pub min_scale: f32,
    pub drag_clamp_factor: f32,
    pub exit_distance_factor: f32,
    pub exit_animation: AnimationSpec,
    pub reset_animation: SpringSpec,
    pub entrance_animation: AnimationSpec,
    pub peek_scale: f32,
    pub reset_epsilon: f32,
    pub visible_cards: usize,
}

impl SwipeConfig {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            horizontal_threshold_fraction: HORIZONTAL_THRESHOLD_FRACTION,
            vertical_threshold_fraction: VERTICAL_THRESHOLD_FRACTION,
            horizontal_velocity_threshold: HORIZONTAL_VELOCITY_THRESHOLD,
            vertical_velocity_threshold: VERTICAL_VELOCITY_THRESHOLD,
            max_release_velocity: MAX_RELEASE_VELOCITY,
            rotation_max_deg: ROTATION_MAX_DEG,
            scale_falloff: SCALE_FALLOFF,
            min_scale: MIN_SCALE,
            drag_clamp_factor: DRAG_CLAMP_FACTOR,
            exit_distance_factor: EXIT_DISTANCE_FACTOR,
            exit_animation: AnimationSpec::tween(EXIT_DURATION_MILLIS, Easing::FastOutLinearEasing),
            reset_animation: SpringSpec::default_spring(),
            entrance_animation: AnimationSpec::tween(
                ENTRANCE_DURATION_MILLIS,
                Easing::LinearOutSlowInEasing,
            ),
            peek_scale: PEEK_SCALE,
            reset_epsilon: RESET_EPSILON,
            visible_cards: VISIBLE_CARDS,
        }
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set both distance thresholds as fractions of the viewport.
    pub fn with_distance_thresholds(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_threshold_fraction = horizontal;
        self.vertical_threshold_fraction = vertical;
        self
    }

    pub fn with_velocity_thresholds(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_velocity_threshold = horizontal;
        self.vertical_velocity_threshold = vertical;
        self
    }

    pub fn with_max_release_velocity(mut self, max: f32) -> Self {
        self.max_release_velocity = max;
        self
    }

    pub fn with_rotation_max(mut self, degrees: f32) -> Self {
        self.rotation_max_deg = degrees;
        self
    }

    pub fn with_exit_animation(mut self, spec: AnimationSpec) -> Self {
        self.exit_animation = spec;
        self
    }

    pub fn with_reset_animation(mut self, spec: SpringSpec) -> Self {
        self.reset_animation = spec;
        self
    }

    pub fn with_entrance_animation(mut self, spec: AnimationSpec) -> Self {
        self.entrance_animation = spec;
        self
    }

    pub fn with_peek_scale(mut self, scale: f32) -> Self {
        self.peek_scale = scale;
        self
    }

    /// Number of cards rendered per frame, the active card included.
    ///
    /// Values below 1 are raised to 1.
    pub fn with_visible_cards(mut self, count: usize) -> Self {
        if count == 0 {
            log::warn!("visible_cards must be at least 1; using 1");
        }
        self.visible_cards = count.max(1);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.viewport.is_valid() {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let positive = [
            (
                "horizontal_threshold_fraction",
                self.horizontal_threshold_fraction,
            ),
            (
                "vertical_threshold_fraction",
                self.vertical_threshold_fraction,
            ),
            (
                "horizontal_velocity_threshold",
                self.horizontal_velocity_threshold,
            ),
            (
                "vertical_velocity_threshold",
                self.vertical_velocity_threshold,
            ),
            ("max_release_velocity", self.max_release_velocity),
            ("drag_clamp_factor", self.drag_clamp_factor),
            ("exit_distance_factor", self.exit_distance_factor),
            ("reset_epsilon", self.reset_epsilon),
            ("reset_animation.stiffness", self.reset_animation.stiffness),
            (
                "reset_animation.damping_ratio",
                self.reset_animation.damping_ratio,
            ),
            (
                "reset_animation.velocity_threshold",
                self.reset_animation.velocity_threshold,
            ),
            (
                "reset_animation.position_threshold",
                self.reset_animation.position_threshold,
            ),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveThreshold { name, value });
            }
        }

        if !self.rotation_max_deg.is_finite() || self.rotation_max_deg < 0.0 {
            return Err(ConfigError::InvalidRange {
                name: "rotation_max_deg",
                min: -self.rotation_max_deg,
                max: self.rotation_max_deg,
            });
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0 && self.min_scale <= 1.0)
            || !self.scale_falloff.is_finite()
            || self.scale_falloff < 0.0
        {
            return Err(ConfigError::InvalidRange {
                name: "scale",
                min: self.min_scale,
                max: 1.0,
            });
        }
        if !(self.peek_scale.is_finite() && self.peek_scale > 0.0 && self.peek_scale <= 1.0) {
            return Err(ConfigError::InvalidRange {
                name: "peek_scale",
                min: self.peek_scale,
                max: 1.0,
            });
        }
        Ok(())
    }
}

impl Default for SwipeConfig {
    /// A 390x844 portrait phone viewport.
    fn default() -> Self {
        Self::new(Size::new(390.0, 844.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SwipeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_exit_duration_is_within_design_range() {
        let spec = SwipeConfig::default().exit_animation;
        assert!((250..=300).contains(&spec.duration_millis));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let config = SwipeConfig::new(Size::new(0.0, 800.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidViewport {
                width: 0.0,
                height: 800.0
            })
        );
    }

    #[test]
    fn negative_velocity_threshold_is_rejected() {
        let config = SwipeConfig::default().with_velocity_thresholds(-1.0, 500.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveThreshold {
                name: "horizontal_velocity_threshold",
                ..
            })
        ));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = SwipeConfig::default().with_distance_thresholds(0.25, f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_peek_scale_is_rejected() {
        let config = SwipeConfig::default().with_peek_scale(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                name: "peek_scale",
                ..
            })
        ));
    }

    #[test]
    fn stiff_reset_spring_is_accepted() {
        let config = SwipeConfig::default().with_reset_animation(SpringSpec::stiff());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn undamped_reset_spring_is_rejected() {
        let config = SwipeConfig::default().with_reset_animation(SpringSpec {
            damping_ratio: 0.0,
            ..SpringSpec::default_spring()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveThreshold {
                name: "reset_animation.damping_ratio",
                ..
            })
        ));
    }

    #[test]
    fn slack_reset_spring_is_rejected() {
        let config = SwipeConfig::default().with_reset_animation(SpringSpec {
            stiffness: 0.0,
            ..SpringSpec::default_spring()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveThreshold {
                name: "reset_animation.stiffness",
                ..
            })
        ));
    }

    #[test]
    fn visible_cards_never_drops_below_one() {
        assert_eq!(SwipeConfig::default().with_visible_cards(0).visible_cards, 1);
    }
}
