//! Shared gesture constants for card swiping.
//!
//! Distance thresholds are fractions of the viewport so the same physical
//! gesture classifies identically on phones and tablets. Velocities are in
//! logical pixels per second.

/// Fraction of the viewport width a card must travel horizontally to commit
/// a like or pass.
pub const HORIZONTAL_THRESHOLD_FRACTION: f32 = 0.25;

/// Fraction of the viewport height a card must travel upward to commit a
/// super like.
pub const VERTICAL_THRESHOLD_FRACTION: f32 = 0.25;

/// Release velocity above which a short horizontal flick still commits.
pub const HORIZONTAL_VELOCITY_THRESHOLD: f32 = 500.0;

/// Upward release velocity above which a short vertical flick still commits.
pub const VERTICAL_VELOCITY_THRESHOLD: f32 = 500.0;

/// Maximum release velocity in logical pixels per second.
///
/// Matches the fling cap used for scroll containers. Larger samples are
/// clamped before classification.
pub const MAX_RELEASE_VELOCITY: f32 = 8_000.0;

/// Card tilt in degrees when dragged a full viewport width.
pub const ROTATION_MAX_DEG: f32 = 10.0;

/// Scale lost per viewport width of horizontal travel.
pub const SCALE_FALLOFF: f32 = 0.2;

/// Smallest scale a dragged card shrinks to.
pub const MIN_SCALE: f32 = 0.8;

/// Drag offsets are clamped to this many viewport widths on each axis.
pub const DRAG_CLAMP_FACTOR: f32 = 2.0;

/// Exit animations travel this many viewport widths (or heights) away.
pub const EXIT_DISTANCE_FACTOR: f32 = 1.5;

pub const EXIT_DURATION_MILLIS: u64 = 300;

pub const ENTRANCE_DURATION_MILLIS: u64 = 200;

/// Resting scale of the card directly behind the active one.
pub const PEEK_SCALE: f32 = 0.95;

/// A resetting card closer than this to rest (in logical pixels) snaps home.
pub const RESET_EPSILON: f32 = 0.5;

/// Number of cards rendered at once: the active card plus those peeking behind.
pub const VISIBLE_CARDS: usize = 2;
