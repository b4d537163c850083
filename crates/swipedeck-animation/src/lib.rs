//! Animation primitives for SwipeDeck
//!
//! Animations here own no clock. Hosts sample them by calling
//! [`Animatable::tick`] once per frame with the elapsed frame time.

mod animation;

pub use animation::*;

/// Nanoseconds in one millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
