//! Pure math/data for SwipeDeck
//!
//! This crate contains the geometric primitives shared by the animation
//! and interaction crates: drag offsets, velocity samples and viewport sizes.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Size, Velocity};
}
