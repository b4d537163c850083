//! Testing utilities and harness for SwipeDeck

pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use recording::RecordingHandler;
pub use robot::*;
pub use robot_assertions::{
    assert_approx_eq, assert_at_rest, assert_point_approx_eq, assert_single_overlay,
};

pub mod prelude {
    pub use crate::recording::RecordingHandler;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
