//! Swipe-card interaction engine
//!
//! Converts continuous pointer input on a stack of cards into classified
//! decisions. The pieces, bottom up:
//!
//! - [`SwipePolicy`]: pure threshold classification and derived visuals.
//! - [`DragSession`]: offset and velocity bookkeeping for one drag.
//! - [`CardController`]: one card's idle/dragging/committing/resetting
//!   state machine and its exit, reset and entrance animations.
//! - [`CardStack`]: card order and the single active card.
//! - [`SwipeDeck`]: wires the above together and reports each decision to
//!   an [`OutcomeHandler`].
//!
//! Nothing here owns a clock or a thread. Hosts forward pointer events and
//! call [`SwipeDeck::tick`] once per frame.

pub mod config;
pub mod controller;
pub mod deck;
pub mod drag;
pub mod error;
pub mod gesture_constants;
pub mod pointer;
pub mod policy;
pub mod stack;
pub mod types;
pub mod velocity_tracker;

pub use config::SwipeConfig;
pub use controller::{CardController, CardTick, Resolution};
pub use deck::{CardFrame, DeckFrame, OutcomeHandler, SwipeDeck};
pub use drag::{DragRelease, DragSession};
pub use error::{AdvanceError, ConfigError};
pub use pointer::{EventResult, PointerEvent, PointerEventKind};
pub use policy::{SwipePolicy, Thresholds};
pub use stack::CardStack;
pub use types::{CardId, CardInteractionState, DerivedVisual, ResolutionToken, SwipeOutcome};
pub use velocity_tracker::VelocityTracker;

pub use swipedeck_animation::{AnimationSpec, Easing, SpringSpec};
pub use swipedeck_geometry::{Point, Size, Velocity};

pub mod prelude {
    pub use crate::config::SwipeConfig;
    pub use crate::deck::{CardFrame, DeckFrame, OutcomeHandler, SwipeDeck};
    pub use crate::pointer::{EventResult, PointerEvent};
    pub use crate::types::{CardId, CardInteractionState, DerivedVisual, SwipeOutcome};
    pub use swipedeck_geometry::prelude::*;
}
