use swipedeck_geometry::Point;

/// Stable identifier of a card in a stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u64);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Tag attached to a commit so the stack applies each resolution once.
///
/// Tokens are the sequence number of the resolution within a stack, so they
/// grow monotonically as cards resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolutionToken(pub u64);

impl std::fmt::Display for ResolutionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classified result of a swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeOutcome {
    Like,
    Pass,
    SuperLike,
    Cancelled,
}

impl SwipeOutcome {
    /// Whether this outcome locks in a decision (anything but `Cancelled`).
    pub fn is_commit(&self) -> bool {
        !matches!(self, SwipeOutcome::Cancelled)
    }
}

/// Interaction state of a single card, as seen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardInteractionState {
    Idle,
    Dragging,
    Committing(SwipeOutcome),
    Resetting,
}

impl CardInteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, CardInteractionState::Idle)
    }
}

/// Render parameters derived from a card's offset.
///
/// Recomputed every frame; never stored as authoritative state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedVisual {
    /// Translation to apply to the card.
    pub offset: Point,
    pub rotation_deg: f32,
    pub scale: f32,
    /// Whole-card alpha. Only drops below 1 while a committed card exits.
    pub opacity: f32,
    pub like_overlay_opacity: f32,
    pub pass_overlay_opacity: f32,
    pub super_like_overlay_opacity: f32,
}

impl DerivedVisual {
    /// The visual of a card at rest.
    pub const REST: DerivedVisual = DerivedVisual {
        offset: Point::ZERO,
        rotation_deg: 0.0,
        scale: 1.0,
        opacity: 1.0,
        like_overlay_opacity: 0.0,
        pass_overlay_opacity: 0.0,
        super_like_overlay_opacity: 0.0,
    };

    /// Returns the overlay that is currently visible, if any.
    pub fn visible_overlay(&self) -> Option<SwipeOutcome> {
        if self.like_overlay_opacity > 0.0 {
            Some(SwipeOutcome::Like)
        } else if self.pass_overlay_opacity > 0.0 {
            Some(SwipeOutcome::Pass)
        } else if self.super_like_overlay_opacity > 0.0 {
            Some(SwipeOutcome::SuperLike)
        } else {
            None
        }
    }
}

impl Default for DerivedVisual {
    fn default() -> Self {
        Self::REST
    }
}
