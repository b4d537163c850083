//! Card interaction state machine.
//!
//! ```text
//!            pointer down (active only)
//!   Idle ───────────────────────────────▶ Dragging ──┐ pointer move
//!    ▲ ▲                                     │  ▲────┘
//!    │ │ settled            pointer up,      │
//!    │ └──────── Resetting ◀── Cancelled ────┤
//!    │                                       │ pointer up, Like/Pass/SuperLike
//!    │ commit(outcome)                       ▼
//!    └──────────────────────────────▶ Committing(outcome) ──▶ resolved
//! ```
//!
//! A gesture release and a programmatic [`CardController::commit`] both enter
//! `Committing` through the same private transition, so the exit animation
//! and the single [`Resolution`] are identical whichever way the card left.

use swipedeck_animation::Animatable;
use swipedeck_geometry::{Point, Velocity};

use crate::drag::DragSession;
use crate::pointer::{EventResult, PointerEvent, PointerEventKind};
use crate::policy::SwipePolicy;
use crate::types::{CardId, CardInteractionState, DerivedVisual, ResolutionToken, SwipeOutcome};

/// A committed card's final outcome, emitted once per card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub card: CardId,
    pub outcome: SwipeOutcome,
    pub token: ResolutionToken,
}

/// Result of advancing a card by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTick {
    pub state: CardInteractionState,
    pub visual: DerivedVisual,
    pub resolution: Option<Resolution>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Dragging,
    Committing { outcome: SwipeOutcome, start: Point },
    Resetting,
    Resolved { outcome: SwipeOutcome },
}

/// Owns one card's interaction lifecycle.
#[derive(Clone, Debug)]
pub struct CardController {
    card: CardId,
    /// Present once the stack has made this the active card.
    token: Option<ResolutionToken>,
    phase: Phase,
    drag: DragSession,
    offset: Point,
    /// Spring-back animation toward rest.
    reset: Animatable<Point>,
    /// Eased exit fraction, 0 at commit and 1 when off screen.
    exit: Animatable<f32>,
    entrance: Animatable<f32>,
    visual: DerivedVisual,
}

impl CardController {
    /// Create a controller for a card that just joined the visible stack.
    ///
    /// The card starts `Idle` and inert, and its entrance animation begins.
    pub fn new(card: CardId, policy: &SwipePolicy) -> Self {
        let mut entrance = Animatable::new(0.0f32);
        entrance.animate_to(1.0, policy.config().entrance_animation);
        Self {
            card,
            token: None,
            phase: Phase::Idle,
            drag: DragSession::new(),
            offset: Point::ZERO,
            reset: Animatable::new(Point::ZERO),
            exit: Animatable::new(0.0),
            entrance,
            visual: DerivedVisual::REST,
        }
    }

    /// Make this the active card. Its resolution will carry `token`.
    pub fn activate(&mut self, token: ResolutionToken) {
        if self.token.is_none() {
            log::debug!("{} active with resolution token {}", self.card, token);
        }
        self.token = Some(token);
    }

    pub fn card_id(&self) -> CardId {
        self.card
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<ResolutionToken> {
        self.token
    }

    pub fn state(&self) -> CardInteractionState {
        match self.phase {
            Phase::Idle => CardInteractionState::Idle,
            Phase::Dragging => CardInteractionState::Dragging,
            Phase::Committing { outcome, .. } | Phase::Resolved { outcome } => {
                CardInteractionState::Committing(outcome)
            }
            Phase::Resetting => CardInteractionState::Resetting,
        }
    }

    /// Whether the card's resolution has been emitted. Resolved cards are
    /// ready to be destroyed and ignore all further input.
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved { .. })
    }

    /// Current drag offset.
    ///
    /// A resolved card reports `Point::ZERO`; its last rendered position stays
    /// available through [`CardController::visual`].
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn visual(&self) -> DerivedVisual {
        self.visual
    }

    pub fn entrance_progress(&self) -> f32 {
        self.entrance.value()
    }

    /// Whether anything about this card will change on the next tick.
    pub fn is_animating(&self) -> bool {
        self.entrance.is_running()
            || matches!(self.phase, Phase::Committing { .. } | Phase::Resetting)
    }

    pub fn on_pointer_event(&mut self, policy: &SwipePolicy, event: PointerEvent) -> EventResult {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(policy, event.time_ms),
            PointerEventKind::Move => self.pointer_move(policy, event.offset, event.time_ms),
            PointerEventKind::Up => {
                self.pointer_up(policy, event.offset, event.velocity, event.time_ms)
            }
            PointerEventKind::Cancel => self.pointer_cancel(policy),
        }
    }

    pub fn pointer_down(&mut self, policy: &SwipePolicy, time_ms: i64) -> EventResult {
        if !self.is_active() || self.phase != Phase::Idle {
            return EventResult::Ignored;
        }
        self.drag.begin(time_ms);
        self.offset = Point::ZERO;
        self.visual = policy.derive_visual(self.offset);
        self.transition(Phase::Dragging);
        EventResult::Consumed
    }

    pub fn pointer_move(&mut self, policy: &SwipePolicy, offset: Point, time_ms: i64) -> EventResult {
        if self.phase != Phase::Dragging {
            return EventResult::Ignored;
        }
        self.offset = self.drag.update(policy, offset, time_ms);
        self.visual = policy.derive_visual(self.offset);
        log::trace!("{} drag {:?}", self.card, self.visual);
        EventResult::Consumed
    }

    /// Release the drag and classify it.
    ///
    /// `offset` is the final displacement reported with the release.
    pub fn pointer_up(
        &mut self,
        policy: &SwipePolicy,
        offset: Point,
        velocity: Option<Velocity>,
        time_ms: i64,
    ) -> EventResult {
        if self.phase != Phase::Dragging {
            return EventResult::Ignored;
        }
        self.drag.update(policy, offset, time_ms);
        let release = self.drag.release(policy, velocity);
        self.offset = release.offset;

        let outcome = policy.classify(release.offset, release.velocity);
        log::debug!(
            "{} released at {:?} with {:?}: {:?}",
            self.card,
            release.offset,
            release.velocity,
            outcome
        );
        if outcome.is_commit() {
            self.begin_commit(policy, outcome);
        } else {
            self.begin_reset(policy);
        }
        EventResult::Consumed
    }

    /// The platform cancelled the pointer: spring back without committing.
    pub fn pointer_cancel(&mut self, policy: &SwipePolicy) -> EventResult {
        if self.phase != Phase::Dragging {
            return EventResult::Ignored;
        }
        self.drag.end();
        self.begin_reset(policy);
        EventResult::Consumed
    }

    /// Programmatic commit, e.g. from a Like button.
    ///
    /// Only an active, idle card accepts it, and `Cancelled` is not a
    /// commit. A second call while the first is still animating is ignored.
    pub fn commit(&mut self, policy: &SwipePolicy, outcome: SwipeOutcome) -> EventResult {
        if !outcome.is_commit() || !self.is_active() || self.phase != Phase::Idle {
            return EventResult::Ignored;
        }
        self.begin_commit(policy, outcome);
        EventResult::Consumed
    }

    /// Advance animations by `dt_nanos`.
    ///
    /// The tick on which the exit animation completes carries the card's
    /// [`Resolution`]; no other tick ever does.
    pub fn tick(&mut self, policy: &SwipePolicy, dt_nanos: u64) -> CardTick {
        self.entrance.tick(dt_nanos);

        let mut resolution = None;
        match self.phase {
            Phase::Idle | Phase::Dragging | Phase::Resolved { .. } => {}
            Phase::Resetting => {
                let settled = self.reset.tick(dt_nanos);
                self.offset = self.reset.value();
                if settled || self.offset.length() <= policy.config().reset_epsilon {
                    self.finish_reset();
                } else {
                    self.visual = policy.derive_visual(self.offset);
                }
            }
            Phase::Committing { outcome, start } => {
                let finished = self.exit.tick(dt_nanos);
                self.visual = policy.exit_visual(outcome, start, self.exit.value());
                self.offset = self.visual.offset;
                if finished {
                    resolution = self.resolve();
                }
            }
        }

        CardTick {
            state: self.state(),
            visual: self.visual,
            resolution,
        }
    }

    /// External reset to idle, e.g. the card was filtered out upstream.
    ///
    /// Snaps the offset to rest immediately. A commit that has not completed
    /// yet is abandoned and will never resolve. Idle and resolved cards are
    /// unaffected.
    pub fn cancel(&mut self) -> EventResult {
        match self.phase {
            Phase::Idle | Phase::Resolved { .. } => EventResult::Ignored,
            Phase::Dragging | Phase::Committing { .. } | Phase::Resetting => {
                self.drag.end();
                self.exit.snap_to(0.0);
                self.snap_home();
                self.transition(Phase::Idle);
                EventResult::Consumed
            }
        }
    }

    /// The host tore the card down mid-interaction.
    ///
    /// A committing card resolves now with its outcome, so the stack never
    /// loses count of resolved cards. Any other card snaps back to rest and
    /// produces nothing.
    pub fn interrupt(&mut self, policy: &SwipePolicy) -> Option<Resolution> {
        match self.phase {
            Phase::Committing { outcome, start } => {
                log::debug!("{} interrupted while committing; forcing resolution", self.card);
                self.exit.finish();
                self.visual = policy.exit_visual(outcome, start, 1.0);
                self.offset = self.visual.offset;
                self.resolve()
            }
            _ => {
                self.cancel();
                None
            }
        }
    }

    fn begin_commit(&mut self, policy: &SwipePolicy, outcome: SwipeOutcome) {
        let start = self.offset;
        self.exit.snap_to(0.0);
        self.exit.animate_to(1.0, policy.config().exit_animation);
        self.visual = policy.exit_visual(outcome, start, 0.0);
        self.transition(Phase::Committing { outcome, start });
    }

    fn begin_reset(&mut self, policy: &SwipePolicy) {
        self.reset.snap_to(self.offset);
        self.reset
            .animate_to(Point::ZERO, policy.config().reset_animation);
        self.visual = policy.derive_visual(self.offset);
        self.transition(Phase::Resetting);
    }

    fn finish_reset(&mut self) {
        self.snap_home();
        self.transition(Phase::Idle);
    }

    /// Force the offset to exactly `(0, 0)` so nothing leaks into the next drag.
    fn snap_home(&mut self) {
        self.reset.snap_to(Point::ZERO);
        self.offset = Point::ZERO;
        self.visual = DerivedVisual::REST;
    }

    fn resolve(&mut self) -> Option<Resolution> {
        let Phase::Committing { outcome, .. } = self.phase else {
            return None;
        };
        let token = self.token?;
        self.transition(Phase::Resolved { outcome });
        // The exit position lives on in `visual`; the drag itself is over.
        self.offset = Point::ZERO;
        Some(Resolution {
            card: self.card,
            outcome,
            token,
        })
    }

    fn transition(&mut self, next: Phase) {
        log::debug!("{} {:?} -> {:?}", self.card, self.phase, next);
        self.phase = next;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
