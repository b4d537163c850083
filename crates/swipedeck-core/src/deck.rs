//! The swipe deck: a card stack with one controller per visible card.
//!
//! `SwipeDeck` routes host input to card controllers, samples their
//! animations once per frame and applies each resolution to the stack before
//! reporting it to the [`OutcomeHandler`]. Only the card at the front of the
//! stack is ever activated, so input delivered to any other card is dropped.

use std::collections::HashMap;

use smallvec::SmallVec;
use swipedeck_geometry::Size;

use crate::config::SwipeConfig;
use crate::controller::{CardController, Resolution};
use crate::error::ConfigError;
use crate::pointer::{EventResult, PointerEvent};
use crate::policy::SwipePolicy;
use crate::stack::CardStack;
use crate::types::{CardId, CardInteractionState, DerivedVisual, SwipeOutcome};

/// Receives each card's final decision, exactly once per card.
///
/// This is where a host persists likes and passes or triggers navigation.
/// The deck itself performs no I/O.
pub trait OutcomeHandler {
    fn on_resolved(&mut self, card: CardId, outcome: SwipeOutcome);
}

impl<F> OutcomeHandler for F
where
    F: FnMut(CardId, SwipeOutcome),
{
    fn on_resolved(&mut self, card: CardId, outcome: SwipeOutcome) {
        (self)(card, outcome)
    }
}

/// What to draw for one card this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardFrame {
    pub card: CardId,
    pub state: CardInteractionState,
    pub visual: DerivedVisual,
    /// Entrance animation progress in `[0, 1]`.
    pub entrance_progress: f32,
    /// 0 for the active card, 1 for the card right behind it, and so on.
    pub depth: usize,
    pub is_active: bool,
}

/// Render snapshot of the deck, front card first.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckFrame {
    pub cards: SmallVec<[CardFrame; 4]>,
    pub exhausted: bool,
    /// Whether another tick would change anything.
    pub animating: bool,
}

impl DeckFrame {
    pub fn active(&self) -> Option<&CardFrame> {
        self.cards.first().filter(|frame| frame.is_active)
    }
}

pub struct SwipeDeck<H: OutcomeHandler> {
    policy: SwipePolicy,
    stack: CardStack,
    controllers: HashMap<CardId, CardController>,
    handler: H,
}

impl<H: OutcomeHandler> SwipeDeck<H> {
    pub fn new(
        config: SwipeConfig,
        cards: impl IntoIterator<Item = CardId>,
        handler: H,
    ) -> Result<Self, ConfigError> {
        let policy = SwipePolicy::new(config)?;
        let mut deck = Self {
            policy,
            stack: CardStack::new(cards),
            controllers: HashMap::new(),
            handler,
        };
        log::debug!(
            "deck created with {} card(s), viewport {:?}",
            deck.stack.len(),
            deck.policy.viewport()
        );
        deck.sync_window();
        Ok(deck)
    }

    pub fn policy(&self) -> &SwipePolicy {
        &self.policy
    }

    pub fn stack(&self) -> &CardStack {
        &self.stack
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn active_card_id(&self) -> Option<CardId> {
        self.stack.active_card_id()
    }

    pub fn is_exhausted(&self) -> bool {
        self.stack.is_exhausted()
    }

    /// Interaction state of a visible card, `None` for cards outside the window.
    pub fn state_of(&self, card: CardId) -> Option<CardInteractionState> {
        self.controllers.get(&card).map(CardController::state)
    }

    pub fn controller(&self, card: CardId) -> Option<&CardController> {
        self.controllers.get(&card)
    }

    /// Deliver pointer input addressed to `card`.
    pub fn pointer_event(&mut self, card: CardId, event: PointerEvent) -> EventResult {
        match self.controllers.get_mut(&card) {
            Some(controller) => controller.on_pointer_event(&self.policy, event),
            None => EventResult::Ignored,
        }
    }

    /// Commit the active card without a gesture, e.g. from an action button.
    pub fn commit(&mut self, outcome: SwipeOutcome) -> EventResult {
        let Some(card) = self.stack.active_card_id() else {
            return EventResult::Ignored;
        };
        match self.controllers.get_mut(&card) {
            Some(controller) => controller.commit(&self.policy, outcome),
            None => EventResult::Ignored,
        }
    }

    /// Advance every visible card by `dt_nanos` and return what to draw.
    pub fn tick(&mut self, dt_nanos: u64) -> DeckFrame {
        let mut resolutions: SmallVec<[Resolution; 1]> = SmallVec::new();
        for card in self.window() {
            if let Some(controller) = self.controllers.get_mut(&card) {
                resolutions.extend(controller.tick(&self.policy, dt_nanos).resolution);
            }
        }
        for resolution in resolutions {
            self.apply_resolution(resolution);
        }
        self.frame()
    }

    /// Snapshot of the visible cards without advancing time.
    pub fn frame(&self) -> DeckFrame {
        let mut cards = SmallVec::new();
        let mut front_visual = DerivedVisual::REST;
        for (depth, card) in self.window().into_iter().enumerate() {
            let Some(controller) = self.controllers.get(&card) else {
                continue;
            };
            let mut visual = controller.visual();
            match depth {
                0 => front_visual = visual,
                1 => visual.scale = self.policy.peek_scale(&front_visual),
                _ => visual.scale = self.policy.config().peek_scale,
            }
            cards.push(CardFrame {
                card,
                state: controller.state(),
                visual,
                entrance_progress: controller.entrance_progress(),
                depth,
                is_active: controller.is_active(),
            });
        }
        DeckFrame {
            cards,
            exhausted: self.stack.is_exhausted(),
            animating: self.controllers.values().any(CardController::is_animating),
        }
    }

    /// Return a card to rest immediately, abandoning any drag or commit.
    pub fn cancel_card(&mut self, card: CardId) -> EventResult {
        match self.controllers.get_mut(&card) {
            Some(controller) => controller.cancel(),
            None => EventResult::Ignored,
        }
    }

    /// The host destroyed `card`'s view.
    ///
    /// A card caught mid-exit is resolved on the spot and its outcome
    /// returned; anything else snaps back to rest and stays in the stack.
    pub fn unmount_card(&mut self, card: CardId) -> Option<SwipeOutcome> {
        let resolution = self
            .controllers
            .get_mut(&card)
            .and_then(|controller| controller.interrupt(&self.policy))?;
        let outcome = resolution.outcome;
        self.apply_resolution(resolution);
        Some(outcome)
    }

    /// Append cards to the back of the stack. Returns how many were added.
    pub fn push_cards(&mut self, cards: impl IntoIterator<Item = CardId>) -> usize {
        let added = self.stack.extend(cards);
        self.sync_window();
        added
    }

    /// Resize the viewport thresholds are measured against.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), ConfigError> {
        self.policy.set_viewport(viewport)?;
        log::debug!("viewport set to {viewport:?}");
        Ok(())
    }

    /// Active card followed by the cards peeking behind it.
    fn window(&self) -> SmallVec<[CardId; 4]> {
        let behind = self.policy.config().visible_cards.saturating_sub(1);
        self.stack
            .active_card_id()
            .into_iter()
            .chain(self.stack.upcoming(behind).iter().copied())
            .collect()
    }

    /// Ensure every card in the window has a controller and the front one is active.
    fn sync_window(&mut self) {
        for card in self.window() {
            if !self.controllers.contains_key(&card) {
                self.controllers
                    .insert(card, CardController::new(card, &self.policy));
            }
        }
        if let (Some(card), Some(token)) = (self.stack.active_card_id(), self.stack.current_token())
        {
            if let Some(controller) = self.controllers.get_mut(&card) {
                controller.activate(token);
            }
        }
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        match self.stack.advance(resolution.token) {
            Ok(card) => {
                self.controllers.remove(&card);
                self.handler.on_resolved(card, resolution.outcome);
                self.sync_window();
            }
            Err(err) => {
                log::warn!(
                    "dropping {:?} for {}: {}",
                    resolution.outcome,
                    resolution.card,
                    err
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;
