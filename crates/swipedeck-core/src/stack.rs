//! Stack coordination: card order and the single active card.

use std::collections::HashSet;

use crate::error::AdvanceError;
use crate::types::{CardId, ResolutionToken};

/// Ordered cards plus the index of the front-most unresolved one.
///
/// `active_index` only moves forward, one step per accepted
/// [`advance`](CardStack::advance). The token expected by `advance` is the
/// active index itself, so a resolution can only be applied while its card
/// is still the active one.
#[derive(Debug, Clone, Default)]
pub struct CardStack {
    cards: Vec<CardId>,
    known: HashSet<CardId>,
    active_index: usize,
}

impl CardStack {
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        let mut stack = Self::default();
        stack.extend(cards);
        stack
    }

    /// Append a card behind the existing ones.
    ///
    /// Returns `false` and leaves the stack unchanged if the id is already
    /// present.
    pub fn push(&mut self, card: CardId) -> bool {
        if !self.known.insert(card) {
            log::warn!("{card} is already in the stack; ignoring duplicate");
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Append several cards. Returns how many were added.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = CardId>) -> usize {
        cards.into_iter().filter(|card| self.push(*card)).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_card_id(&self) -> Option<CardId> {
        self.cards.get(self.active_index).copied()
    }

    pub fn is_exhausted(&self) -> bool {
        self.active_index >= self.cards.len()
    }

    /// Unresolved cards, the active one included.
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.active_index)
    }

    /// Up to `n` cards waiting behind the active card, nearest first.
    pub fn upcoming(&self, n: usize) -> &[CardId] {
        let start = (self.active_index + 1).min(self.cards.len());
        let end = start.saturating_add(n).min(self.cards.len());
        &self.cards[start..end]
    }

    /// Token the active card's resolution must carry, or `None` once exhausted.
    pub fn current_token(&self) -> Option<ResolutionToken> {
        (!self.is_exhausted()).then_some(ResolutionToken(self.active_index as u64))
    }

    /// Apply the active card's resolution and move to the next card.
    ///
    /// Returns the card that was resolved.
    pub fn advance(&mut self, token: ResolutionToken) -> Result<CardId, AdvanceError> {
        let Some(expected) = self.current_token() else {
            return Err(AdvanceError::Exhausted);
        };
        if token < expected {
            return Err(AdvanceError::StaleToken { token, expected });
        }
        if token > expected {
            return Err(AdvanceError::OutOfOrder { token, expected });
        }

        let resolved = self.cards[self.active_index];
        self.active_index += 1;
        log::info!(
            "{resolved} resolved; {} card(s) remaining",
            self.remaining()
        );
        Ok(resolved)
    }
}
