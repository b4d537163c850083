use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{CardId, OutcomeHandler, SwipeOutcome};

/// Outcome handler that records every resolution it receives.
///
/// Clones share one log, so a test can hand one clone to the deck and read
/// the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingHandler {
    log: Rc<RefCell<Vec<(CardId, SwipeOutcome)>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<(CardId, SwipeOutcome)> {
        self.log.borrow().clone()
    }

    pub fn outcomes(&self) -> Vec<SwipeOutcome> {
        self.log.borrow().iter().map(|(_, outcome)| *outcome).collect()
    }

    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }

    /// How many times `card` was reported.
    pub fn count_for(&self, card: CardId) -> usize {
        self.log.borrow().iter().filter(|(id, _)| *id == card).count()
    }
}

impl OutcomeHandler for RecordingHandler {
    fn on_resolved(&mut self, card: CardId, outcome: SwipeOutcome) {
        self.log.borrow_mut().push((card, outcome));
    }
}
