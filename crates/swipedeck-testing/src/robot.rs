//! Robot testing framework for scripted deck sessions
//!
//! `DeckRobot` drives a [`SwipeDeck`] the way a user and a 60 Hz display
//! would: pointer events go to the active card and every step of a drag is
//! followed by a frame.
//!
//! # Example
//!
//! ```
//! use swipedeck_core::{CardId, SwipeConfig, SwipeDeck, SwipeOutcome};
//! use swipedeck_testing::{DeckRobot, RecordingHandler};
//!
//! let handler = RecordingHandler::new();
//! let deck = SwipeDeck::new(SwipeConfig::default(), [CardId(1)], handler.clone()).unwrap();
//! let mut robot = DeckRobot::new(deck);
//!
//! robot.swipe(SwipeOutcome::Like);
//!
//! assert_eq!(handler.outcomes(), vec![SwipeOutcome::Like]);
//! ```

use swipedeck_core::{
    CardId, DeckFrame, EventResult, OutcomeHandler, PointerEvent, SwipeDeck, SwipeOutcome,
};
use swipedeck_geometry::{Point, Velocity};

/// One frame at 60 FPS.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound on frames pumped by [`DeckRobot::run_until_idle`].
pub const MAX_IDLE_FRAMES: usize = 600;

/// How far past the distance threshold [`DeckRobot::swipe`] drags.
const SWIPE_OVERSHOOT: f32 = 1.2;

const DRAG_STEPS: usize = 8;

pub struct DeckRobot<H: OutcomeHandler> {
    deck: SwipeDeck<H>,
    clock_nanos: u64,
    frame: DeckFrame,
    /// Card and offset of the pointer currently held down.
    pointer: Option<(CardId, Point)>,
}

impl<H: OutcomeHandler> DeckRobot<H> {
    pub fn new(deck: SwipeDeck<H>) -> Self {
        let frame = deck.frame();
        Self {
            deck,
            clock_nanos: 0,
            frame,
            pointer: None,
        }
    }

    pub fn deck(&self) -> &SwipeDeck<H> {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut SwipeDeck<H> {
        &mut self.deck
    }

    pub fn into_deck(self) -> SwipeDeck<H> {
        self.deck
    }

    /// The frame produced by the most recent tick.
    pub fn last_frame(&self) -> &DeckFrame {
        &self.frame
    }

    /// Simulated time in milliseconds, used to stamp pointer events.
    pub fn now_ms(&self) -> i64 {
        (self.clock_nanos / 1_000_000) as i64
    }

    pub fn advance_frame(&mut self) -> &DeckFrame {
        self.clock_nanos += FRAME_NANOS;
        self.frame = self.deck.tick(FRAME_NANOS);
        &self.frame
    }

    /// Advance frame time by at least `nanos`, one frame at a time.
    pub fn advance_time(&mut self, nanos: u64) {
        let frames = nanos.div_ceil(FRAME_NANOS);
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Pump frames until nothing is animating. Returns the number of frames.
    ///
    /// Panics if the deck is still animating after [`MAX_IDLE_FRAMES`].
    pub fn run_until_idle(&mut self) -> usize {
        for frames in 0..MAX_IDLE_FRAMES {
            if !self.deck.frame().animating {
                return frames;
            }
            self.advance_frame();
        }
        panic!("deck still animating after {MAX_IDLE_FRAMES} frames");
    }

    /// Put a pointer down on the active card.
    pub fn press(&mut self) -> EventResult {
        match self.deck.active_card_id() {
            Some(card) => self.press_card(card),
            None => EventResult::Ignored,
        }
    }

    /// Put a pointer down on a specific card, active or not.
    pub fn press_card(&mut self, card: CardId) -> EventResult {
        self.pointer = Some((card, Point::ZERO));
        let now = self.now_ms();
        self.deck.pointer_event(card, PointerEvent::down(now))
    }

    /// Move the held pointer to `offset` in `steps` frames.
    pub fn drag_to(&mut self, offset: Point, steps: usize) {
        let Some((card, start)) = self.pointer else {
            return;
        };
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            let position = Point::new(
                start.x + (offset.x - start.x) * fraction,
                start.y + (offset.y - start.y) * fraction,
            );
            self.advance_frame();
            let now = self.now_ms();
            self.deck
                .pointer_event(card, PointerEvent::moved(position, now));
            self.pointer = Some((card, position));
        }
    }

    /// Lift the pointer and let the engine estimate the release velocity.
    pub fn release(&mut self) -> EventResult {
        let Some((card, offset)) = self.pointer.take() else {
            return EventResult::Ignored;
        };
        let now = self.now_ms();
        self.deck.pointer_event(card, PointerEvent::up(offset, now))
    }

    /// Lift the pointer reporting the platform's velocity sample.
    pub fn release_with_velocity(&mut self, velocity: Velocity) -> EventResult {
        let Some((card, offset)) = self.pointer.take() else {
            return EventResult::Ignored;
        };
        let now = self.now_ms();
        self.deck
            .pointer_event(card, PointerEvent::up_with_velocity(offset, velocity, now))
    }

    /// The platform took the held pointer away.
    pub fn cancel_pointer(&mut self) -> EventResult {
        let Some((card, _)) = self.pointer.take() else {
            return EventResult::Ignored;
        };
        let now = self.now_ms();
        self.deck.pointer_event(card, PointerEvent::cancel(now))
    }

    /// Slow drag to `offset` and release with zero velocity.
    pub fn drag(&mut self, offset: Point) -> EventResult {
        self.press();
        self.drag_to(offset, DRAG_STEPS);
        self.release_with_velocity(Velocity::ZERO)
    }

    /// Short drag to `offset` released at `velocity`.
    pub fn flick(&mut self, offset: Point, velocity: Velocity) -> EventResult {
        self.press();
        self.drag_to(offset, 2);
        self.release_with_velocity(velocity)
    }

    /// Drag the active card past the threshold for `outcome`, release it and
    /// wait for the deck to settle.
    pub fn swipe(&mut self, outcome: SwipeOutcome) -> EventResult {
        let t = self.deck.policy().thresholds();
        let target = match outcome {
            SwipeOutcome::Like => Point::new(t.distance_x * SWIPE_OVERSHOOT, 0.0),
            SwipeOutcome::Pass => Point::new(-t.distance_x * SWIPE_OVERSHOOT, 0.0),
            SwipeOutcome::SuperLike => Point::new(0.0, -t.distance_y * SWIPE_OVERSHOOT),
            SwipeOutcome::Cancelled => Point::new(t.distance_x * 0.5, 0.0),
        };
        let result = self.drag(target);
        self.run_until_idle();
        result
    }

    /// Press an action button for `outcome` and wait for the deck to settle.
    pub fn tap(&mut self, outcome: SwipeOutcome) -> EventResult {
        let result = self.deck.commit(outcome);
        self.run_until_idle();
        result
    }
}
