//! Scripted user input replayed against a deck at 60 Hz.

use swipedeck_core::{
    OutcomeHandler, Point, PointerEvent, Size, SwipeDeck, SwipeOutcome, Velocity,
};

const FRAME_NANOS: u64 = 16_666_667;
const MAX_SETTLE_FRAMES: usize = 600;

/// One thing the user does.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Slow drag to an offset, released without velocity.
    Drag { to: Point, frames: usize },
    /// Quick drag released at a velocity reported by the platform.
    Flick { to: Point, velocity: Velocity },
    /// Drag that the platform cancels before release.
    Interrupted { to: Point },
    /// Action button.
    Tap(SwipeOutcome),
    /// Window resize.
    Resize(Size),
}

pub fn browsing_session() -> Vec<Step> {
    vec![
        Step::Drag {
            to: Point::new(160.0, 12.0),
            frames: 20,
        },
        Step::Flick {
            to: Point::new(-30.0, 4.0),
            velocity: Velocity::new(-1_400.0, 80.0),
        },
        Step::Drag {
            to: Point::new(40.0, 30.0),
            frames: 12,
        },
        Step::Tap(SwipeOutcome::Like),
        Step::Drag {
            to: Point::new(20.0, -300.0),
            frames: 24,
        },
        Step::Interrupted {
            to: Point::new(220.0, 0.0),
        },
        Step::Resize(Size::new(600.0, 900.0)),
        Step::Drag {
            to: Point::new(120.0, 0.0),
            frames: 16,
        },
        Step::Tap(SwipeOutcome::Pass),
        Step::Flick {
            to: Point::new(0.0, -25.0),
            velocity: Velocity::new(0.0, -2_200.0),
        },
        Step::Tap(SwipeOutcome::Like),
        Step::Tap(SwipeOutcome::Pass),
        Step::Tap(SwipeOutcome::Like),
    ]
}

/// Drives a deck with scripted steps and a simulated frame clock.
pub struct Player<H: OutcomeHandler> {
    deck: SwipeDeck<H>,
    clock_nanos: u64,
    frames: usize,
}

impl<H: OutcomeHandler> Player<H> {
    pub fn new(deck: SwipeDeck<H>) -> Self {
        Self {
            deck,
            clock_nanos: 0,
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_deck(self) -> SwipeDeck<H> {
        self.deck
    }

    pub fn play(&mut self, steps: &[Step]) -> anyhow::Result<()> {
        for (index, step) in steps.iter().enumerate() {
            if self.deck.is_exhausted() {
                log::info!("deck exhausted; skipping remaining {} step(s)", steps.len() - index);
                break;
            }
            log::debug!("step {index}: {step:?}");
            self.perform(*step)?;
            self.settle();
        }
        Ok(())
    }

    fn perform(&mut self, step: Step) -> anyhow::Result<()> {
        match step {
            Step::Drag { to, frames } => {
                self.drag(to, frames.max(1));
                let now = self.now_ms();
                self.release(PointerEvent::up_with_velocity(to, Velocity::ZERO, now));
            }
            Step::Flick { to, velocity } => {
                self.drag(to, 3);
                let now = self.now_ms();
                self.release(PointerEvent::up_with_velocity(to, velocity, now));
            }
            Step::Interrupted { to } => {
                self.drag(to, 8);
                let now = self.now_ms();
                self.release(PointerEvent::cancel(now));
            }
            Step::Tap(outcome) => {
                if !self.deck.commit(outcome).is_consumed() {
                    log::warn!("button {outcome:?} ignored");
                }
            }
            Step::Resize(size) => self.deck.set_viewport(size)?,
        }
        Ok(())
    }

    fn drag(&mut self, to: Point, frames: usize) {
        let Some(card) = self.deck.active_card_id() else {
            return;
        };
        let now = self.now_ms();
        self.deck.pointer_event(card, PointerEvent::down(now));
        for frame in 1..=frames {
            let fraction = frame as f32 / frames as f32;
            let offset = Point::new(to.x * fraction, to.y * fraction);
            self.advance();
            let now = self.now_ms();
            self.deck.pointer_event(card, PointerEvent::moved(offset, now));
        }
    }

    fn release(&mut self, event: PointerEvent) {
        if let Some(card) = self.deck.active_card_id() {
            self.deck.pointer_event(card, event);
        }
    }

    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.deck.frame().animating {
                return;
            }
            self.advance();
        }
        log::warn!("deck still animating after {MAX_SETTLE_FRAMES} frames");
    }

    fn advance(&mut self) {
        self.clock_nanos += FRAME_NANOS;
        self.frames += 1;
        let frame = self.deck.tick(FRAME_NANOS);
        if let Some(active) = frame.active() {
            log::trace!("{} {:?} {:?}", active.card, active.state, active.visual);
        }
    }

    fn now_ms(&self) -> i64 {
        (self.clock_nanos / 1_000_000) as i64
    }
}
