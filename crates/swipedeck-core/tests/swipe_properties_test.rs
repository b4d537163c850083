//! Behavioural guarantees of the engine, checked over sweeps of inputs.

use swipedeck_core::{
    CardId, CardInteractionState, CardStack, Point, PointerEvent, ResolutionToken, Size,
    SwipeConfig, SwipeDeck, SwipeOutcome, SwipePolicy, Velocity,
};
use swipedeck_testing::{DeckRobot, RecordingHandler, FRAME_NANOS};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 800.0;

fn config() -> SwipeConfig {
    SwipeConfig::new(Size::new(WIDTH, HEIGHT))
}

fn policy() -> SwipePolicy {
    SwipePolicy::new(config()).expect("valid config")
}

fn robot(cards: u64) -> (DeckRobot<RecordingHandler>, RecordingHandler) {
    let handler = RecordingHandler::new();
    let deck = SwipeDeck::new(config(), (1..=cards).map(CardId), handler.clone())
        .expect("valid config");
    (DeckRobot::new(deck), handler)
}

#[test]
fn classification_flips_once_as_distance_grows() {
    let policy = policy();
    for vx in [0.0, 120.0, -300.0, 499.0] {
        for sign in [1.0f32, -1.0] {
            let mut flips = 0;
            let mut previous = policy.classify(Point::ZERO, Velocity::new(vx, 0.0));
            assert_eq!(previous, SwipeOutcome::Cancelled);
            for step in 1..=400 {
                let dx = sign * step as f32 * 2.0;
                let outcome = policy.classify(Point::new(dx, 0.0), Velocity::new(vx, 0.0));
                if outcome != previous {
                    flips += 1;
                    let expected = if sign > 0.0 {
                        SwipeOutcome::Like
                    } else {
                        SwipeOutcome::Pass
                    };
                    assert_eq!(outcome, expected, "vx {vx} dx {dx}");
                }
                previous = outcome;
            }
            assert_eq!(flips, 1, "vx {vx} sign {sign}");
        }
    }
}

#[test]
fn horizontal_classification_is_symmetric() {
    let policy = policy();
    for step in 0..=500 {
        let d = step as f32 * 1.7;
        let right = policy.classify(Point::new(d, 0.0), Velocity::ZERO);
        let left = policy.classify(Point::new(-d, 0.0), Velocity::ZERO);
        assert_eq!(
            right == SwipeOutcome::Like,
            left == SwipeOutcome::Pass,
            "d = {d}"
        );
    }
}

#[test]
fn example_releases_classify_as_documented() {
    let policy = policy();
    let cases = [
        (Point::new(0.4 * WIDTH, 0.0), Velocity::ZERO, SwipeOutcome::Like),
        (
            Point::new(0.1 * WIDTH, 0.0),
            Velocity::new(600.0, 0.0),
            SwipeOutcome::Like,
        ),
        (
            Point::new(0.05 * WIDTH, -0.3 * HEIGHT),
            Velocity::ZERO,
            SwipeOutcome::SuperLike,
        ),
        (
            Point::new(0.05 * WIDTH, 0.05 * HEIGHT),
            Velocity::new(40.0, 20.0),
            SwipeOutcome::Cancelled,
        ),
    ];
    for (offset, velocity, expected) in cases {
        assert_eq!(policy.classify(offset, velocity), expected, "{offset:?}");
    }
}

#[test]
fn double_commit_invokes_handler_once() {
    let (mut robot, handler) = robot(3);
    let deck = robot.deck_mut();
    assert!(deck.commit(SwipeOutcome::Like).is_consumed());
    assert!(!deck.commit(SwipeOutcome::Like).is_consumed());
    robot.run_until_idle();
    assert_eq!(handler.recorded(), vec![(CardId(1), SwipeOutcome::Like)]);
}

#[test]
fn every_reset_ends_at_exact_rest() {
    let offsets = [
        Point::new(1.0, 1.0),
        Point::new(99.0, 0.0),
        Point::new(-99.0, 150.0),
        Point::new(0.0, 799.0),
        Point::new(-60.0, -199.0),
        Point::new(5_000.0, 5_000.0),
    ];
    for offset in offsets {
        let (mut robot, handler) = robot(1);
        robot.press();
        robot.drag_to(offset, 4);
        if offset.x.abs() > WIDTH {
            robot.cancel_pointer();
        } else {
            robot.release_with_velocity(Velocity::ZERO);
        }
        assert_eq!(
            robot.deck().state_of(CardId(1)),
            Some(CardInteractionState::Resetting),
            "{offset:?}"
        );
        robot.run_until_idle();
        let card = robot.deck().controller(CardId(1)).expect("card visible");
        assert_eq!(card.state(), CardInteractionState::Idle);
        assert_eq!(card.offset(), Point::ZERO, "{offset:?}");
        assert_eq!(handler.count(), 0);
    }
}

#[test]
fn stack_index_only_moves_forward_by_one() {
    let mut stack = CardStack::new((0..8).map(CardId));
    let mut history = vec![stack.active_index()];
    let attempts = [0u64, 0, 2, 1, 1, 3, 2, 3, 7, 4, 5, 5, 6, 7, 7, 8, 9];
    for token in attempts {
        let before = stack.active_index();
        let accepted = stack.advance(ResolutionToken(token)).is_ok();
        let after = stack.active_index();
        assert_eq!(after, before + usize::from(accepted));
        history.push(after);
    }
    assert!(history.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(stack.is_exhausted());
}

#[test]
fn waiting_cards_never_leave_idle() {
    let (mut robot, handler) = robot(3);
    let waiting = CardId(2);
    let events = [
        PointerEvent::down(0),
        PointerEvent::moved(Point::new(300.0, 0.0), 10),
        PointerEvent::moved(Point::new(0.0, -500.0), 20),
        PointerEvent::up_with_velocity(Point::new(300.0, 0.0), Velocity::new(3_000.0, 0.0), 30),
        PointerEvent::cancel(40),
    ];

    // While the front card is idle, dragging and exiting.
    for phase in 0..3 {
        match phase {
            1 => {
                robot.press();
                robot.drag_to(Point::new(80.0, 0.0), 2);
            }
            2 => {
                robot.release_with_velocity(Velocity::new(900.0, 0.0));
            }
            _ => {}
        }
        for event in events {
            assert!(!robot.deck_mut().pointer_event(waiting, event).is_consumed());
            assert_eq!(
                robot.deck().state_of(waiting),
                Some(CardInteractionState::Idle)
            );
        }
        robot.deck_mut().tick(FRAME_NANOS);
        assert_eq!(
            robot.deck().state_of(waiting),
            Some(CardInteractionState::Idle)
        );
    }

    robot.run_until_idle();
    assert_eq!(handler.recorded(), vec![(CardId(1), SwipeOutcome::Like)]);
    assert_eq!(robot.deck().active_card_id(), Some(waiting));
}

#[test]
fn gesture_and_button_exits_are_frame_identical() {
    let (mut gesture, _) = robot(2);
    let (mut button, _) = robot(2);

    gesture.press();
    gesture.release_with_velocity(Velocity::new(-2_000.0, 0.0));
    button.deck_mut().commit(SwipeOutcome::Pass);

    for frame in 0..30 {
        let a = gesture.advance_frame().clone();
        let b = button.advance_frame().clone();
        assert_eq!(a, b, "frame {frame}");
    }
}
