use super::*;
use crate::types::ResolutionToken;
use swipedeck_geometry::{Point, Velocity};

const FRAME_NANOS: u64 = 16_666_667;

#[derive(Default)]
struct Recorder(Vec<(CardId, SwipeOutcome)>);

impl OutcomeHandler for Recorder {
    fn on_resolved(&mut self, card: CardId, outcome: SwipeOutcome) {
        self.0.push((card, outcome));
    }
}

fn deck(count: u64) -> SwipeDeck<Recorder> {
    let config = SwipeConfig::new(Size::new(400.0, 800.0));
    SwipeDeck::new(config, (1..=count).map(CardId), Recorder::default()).expect("valid config")
}

fn pump(deck: &mut SwipeDeck<Recorder>, frames: usize) -> DeckFrame {
    let mut frame = deck.frame();
    for _ in 0..frames {
        frame = deck.tick(FRAME_NANOS);
    }
    frame
}

#[test]
fn invalid_config_is_rejected() {
    let config = SwipeConfig::new(Size::new(0.0, 800.0));
    let result = SwipeDeck::new(config, [CardId(1)], |_: CardId, _: SwipeOutcome| {});
    assert!(matches!(
        result.err(),
        Some(ConfigError::InvalidViewport { .. })
    ));
}

#[test]
fn first_card_is_active_and_second_peeks() {
    let deck = deck(3);
    assert_eq!(deck.active_card_id(), Some(CardId(1)));
    let frame = deck.frame();
    assert_eq!(frame.cards.len(), 2);
    assert_eq!(frame.active().map(|f| f.card), Some(CardId(1)));
    assert!(!frame.cards[1].is_active);
    assert_eq!(frame.cards[1].depth, 1);
    assert_eq!(frame.cards[1].visual.scale, 0.95);
    assert!(frame.animating);
    assert_eq!(deck.state_of(CardId(3)), None);
}

#[test]
fn button_commit_resolves_and_advances() {
    let mut deck = deck(3);
    assert!(deck.commit(SwipeOutcome::Like).is_consumed());
    assert_eq!(deck.commit(SwipeOutcome::Pass), EventResult::Ignored);

    let frame = pump(&mut deck, 30);
    assert_eq!(deck.handler().0, vec![(CardId(1), SwipeOutcome::Like)]);
    assert_eq!(deck.active_card_id(), Some(CardId(2)));
    assert_eq!(deck.state_of(CardId(1)), None);
    assert_eq!(frame.active().map(|f| f.card), Some(CardId(2)));
    assert_eq!(
        deck.controller(CardId(2)).and_then(CardController::token),
        Some(ResolutionToken(1))
    );
}

#[test]
fn handler_can_be_drained_between_resolutions() {
    let mut deck = deck(3);
    deck.commit(SwipeOutcome::Like);
    pump(&mut deck, 30);
    let drained = std::mem::take(&mut deck.handler_mut().0);
    assert_eq!(drained, vec![(CardId(1), SwipeOutcome::Like)]);

    deck.commit(SwipeOutcome::Pass);
    pump(&mut deck, 30);
    assert_eq!(deck.handler().0, vec![(CardId(2), SwipeOutcome::Pass)]);
}

#[test]
fn input_to_waiting_card_is_ignored() {
    let mut deck = deck(3);
    assert_eq!(
        deck.pointer_event(CardId(2), PointerEvent::down(0)),
        EventResult::Ignored
    );
    deck.pointer_event(CardId(2), PointerEvent::moved(Point::new(300.0, 0.0), 16));
    deck.pointer_event(CardId(2), PointerEvent::up(Point::new(300.0, 0.0), 32));
    assert_eq!(deck.state_of(CardId(2)), Some(CardInteractionState::Idle));
    pump(&mut deck, 30);
    assert!(deck.handler().0.is_empty());
    assert_eq!(deck.pointer_event(CardId(42), PointerEvent::down(0)), EventResult::Ignored);
}

#[test]
fn flick_commits_through_pointer_events() {
    let mut deck = deck(2);
    let card = CardId(1);
    deck.pointer_event(card, PointerEvent::down(0));
    deck.pointer_event(card, PointerEvent::moved(Point::new(0.0, -20.0), 16));
    deck.pointer_event(
        card,
        PointerEvent::up_with_velocity(Point::new(0.0, -30.0), Velocity::new(0.0, -900.0), 32),
    );
    assert_eq!(
        deck.state_of(card),
        Some(CardInteractionState::Committing(SwipeOutcome::SuperLike))
    );
    pump(&mut deck, 30);
    assert_eq!(deck.handler().0, vec![(card, SwipeOutcome::SuperLike)]);
}

#[test]
fn peek_card_grows_as_front_card_is_dragged() {
    let mut deck = deck(3);
    let card = CardId(1);
    deck.pointer_event(card, PointerEvent::down(0));
    let mut previous = deck.frame().cards[1].visual.scale;
    for step in 1..=5 {
        deck.pointer_event(card, PointerEvent::moved(Point::new(step as f32 * 25.0, 0.0), step * 16));
        let scale = deck.frame().cards[1].visual.scale;
        assert!(scale >= previous);
        previous = scale;
    }
    assert_eq!(previous, 1.0);
}

#[test]
fn deck_exhausts_after_last_card() {
    let mut deck = deck(2);
    deck.commit(SwipeOutcome::Pass);
    pump(&mut deck, 30);
    deck.commit(SwipeOutcome::Like);
    let frame = pump(&mut deck, 30);

    assert!(frame.exhausted);
    assert!(frame.cards.is_empty());
    assert!(!frame.animating);
    assert_eq!(deck.active_card_id(), None);
    assert_eq!(deck.commit(SwipeOutcome::Like), EventResult::Ignored);
    assert_eq!(
        deck.handler().0,
        vec![(CardId(1), SwipeOutcome::Pass), (CardId(2), SwipeOutcome::Like)]
    );
}

#[test]
fn pushing_cards_revives_an_exhausted_deck() {
    let mut deck = deck(1);
    deck.commit(SwipeOutcome::Pass);
    pump(&mut deck, 30);
    assert!(deck.is_exhausted());

    assert_eq!(deck.push_cards([CardId(1), CardId(5)]), 1);
    assert_eq!(deck.active_card_id(), Some(CardId(5)));
    assert!(deck.commit(SwipeOutcome::Like).is_consumed());
}

#[test]
fn duplicate_resolution_reaches_the_handler_once() {
    let mut deck = deck(3);
    let resolution = Resolution {
        card: CardId(1),
        outcome: SwipeOutcome::Like,
        token: ResolutionToken(0),
    };
    deck.apply_resolution(resolution);
    deck.apply_resolution(resolution);
    assert_eq!(deck.stack().active_index(), 1);
    assert_eq!(deck.handler().0.len(), 1);
}

#[test]
fn unmount_mid_exit_forces_resolution() {
    let mut deck = deck(2);
    deck.commit(SwipeOutcome::Pass);
    pump(&mut deck, 5);
    assert_eq!(deck.unmount_card(CardId(1)), Some(SwipeOutcome::Pass));
    assert_eq!(deck.handler().0, vec![(CardId(1), SwipeOutcome::Pass)]);
    assert_eq!(deck.active_card_id(), Some(CardId(2)));

    pump(&mut deck, 30);
    assert_eq!(deck.handler().0.len(), 1);
}

#[test]
fn unmount_while_dragging_keeps_the_card() {
    let mut deck = deck(2);
    let card = CardId(1);
    deck.pointer_event(card, PointerEvent::down(0));
    deck.pointer_event(card, PointerEvent::moved(Point::new(250.0, 0.0), 16));
    assert_eq!(deck.unmount_card(card), None);
    assert_eq!(deck.state_of(card), Some(CardInteractionState::Idle));
    assert_eq!(deck.active_card_id(), Some(card));
    assert!(deck.handler().0.is_empty());
}

#[test]
fn cancel_card_abandons_commit() {
    let mut deck = deck(2);
    deck.commit(SwipeOutcome::Like);
    pump(&mut deck, 5);
    assert!(deck.cancel_card(CardId(1)).is_consumed());
    pump(&mut deck, 30);
    assert!(deck.handler().0.is_empty());
    assert_eq!(deck.active_card_id(), Some(CardId(1)));
    assert_eq!(
        deck.frame().active().map(|f| f.visual),
        Some(DerivedVisual::REST)
    );
}

#[test]
fn viewport_change_rescales_thresholds() {
    let mut deck = deck(2);
    deck.set_viewport(Size::new(200.0, 400.0)).expect("valid viewport");
    assert_eq!(deck.policy().thresholds().distance_x, 50.0);

    let card = CardId(1);
    deck.pointer_event(card, PointerEvent::down(0));
    deck.pointer_event(
        card,
        PointerEvent::up_with_velocity(Point::new(60.0, 0.0), Velocity::ZERO, 16),
    );
    assert_eq!(
        deck.state_of(card),
        Some(CardInteractionState::Committing(SwipeOutcome::Like))
    );

    assert!(deck.set_viewport(Size::new(-1.0, 400.0)).is_err());
    assert_eq!(deck.policy().viewport(), Size::new(200.0, 400.0));
}

#[test]
fn closures_serve_as_handlers() {
    let mut seen = Vec::new();
    {
        let mut deck = SwipeDeck::new(
            SwipeConfig::default(),
            [CardId(1)],
            |card: CardId, outcome: SwipeOutcome| seen.push((card, outcome)),
        )
        .expect("valid config");
        deck.commit(SwipeOutcome::SuperLike);
        for _ in 0..30 {
            deck.tick(FRAME_NANOS);
        }
    }
    assert_eq!(seen, vec![(CardId(1), SwipeOutcome::SuperLike)]);
}
