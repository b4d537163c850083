use swipedeck_geometry::{Point, Velocity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (e.g. a system gesture).
    Cancel,
}

/// Pointer input delivered by the host for one card.
///
/// `offset` is the displacement from where the pointer went down, in
/// card-local logical pixels. `time_ms` is the host's event timestamp and is
/// only used to estimate a release velocity when `velocity` is absent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub offset: Point,
    pub time_ms: i64,
    pub velocity: Option<Velocity>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, offset: Point, time_ms: i64) -> Self {
        Self {
            kind,
            offset,
            time_ms,
            velocity: None,
        }
    }

    pub fn down(time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::ZERO, time_ms)
    }

    pub fn moved(offset: Point, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, offset, time_ms)
    }

    pub fn up(offset: Point, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, offset, time_ms)
    }

    /// Pointer release carrying the platform's own velocity sample.
    pub fn up_with_velocity(offset: Point, velocity: Velocity, time_ms: i64) -> Self {
        Self {
            velocity: Some(velocity),
            ..Self::up(offset, time_ms)
        }
    }

    pub fn cancel(time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::ZERO, time_ms)
    }
}

/// Whether an input was acted on.
///
/// Ignored input is not an error: events racing with a commit, or landing on
/// a card that is not active, are expected and silently dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
