use crate::types::ResolutionToken;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidViewport { width: f32, height: f32 },
    NonPositiveThreshold { name: &'static str, value: f32 },
    InvalidRange { name: &'static str, min: f32, max: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "viewport {width}x{height} must be finite and positive")
            }
            ConfigError::NonPositiveThreshold { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            ConfigError::InvalidRange { name, min, max } => {
                write!(f, "{name} range [{min}, {max}] is empty or not finite")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rejection reasons for [`CardStack::advance`](crate::CardStack::advance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceError {
    /// The token was already consumed by an earlier advance.
    StaleToken {
        token: ResolutionToken,
        expected: ResolutionToken,
    },
    /// The token belongs to a card that is not active yet.
    OutOfOrder {
        token: ResolutionToken,
        expected: ResolutionToken,
    },
    Exhausted,
}

impl std::fmt::Display for AdvanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvanceError::StaleToken { token, expected } => {
                write!(f, "resolution {token} already applied; expected {expected}")
            }
            AdvanceError::OutOfOrder { token, expected } => {
                write!(f, "resolution {token} arrived before {expected}")
            }
            AdvanceError::Exhausted => write!(f, "card stack is exhausted"),
        }
    }
}

impl std::error::Error for AdvanceError {}
