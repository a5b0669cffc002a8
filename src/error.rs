//! Error types

use core::fmt;

use crate::sim::BodyId;

#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// A sound (or other asset) could not be loaded before the deadline
    AssetLoadFailure { url: String, reason: String },
    /// A body with degenerate geometry was about to enter the world
    InvalidBodyState { id: BodyId, reason: String },
    /// Browser/GPU facilities the game needs are missing
    Platform(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoadFailure { url, reason } => {
                write!(f, "failed to load asset '{url}': {reason}")
            }
            Self::InvalidBodyState { id, reason } => {
                write!(f, "invalid state for body {}: {reason}", id.0)
            }
            Self::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_asset() {
        let err = GameError::AssetLoadFailure {
            url: "laser.wav".into(),
            reason: "timed out".into(),
        };
        assert_eq!(err.to_string(), "failed to load asset 'laser.wav': timed out");
    }

    #[test]
    fn test_display_names_the_body() {
        let err = GameError::InvalidBodyState {
            id: BodyId(7),
            reason: "zero width".into(),
        };
        assert!(err.to_string().contains("body 7"));
    }
}
