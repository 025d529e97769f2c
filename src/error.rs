//! Error types
//!
//! Only startup can fail. Gameplay states like game over are not errors, and
//! degenerate geometry is guarded inside the physics instead of reported.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Image asset missing or undecodable
    AssetLoad { path: String, reason: String },
    /// Window, document, body or 2D context unavailable
    MissingBrowserObject(&'static str),
    /// Tuning override could not be parsed
    InvalidTuning(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetLoad { path, reason } => {
                write!(f, "failed to load asset '{}': {}", path, reason)
            }
            GameError::MissingBrowserObject(what) => {
                write!(f, "browser object unavailable: {}", what)
            }
            GameError::InvalidTuning(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::InvalidTuning(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_asset() {
        let err = GameError::AssetLoad {
            path: "images/player.png".into(),
            reason: "decode failed".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("images/player.png"));
        assert!(msg.contains("decode failed"));
    }

    #[test]
    fn test_json_error_becomes_invalid_tuning() {
        let err: GameError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }
}
