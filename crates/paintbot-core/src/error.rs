//! Error types for the Paintbot client

use thiserror::Error;

/// Result type for Paintbot operations
pub type Result<T> = std::result::Result<T, PaintbotError>;

/// Paintbot error types
#[derive(Debug, Error)]
pub enum PaintbotError {
    /// Connection could not be established, or failed mid-stream
    #[error("Transport error: {0}")]
    Transport(String),

    /// Frame is not a valid envelope, or a known envelope has a malformed payload
    #[error("Decode error: {reason} (frame: {raw})")]
    Decode { reason: String, raw: String },

    /// Server reported an invalid message, or sent something outside the protocol
    #[error("Protocol error: {reason} (frame: {raw})")]
    Protocol { reason: String, raw: String },

    /// Character is not part of the current snapshot (e.g. eliminated)
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    /// Action string outside the closed action set
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Client configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Outbound serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaintbotError {
    /// Build a decode error, keeping the offending frame for diagnostics
    pub fn decode(reason: impl ToString, raw: &[u8]) -> Self {
        PaintbotError::Decode {
            reason: reason.to_string(),
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    /// Build a protocol error, keeping the offending frame for diagnostics
    pub fn protocol(reason: impl ToString, raw: &[u8]) -> Self {
        PaintbotError::Protocol {
            reason: reason.to_string(),
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    /// Whether the error ends a session.
    ///
    /// Lookups and action parsing are recoverable: a policy that asks for an
    /// eliminated character, or parses a bad action string, gets the error
    /// back and picks a fallback action.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PaintbotError::CharacterNotFound(_) | PaintbotError::InvalidAction(_)
        )
    }
}

impl From<serde_json::Error> for PaintbotError {
    fn from(err: serde_json::Error) -> Self {
        PaintbotError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_raw_frame() {
        let err = PaintbotError::decode("missing field `map`", br#"{"type":"x"}"#);
        match &err {
            PaintbotError::Decode { raw, .. } => assert_eq!(raw, r#"{"type":"x"}"#),
            _ => panic!("Expected Decode, got {:?}", err),
        }
        assert!(err.to_string().contains("missing field `map`"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(!PaintbotError::CharacterNotFound("p1".into()).is_fatal());
        assert!(!PaintbotError::InvalidAction("JUMP".into()).is_fatal());
        assert!(PaintbotError::Transport("closed".into()).is_fatal());
    }
}
