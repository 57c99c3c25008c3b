//! Error types for all Mind Mirror crates.

/// Errors from a chat turn or a structured extraction call.
///
/// `Display` renders the human-readable message that is handed to the
/// caller's error sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// No credential configured; the network was never touched.
    #[error("API key not configured: {0}")]
    Configuration(String),
    /// HTTP 429 from the provider.
    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,
    /// Non-success status, or a success status without a readable body.
    #[error("API error ({status}): {body}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Best-effort response body text.
        body: String,
    },
    /// Malformed stream frame. The frame decoder re-buffers instead of
    /// raising this; it exists for callers that decode frames themselves.
    #[error("stream decode error: {0}")]
    StreamDecode(String),
    /// A structured answer failed JSON parsing or schema validation.
    #[error("AI returned invalid JSON format: {0}")]
    ExtractionFormat(String),
    /// A structured call succeeded but carried no answer text.
    #[error("No content in API response")]
    NoContent,
    /// Anything else (connection failures, mid-stream drops, ...).
    #[error("{0}")]
    Unknown(String),
}

impl ChatError {
    /// Whether a caller-side retry might succeed. The core itself never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::Unknown(_) => true,
            Self::Transport { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// A conversation transition that the current phase does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    /// The outgoing text is empty after trimming.
    #[error("message is empty")]
    EmptyMessage,
    /// A turn is already streaming.
    #[error("a turn is already in flight")]
    Busy,
    /// The conversation is paused.
    #[error("conversation is paused")]
    Paused,
    /// Delta, completion or failure reported while no turn is in flight.
    #[error("no turn in flight")]
    NoTurnInFlight,
    /// Too few messages to derive a summary or mind map.
    #[error("Have a conversation first before generating a summary or mind map.")]
    TooShort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ChatError::RateLimited.to_string(),
            "Rate limit exceeded. Please wait a moment and try again."
        );
        assert_eq!(
            ChatError::Transport {
                status: 500,
                body: "boom".into()
            }
            .to_string(),
            "API error (500): boom"
        );
        assert_eq!(ChatError::NoContent.to_string(), "No content in API response");
    }

    #[test]
    fn retryable_classification() {
        assert!(ChatError::RateLimited.is_retryable());
        assert!(
            ChatError::Transport {
                status: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !ChatError::Transport {
                status: 400,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!ChatError::Configuration("missing".into()).is_retryable());
        assert!(!ChatError::ExtractionFormat("bad".into()).is_retryable());
    }
}
