//! Internal helpers for mapping HTTP/reqwest failures to [`ChatError`].

use mirror_types::ChatError;

/// Body text used when a failed streaming response has none.
const EMPTY_BODY_FALLBACK: &str = "Failed to connect to AI.";

/// Map a non-success status on the streaming path.
pub(crate) fn map_stream_status(status: reqwest::StatusCode, body: &str) -> ChatError {
    match status.as_u16() {
        429 => ChatError::RateLimited,
        code => {
            let body = if body.trim().is_empty() {
                EMPTY_BODY_FALLBACK
            } else {
                body
            };
            ChatError::Transport {
                status: code,
                body: body.to_string(),
            }
        }
    }
}

/// Map a non-success status on the structured extraction path.
///
/// Every status, 429 included, surfaces as [`ChatError::Transport`].
pub(crate) fn map_extraction_status(status: reqwest::StatusCode, body: &str) -> ChatError {
    ChatError::Transport {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Map a [`reqwest::Error`] (connect, TLS, body read) to a [`ChatError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        ChatError::Unknown(format!("request timed out: {err}"))
    } else {
        ChatError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn stream_429_is_rate_limited() {
        assert_eq!(
            map_stream_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ChatError::RateLimited
        );
    }

    #[test]
    fn stream_empty_body_gets_fallback_text() {
        assert_eq!(
            map_stream_status(StatusCode::BAD_GATEWAY, ""),
            ChatError::Transport {
                status: 502,
                body: EMPTY_BODY_FALLBACK.into()
            }
        );
    }

    #[test]
    fn extraction_429_is_transport() {
        assert_eq!(
            map_extraction_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ChatError::Transport {
                status: 429,
                body: "slow down".into()
            }
        );
    }
}
