//! Wire dialects the client can speak.
//!
//! The dialect is picked from the credential alone: routing keys (`sk-or-`)
//! go to an OpenAI-compatible chat-completions gateway, everything else to the
//! Anthropic Messages API.

use mirror_types::Message;
use serde_json::{Value, json};

/// Credential prefix that selects [`ProviderMode::OpenAiCompatible`].
pub const ROUTING_KEY_PREFIX: &str = "sk-or-";

/// Anthropic API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const OPENAI_COMPATIBLE_BASE_URL: &str = "https://openrouter.ai";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Request/response dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// Chat-completions shape: system prompt as the first message, deltas at
    /// `choices[0].delta.content`, `[DONE]` terminator.
    OpenAiCompatible,
    /// Messages shape: top-level `system`, deltas in `content_block_delta`
    /// events at `delta.text`.
    Anthropic,
}

impl ProviderMode {
    /// Pick the dialect for a credential.
    pub fn for_credential(api_key: &str) -> Self {
        if api_key.starts_with(ROUTING_KEY_PREFIX) {
            ProviderMode::OpenAiCompatible
        } else {
            ProviderMode::Anthropic
        }
    }

    /// Base URL used when none is configured.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderMode::OpenAiCompatible => OPENAI_COMPATIBLE_BASE_URL,
            ProviderMode::Anthropic => ANTHROPIC_BASE_URL,
        }
    }

    /// Path appended to the base URL.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            ProviderMode::OpenAiCompatible => "/api/v1/chat/completions",
            ProviderMode::Anthropic => "/v1/messages",
        }
    }

    /// Authentication and identification headers for this dialect.
    pub fn headers(self, api_key: &str, referer: &str, title: &str) -> Vec<(&'static str, String)> {
        match self {
            ProviderMode::OpenAiCompatible => vec![
                ("authorization", format!("Bearer {api_key}")),
                ("http-referer", referer.to_string()),
                ("x-title", title.to_string()),
                ("content-type", "application/json".to_string()),
            ],
            ProviderMode::Anthropic => vec![
                ("x-api-key", api_key.to_string()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
                ("content-type", "application/json".to_string()),
            ],
        }
    }

    /// JSON request body.
    pub fn request_body(
        self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
        stream: bool,
    ) -> Value {
        let turns = messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }));
        match self {
            ProviderMode::OpenAiCompatible => {
                let mut all = vec![json!({ "role": "system", "content": system })];
                all.extend(turns);
                json!({
                    "model": model,
                    "max_tokens": max_tokens,
                    "messages": all,
                    "stream": stream,
                })
            }
            ProviderMode::Anthropic => json!({
                "model": model,
                "max_tokens": max_tokens,
                "system": system,
                "messages": turns.collect::<Vec<_>>(),
                "stream": stream,
            }),
        }
    }

    /// Text fragment carried by one decoded stream payload, if any.
    ///
    /// Payloads without text (role announcements, pings, stop events) and
    /// empty fragments yield `None`.
    pub fn extract_delta(self, payload: &Value) -> Option<&str> {
        let text = match self {
            ProviderMode::OpenAiCompatible => payload.pointer("/choices/0/delta/content"),
            ProviderMode::Anthropic => {
                if payload.get("type").and_then(Value::as_str) != Some("content_block_delta") {
                    return None;
                }
                payload.pointer("/delta/text")
            }
        };
        text.and_then(Value::as_str).filter(|t| !t.is_empty())
    }

    /// Answer text of a non-streaming response.
    pub fn extract_answer(self, response: &Value) -> Option<&str> {
        let text = match self {
            ProviderMode::OpenAiCompatible => response.pointer("/choices/0/message/content"),
            ProviderMode::Anthropic => response.pointer("/content/0/text"),
        };
        text.and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_prefix_selects_openai_dialect() {
        assert_eq!(
            ProviderMode::for_credential("sk-or-v1-abc"),
            ProviderMode::OpenAiCompatible
        );
        assert_eq!(
            ProviderMode::for_credential("sk-ant-abc"),
            ProviderMode::Anthropic
        );
        assert_eq!(ProviderMode::for_credential("SK-OR-abc"), ProviderMode::Anthropic);
    }

    #[test]
    fn openai_body_puts_system_first() {
        let body = ProviderMode::OpenAiCompatible.request_body(
            "m",
            1024,
            "be kind",
            &[Message::user("hi")],
            true,
        );
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "be kind"}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "hi"}));
        assert_eq!(body["stream"], json!(true));
        assert!(body.get("system").is_none());
    }

    #[test]
    fn anthropic_body_uses_top_level_system() {
        let body = ProviderMode::Anthropic.request_body(
            "m",
            512,
            "be kind",
            &[Message::user("hi"), Message::assistant("hello")],
            false,
        );
        assert_eq!(body["system"], "be kind");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["stream"], json!(false));
    }

    #[test]
    fn openai_delta_extraction() {
        let mode = ProviderMode::OpenAiCompatible;
        let payload = json!({"choices": [{"delta": {"content": "Hel"}}]});
        assert_eq!(mode.extract_delta(&payload), Some("Hel"));
        let role_only = json!({"choices": [{"delta": {"role": "assistant"}}]});
        assert_eq!(mode.extract_delta(&role_only), None);
        let empty = json!({"choices": [{"delta": {"content": ""}}]});
        assert_eq!(mode.extract_delta(&empty), None);
    }

    #[test]
    fn anthropic_delta_extraction_requires_event_type() {
        let mode = ProviderMode::Anthropic;
        let delta = json!({"type": "content_block_delta", "delta": {"type": "text_delta", "text": "lo"}});
        assert_eq!(mode.extract_delta(&delta), Some("lo"));
        let start = json!({"type": "message_start", "delta": {"text": "nope"}});
        assert_eq!(mode.extract_delta(&start), None);
    }

    #[test]
    fn delta_extraction_ignores_the_other_dialect() {
        let openai_frame = json!({"choices": [{"delta": {"content": "x"}}]});
        let anthropic_frame =
            json!({"type": "content_block_delta", "delta": {"type": "text_delta", "text": "x"}});
        assert_eq!(ProviderMode::Anthropic.extract_delta(&openai_frame), None);
        assert_eq!(ProviderMode::OpenAiCompatible.extract_delta(&anthropic_frame), None);
    }

    #[test]
    fn answer_extraction_per_dialect() {
        let openai = json!({"choices": [{"message": {"content": "{}"}}]});
        assert_eq!(ProviderMode::OpenAiCompatible.extract_answer(&openai), Some("{}"));
        let anthropic = json!({"content": [{"type": "text", "text": "{}"}]});
        assert_eq!(ProviderMode::Anthropic.extract_answer(&anthropic), Some("{}"));
        assert_eq!(ProviderMode::Anthropic.extract_answer(&json!({"content": []})), None);
    }

    #[test]
    fn headers_per_dialect() {
        let openai = ProviderMode::OpenAiCompatible.headers("sk-or-x", "http://localhost", "Mind Mirror");
        assert!(openai.contains(&("authorization", "Bearer sk-or-x".to_string())));
        assert!(openai.contains(&("x-title", "Mind Mirror".to_string())));

        let anthropic = ProviderMode::Anthropic.headers("sk-ant", "r", "t");
        assert!(anthropic.contains(&("x-api-key", "sk-ant".to_string())));
        assert!(anthropic.contains(&("anthropic-version", ANTHROPIC_VERSION.to_string())));
    }
}
