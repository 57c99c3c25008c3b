//! Client configuration and environment loading.

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default completion budget per request.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default `HTTP-Referer` header for the OpenAI-compatible dialect.
pub const DEFAULT_REFERER: &str = "http://localhost";

/// Default `X-Title` header for the OpenAI-compatible dialect.
pub const DEFAULT_TITLE: &str = "Mind Mirror";

/// Primary credential variable.
pub const API_KEY_VAR: &str = "MIND_MIRROR_API_KEY";
/// Fallback credential variable.
pub const FALLBACK_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// Model override variable.
pub const MODEL_VAR: &str = "MIND_MIRROR_MODEL";
/// Token budget override variable.
pub const MAX_TOKENS_VAR: &str = "MIND_MIRROR_MAX_TOKENS";
/// Base URL override variable.
pub const BASE_URL_VAR: &str = "MIND_MIRROR_BASE_URL";

/// Everything a [`MirrorClient`](crate::MirrorClient) needs besides the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Provider credential. `None` or blank fails every call with
    /// [`ChatError::Configuration`](mirror_types::ChatError::Configuration).
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Completion budget per request.
    pub max_tokens: u32,
    /// Override for the dialect's default base URL.
    pub base_url: Option<String>,
    /// `HTTP-Referer` header value.
    pub referer: String,
    /// `X-Title` header value.
    pub title: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
            referer: DEFAULT_REFERER.into(),
            title: DEFAULT_TITLE.into(),
        }
    }
}

impl ClientConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = get(API_KEY_VAR).or_else(|| get(FALLBACK_API_KEY_VAR));
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(raw) = get(MAX_TOKENS_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => config.max_tokens = n,
                _ => tracing::warn!(
                    var = MAX_TOKENS_VAR,
                    value = %raw,
                    default = DEFAULT_MAX_TOKENS,
                    "ignoring invalid token budget"
                ),
            }
        }
        config.base_url = get(BASE_URL_VAR);
        config
    }
}
