//! Mind Mirror API client struct and builder.

use mirror_types::{ChatError, Message};

use crate::config::ClientConfig;
use crate::error::map_reqwest_error;
use crate::mode::ProviderMode;

/// Client for both chat streaming and structured extraction.
///
/// The wire dialect is chosen per call from the credential, see
/// [`ProviderMode::for_credential`].
///
/// # Example
///
/// ```no_run
/// use mirror_provider::MirrorClient;
///
/// let client = MirrorClient::new("sk-or-...")
///     .model("anthropic/claude-sonnet-4")
///     .max_tokens(2048);
/// ```
#[derive(Debug, Clone)]
pub struct MirrorClient {
    pub(crate) config: ClientConfig,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl MirrorClient {
    /// Create a client with the given credential and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig {
            api_key: Some(api_key.into()),
            ..ClientConfig::default()
        })
    }

    /// Create a client from an explicit configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the process environment (see [`ClientConfig::from_env`]).
    ///
    /// A missing credential is not an error here; it is reported by the
    /// first call instead.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    /// Override the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Override the completion budget.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Override the API base URL. Useful for a local mock server or a proxy.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Override the `HTTP-Referer` header.
    #[must_use]
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.config.referer = referer.into();
        self
    }

    /// Override the `X-Title` header.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The credential, or a configuration error if none is usable.
    pub(crate) fn credential(&self) -> Result<&str, ChatError> {
        match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ChatError::Configuration(
                "set MIND_MIRROR_API_KEY or ANTHROPIC_API_KEY".into(),
            )),
        }
    }

    /// Full endpoint URL for a dialect.
    pub(crate) fn endpoint_url(&self, mode: ProviderMode) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(mode.default_base_url())
            .trim_end_matches('/');
        format!("{base}{}", mode.endpoint_path())
    }

    /// Send one request and return the raw response, whatever its status.
    pub(crate) async fn send(
        &self,
        api_key: &str,
        mode: ProviderMode,
        system: &str,
        messages: &[Message],
        stream: bool,
    ) -> Result<reqwest::Response, ChatError> {
        let url = self.endpoint_url(mode);
        let body = mode.request_body(
            &self.config.model,
            self.config.max_tokens,
            system,
            messages,
            stream,
        );

        tracing::debug!(
            url = %url,
            model = %body["model"],
            stream,
            messages = messages.len(),
            "sending chat request"
        );

        let mut request = self.client.post(&url);
        for (name, value) in mode.headers(api_key, &self.config.referer, &self.config.title) {
            request = request.header(name, value);
        }
        request.json(&body).send().await.map_err(map_reqwest_error)
    }
}
