//! HTTP client for the generative language API.

use reqwest::Client;

use crate::error::{GenAiError, GenAiResult};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for motion analysis.
pub const ANALYSIS_MODEL: &str = "gemini-2.5-pro";

/// Model used for video generation.
pub const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Client for the Gemini and Veo REST APIs.
pub struct GeminiClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> GenAiResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GenAiError::ApiKeyMissing);
        }

        Ok(Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> GenAiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| GenAiError::ApiKeyMissing)?;
        Self::new(api_key)
    }

    /// Override the API base URL. Used by tests to point at a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full request URL for an API path, with the key appended.
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}?key={}",
            self.base_url.trim_end_matches('/'),
            path,
            self.api_key
        )
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            GeminiClient::new(""),
            Err(GenAiError::ApiKeyMissing)
        ));
    }

    #[test]
    fn test_url_includes_key() {
        let client = GeminiClient::new("test-key").unwrap();
        let url = client.url("v1beta/models/gemini-2.5-pro:generateContent");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent?key=test-key"
        );
    }

    #[test]
    fn test_base_url_override_tolerates_trailing_slash() {
        let client = GeminiClient::new("k").unwrap().with_base_url("http://127.0.0.1:9999/");
        assert!(client.url("v1beta/x").starts_with("http://127.0.0.1:9999/v1beta/x"));
    }
}
