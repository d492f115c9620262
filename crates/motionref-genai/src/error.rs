//! Error types for generative AI calls.

use thiserror::Error;

/// Result type for generative AI calls.
pub type GenAiResult<T> = Result<T, GenAiError>;

#[derive(Debug, Error)]
pub enum GenAiError {
    /// No API key available; reported before any network call.
    #[error("API key is not configured")]
    ApiKeyMissing,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No content in model response")]
    EmptyResponse,

    #[error("Failed to get video generation status")]
    PollFailed,

    #[error("Video generation failed or returned no URI")]
    MissingResultUri,

    #[error("Failed to download video. Status: {status}")]
    DownloadFailed { status: u16 },
}

impl GenAiError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(message.into())
    }
}
