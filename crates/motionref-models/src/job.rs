//! Video generation job handles.

use serde::{Deserialize, Serialize};

/// Failure detail reported by a terminal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFailure {
    /// Numeric status code, when the service reports one.
    pub code: Option<i64>,
    /// Human-readable failure message.
    pub message: String,
}

/// Handle to a remote asynchronous video generation operation.
///
/// Created on submission and replaced wholesale by each status poll.
/// Terminal once `done` is set; a terminal job carries either a result
/// URI or a failure detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Opaque operation name used to poll status.
    pub name: String,
    /// Whether the operation has reached a terminal state.
    #[serde(default)]
    pub done: bool,
    /// Fetchable result media location, present on success.
    pub result_uri: Option<String>,
    /// Failure detail, present when the operation ended in error.
    pub failure: Option<JobFailure>,
}

impl GenerationJob {
    /// A freshly submitted, still-pending job.
    pub fn submitted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            result_uri: None,
            failure: None,
        }
    }

    /// Check if this is a terminal state (no more polls expected).
    pub fn is_terminal(&self) -> bool {
        self.done
    }

    /// Terminal and carrying a fetchable result.
    pub fn succeeded(&self) -> bool {
        self.done && self.result_uri.is_some()
    }
}
