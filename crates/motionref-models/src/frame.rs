//! Frame samples extracted from reference footage.

use serde::{Deserialize, Serialize};

/// One still image captured at a specific timestamp of a source video.
///
/// The payload is a base64-encoded JPEG. Samples are immutable once
/// produced; `index` matches capture order, which is strictly increasing
/// in `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSample {
    /// Ordinal position within the capture sequence.
    pub index: usize,
    /// Capture timestamp in seconds from the start of the video.
    pub timestamp: f64,
    /// Base64-encoded JPEG payload.
    pub data: String,
}

impl FrameSample {
    /// Create a sample from an encoded payload.
    pub fn new(index: usize, timestamp: f64, data: impl Into<String>) -> Self {
        Self {
            index,
            timestamp,
            data: data.into(),
        }
    }
}
