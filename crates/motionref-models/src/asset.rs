//! User-supplied content assets.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;

/// Declared media category of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A user-supplied content file prepared for generation.
///
/// `payload` holds the base64 image bytes actually submitted to the
/// generator: the file itself for images, the extracted first frame for
/// videos. Re-ingesting content supersedes the previous asset and drops
/// its buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAsset {
    /// Declared category of the uploaded file.
    pub kind: MediaKind,
    /// Base64-encoded image payload submitted to the generator.
    pub payload: String,
    /// MIME type of the payload.
    pub mime_type: String,
    /// Output ratio derived from the source pixel dimensions.
    pub aspect: AspectRatio,
}
