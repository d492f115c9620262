//! Pipeline error types.

use thiserror::Error;

use motionref_genai::GenAiError;
use motionref_media::MediaError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The reference video yielded no samples.
    #[error("Could not extract frames from the reference video.")]
    NoFramesExtracted,

    /// Analysis produced an empty motion command.
    #[error("Could not determine animation style from the reference video.")]
    EmptyMotionCommand,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    GenAi(#[from] GenAiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
