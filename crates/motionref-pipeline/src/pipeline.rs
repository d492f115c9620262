//! The sample, analyze, generate stage sequence.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use motionref_genai::{generate_video, GeminiClient, GeneratedVideo, GenerationRequest};
use motionref_media::sample_frames;
use motionref_models::{ContentAsset, MotionCommand};

/// Outcome of a successful synthesis run.
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// The motion command derived from the reference footage.
    pub command: MotionCommand,
    /// The generated video.
    pub video: GeneratedVideo,
}

/// Turns a content asset plus reference footage into a generated video.
///
/// Abstracted from the session so orchestration can be driven with a
/// scripted implementation under test.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        content: &ContentAsset,
        reference: &Path,
        progress: &(dyn Fn(String) + Send + Sync),
    ) -> PipelineResult<Synthesis>;
}

/// Production pipeline backed by FFmpeg and the generative API.
pub struct MotionPipeline {
    client: GeminiClient,
    config: PipelineConfig,
}

impl MotionPipeline {
    pub fn new(client: GeminiClient, config: PipelineConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Synthesizer for MotionPipeline {
    /// Run the three stages in order: sample, analyze, generate.
    ///
    /// Each stage failure unwinds directly to the caller; no stage
    /// retries itself.
    async fn synthesize(
        &self,
        content: &ContentAsset,
        reference: &Path,
        progress: &(dyn Fn(String) + Send + Sync),
    ) -> PipelineResult<Synthesis> {
        progress("Analyzing reference video animation...".to_string());
        let samples = sample_frames(reference, self.config.sample_count).await?;
        if samples.is_empty() {
            return Err(PipelineError::NoFramesExtracted);
        }

        let command = self.client.analyze_motion(&samples).await?;
        if command.is_empty() {
            return Err(PipelineError::EmptyMotionCommand);
        }
        info!(command = %command, "reference animation analyzed");

        progress(format!("AI Command: \"{}\". Generating video...", command));
        let request = GenerationRequest {
            image: content.payload.clone(),
            mime_type: content.mime_type.clone(),
            command: command.clone(),
            aspect: content.aspect,
        };
        let video = generate_video(&self.client, &request, self.config.poll_interval, |phase| {
            progress(phase.message().to_string())
        })
        .await?;

        Ok(Synthesis { command, video })
    }
}
