//! Video generation job submission, polling and download.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use url::Url;

use crate::client::{GeminiClient, VIDEO_MODEL};
use crate::error::{GenAiError, GenAiResult};
use motionref_models::{AspectRatio, GenerationJob, JobFailure, MotionCommand};

/// Fixed prompt prefix keeping the generator faithful to the analyzed
/// motion.
const REPLICATION_PREFIX: &str =
    "Strictly and precisely replicate the following animation without any creative deviation: ";

/// Delay between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Resolution tier requested from the generator.
const RESOLUTION: &str = "720p";

/// A generation request ready for submission.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Base64 image payload used as the starting frame.
    pub image: String,
    /// MIME type of the image payload.
    pub mime_type: String,
    /// Motion to replicate.
    pub command: MotionCommand,
    /// Output aspect ratio.
    pub aspect: AspectRatio,
}

impl GenerationRequest {
    /// Full prompt submitted to the generator.
    pub fn prompt(&self) -> String {
        format!("{}{}", REPLICATION_PREFIX, self.command.as_str())
    }
}

/// Progress phases of a generation run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Generating,
    Rendering,
    Downloading,
    Ready,
}

impl GenerationPhase {
    /// User-facing progress message for this phase.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Generating => "Generating video with AI...",
            Self::Rendering => "AI is rendering your video. This may take several minutes...",
            Self::Downloading => "Downloading generated video...",
            Self::Ready => "Your video is ready!",
        }
    }
}

/// A generated video held in memory.
#[derive(Debug, Clone)]
pub struct GeneratedVideo {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedVideo {
    /// User-initiated save of the in-memory media.
    pub async fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        tokio::fs::write(path, &self.bytes).await
    }
}

/// Remote operations behind the generation flow.
///
/// The HTTP client implements this; tests drive the polling loop with a
/// scripted implementation and a zero delay.
#[async_trait]
pub trait VideoOperations: Send + Sync {
    /// Submit a generation request, returning the job handle.
    async fn submit(&self, request: &GenerationRequest) -> GenAiResult<GenerationJob>;

    /// Re-fetch job status by operation name.
    async fn poll(&self, job: &GenerationJob) -> GenAiResult<GenerationJob>;

    /// Fetch result media bytes from a completed job's URI.
    async fn fetch(&self, uri: &str) -> GenAiResult<Vec<u8>>;
}

/// Drive a generation job to completion.
///
/// Polls at `poll_interval` until the job reports done; the iteration
/// count is unbounded. A poll that errors aborts the run immediately
/// with no retry, and there is no cancellation path once submitted.
/// `progress` fires at each phase transition.
pub async fn generate_video<O, F>(
    ops: &O,
    request: &GenerationRequest,
    poll_interval: Duration,
    progress: F,
) -> GenAiResult<GeneratedVideo>
where
    O: VideoOperations + ?Sized,
    F: Fn(GenerationPhase),
{
    progress(GenerationPhase::Generating);
    let mut job = ops.submit(request).await?;
    info!(operation = %job.name, aspect = %request.aspect, "video generation submitted");

    progress(GenerationPhase::Rendering);
    while !job.is_terminal() {
        tokio::time::sleep(poll_interval).await;
        job = match ops.poll(&job).await {
            Ok(job) => job,
            Err(e) => {
                error!(operation = %job.name, error = %e, "status poll failed");
                return Err(GenAiError::PollFailed);
            }
        };
    }

    if let Some(failure) = &job.failure {
        warn!(
            operation = %job.name,
            code = ?failure.code,
            message = %failure.message,
            "operation reported failure"
        );
    }
    let uri = job.result_uri.clone().ok_or(GenAiError::MissingResultUri)?;

    progress(GenerationPhase::Downloading);
    let bytes = ops.fetch(&uri).await?;
    info!(operation = %job.name, size = bytes.len(), "generated video downloaded");

    progress(GenerationPhase::Ready);
    Ok(GeneratedVideo {
        bytes,
        mime_type: "video/mp4".to_string(),
    })
}

/// `predictLongRunning` request.
#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance {
    prompt: String,
    image: ImagePayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImagePayload {
    bytes_base64_encoded: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    resolution: String,
    aspect_ratio: String,
}

/// Long-running operation envelope.
#[derive(Debug, Deserialize)]
struct Operation {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<OperationResponse>,
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    code: Option<i64>,
    message: Option<String>,
}

impl Operation {
    fn into_job(self) -> GenerationJob {
        let result_uri = self
            .response
            .as_ref()
            .and_then(|r| r.generate_video_response.as_ref())
            .and_then(|r| r.generated_samples.first())
            .and_then(|s| s.video.as_ref())
            .and_then(|v| v.uri.clone());

        GenerationJob {
            name: self.name,
            done: self.done,
            result_uri,
            failure: self.error.map(|e| JobFailure {
                code: e.code,
                message: e.message.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl VideoOperations for GeminiClient {
    async fn submit(&self, request: &GenerationRequest) -> GenAiResult<GenerationJob> {
        let url = self.url(&format!("v1beta/models/{}:predictLongRunning", VIDEO_MODEL));
        let body = PredictRequest {
            instances: vec![Instance {
                prompt: request.prompt(),
                image: ImagePayload {
                    bytes_base64_encoded: request.image.clone(),
                    mime_type: request.mime_type.clone(),
                },
            }],
            parameters: Parameters {
                sample_count: 1,
                resolution: RESOLUTION.to_string(),
                aspect_ratio: request.aspect.to_string(),
            },
        };

        let response = self
            .http()
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::request_failed(format!("generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api { status, body });
        }

        let operation: Operation = response.json().await.map_err(|e| {
            GenAiError::request_failed(format!("failed to parse operation: {}", e))
        })?;
        Ok(operation.into_job())
    }

    async fn poll(&self, job: &GenerationJob) -> GenAiResult<GenerationJob> {
        let url = self.url(&format!("v1beta/{}", job.name));

        let response = self
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|e| GenAiError::request_failed(format!("status request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api { status, body });
        }

        let operation: Operation = response.json().await.map_err(|e| {
            GenAiError::request_failed(format!("failed to parse operation: {}", e))
        })?;
        Ok(operation.into_job())
    }

    async fn fetch(&self, uri: &str) -> GenAiResult<Vec<u8>> {
        let url = download_url(uri, self.api_key())
            .map_err(|e| GenAiError::request_failed(format!("invalid download URI: {}", e)))?;

        let response = self
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| GenAiError::request_failed(format!("download request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "video download failed");
            return Err(GenAiError::DownloadFailed {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenAiError::request_failed(format!("download read failed: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

/// Append the API key to a result URI as a query parameter.
fn download_url(uri: &str, api_key: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(uri)?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}
