//! Pipeline configuration.

use std::time::Duration;

use motionref_genai::DEFAULT_POLL_INTERVAL;

/// Number of frames sampled from the reference video by default.
const DEFAULT_SAMPLE_COUNT: usize = 10;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of frames sampled from the reference video
    pub sample_count: usize,
    /// Delay between generation status polls
    pub poll_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            sample_count: std::env::var("MOTIONREF_SAMPLE_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SAMPLE_COUNT),
            poll_interval: Duration::from_secs(
                std::env::var("MOTIONREF_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_POLL_INTERVAL.as_secs()),
            ),
        }
    }
}
