//! Client for the generative AI services behind the pipeline.
//!
//! This crate provides:
//! - Motion analysis of sampled reference frames (`generateContent`)
//! - Video generation job submission, status polling and result download
//! - The credential provider abstraction used by the orchestrator

pub mod analyze;
pub mod auth;
pub mod client;
pub mod error;
pub mod generate;

pub use auth::{EnvKeyProvider, KeyProvider};
pub use client::{GeminiClient, ANALYSIS_MODEL, VIDEO_MODEL};
pub use error::{GenAiError, GenAiResult};
pub use generate::{
    generate_video, GeneratedVideo, GenerationPhase, GenerationRequest, VideoOperations,
    DEFAULT_POLL_INTERVAL,
};
