//! Motion replication pipeline orchestration.
//!
//! This crate provides:
//! - Session state and the single-flight generation gate
//! - The sample, analyze, generate stage sequence
//! - User-facing failure classification
//! - Environment-driven configuration

pub mod classify;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod session;

pub use classify::{classify_failure, FailureKind};
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{MotionPipeline, Synthesis, Synthesizer};
pub use session::Session;
