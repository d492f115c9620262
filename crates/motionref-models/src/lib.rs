//! Shared data models for the motionref pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Aspect-ratio classification of uploaded content
//! - Frame samples extracted from reference footage
//! - Motion commands derived by the analysis model
//! - Video generation job handles

pub mod aspect;
pub mod asset;
pub mod command;
pub mod frame;
pub mod job;

// Re-export common types
pub use aspect::AspectRatio;
pub use asset::{ContentAsset, MediaKind};
pub use command::MotionCommand;
pub use frame::FrameSample;
pub use job::{GenerationJob, JobFailure};
