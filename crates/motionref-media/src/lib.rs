//! FFmpeg CLI wrapper for probing and frame sampling.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - FFprobe metadata extraction (duration, dimensions)
//! - Evenly-spaced reference frame sampling
//! - JPEG quality mapping and base64 payload encoding
//! - Content ingestion (image file or first video frame) for generation

pub mod encode;
pub mod error;
pub mod ffmpeg;
pub mod ingest;
pub mod probe;
pub mod sampler;

pub use encode::{encode_payload, jpeg_qscale, FIRST_FRAME_QUALITY, SAMPLE_QUALITY};
pub use error::{MediaError, MediaResult};
pub use ffmpeg::{check_ffmpeg, check_ffprobe, run_ffmpeg, FfmpegCommand};
pub use ingest::load_content;
pub use probe::{probe_video, VideoMetadata};
pub use sampler::{extract_first_frame, sample_frames, sample_timestamps};
