//! Evenly-spaced frame sampling from reference footage.

use std::path::Path;

use tracing::{debug, warn};

use crate::encode::{encode_payload, jpeg_qscale, FIRST_FRAME_QUALITY, SAMPLE_QUALITY};
use crate::error::MediaResult;
use crate::ffmpeg::{run_ffmpeg, FfmpegCommand};
use crate::probe::probe_video;
use motionref_models::FrameSample;

/// Compute the capture schedule for a clip.
///
/// Timestamps start at zero and advance by `duration / count`; the
/// schedule ends after `count` entries or once the next timestamp would
/// pass the end of the clip. A non-positive duration yields an empty
/// schedule.
pub fn sample_timestamps(duration: f64, count: usize) -> Vec<f64> {
    if duration <= 0.0 || count == 0 {
        return Vec::new();
    }

    let interval = duration / count as f64;
    let mut timestamps = Vec::with_capacity(count);
    let mut current = 0.0;

    while timestamps.len() < count && current <= duration {
        timestamps.push(current);
        current += interval;
    }

    timestamps
}

/// Extract `count` evenly spaced JPEG samples from a video.
///
/// Captures are sequenced one at a time into a scratch file that each
/// capture rewrites, so samples come back in strictly increasing
/// timestamp order at the source's native dimensions. A source that
/// reports a non-positive duration yields an empty Vec; the caller
/// decides whether that aborts the run.
pub async fn sample_frames(video: impl AsRef<Path>, count: usize) -> MediaResult<Vec<FrameSample>> {
    let video = video.as_ref();

    let metadata = probe_video(video).await?;
    let timestamps = sample_timestamps(metadata.duration, count);
    if timestamps.is_empty() {
        warn!(
            path = %video.display(),
            duration = metadata.duration,
            "source has no sampleable duration"
        );
        return Ok(Vec::new());
    }

    let scratch = tempfile::tempdir()?;
    let frame_path = scratch.path().join("sample.jpg");
    let qscale = jpeg_qscale(SAMPLE_QUALITY);

    let mut samples = Vec::with_capacity(timestamps.len());
    for (index, &timestamp) in timestamps.iter().enumerate() {
        capture_frame(video, &frame_path, timestamp, qscale).await?;
        let bytes = tokio::fs::read(&frame_path).await?;
        samples.push(FrameSample::new(index, timestamp, encode_payload(&bytes)));
    }

    debug!(
        count = samples.len(),
        duration = metadata.duration,
        "sampled reference frames"
    );
    Ok(samples)
}

/// Capture the first frame of a video as a JPEG.
///
/// Used to derive the generation payload when the uploaded content is
/// itself a video; captured at a higher quality than reference samples.
pub async fn extract_first_frame(video: impl AsRef<Path>) -> MediaResult<Vec<u8>> {
    let video = video.as_ref();

    let scratch = tempfile::tempdir()?;
    let frame_path = scratch.path().join("first.jpg");
    capture_frame(video, &frame_path, 0.0, jpeg_qscale(FIRST_FRAME_QUALITY)).await?;

    Ok(tokio::fs::read(&frame_path).await?)
}

async fn capture_frame(
    video: &Path,
    output: &Path,
    timestamp: f64,
    qscale: u8,
) -> MediaResult<()> {
    let cmd = FfmpegCommand::new(video, output)
        .seek(timestamp)
        .single_frame()
        .jpeg_quality(qscale);
    run_ffmpeg(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_evenly_spaced() {
        let timestamps = sample_timestamps(8.0, 10);
        assert_eq!(timestamps.len(), 10);
        assert_eq!(timestamps[0], 0.0);
        assert!((timestamps[1] - 0.8).abs() < 1e-9);
        assert!((timestamps[9] - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_strictly_increasing_and_bounded() {
        for (duration, count) in [(1.0, 1), (2.5, 4), (8.0, 10), (120.0, 10), (0.5, 10)] {
            let timestamps = sample_timestamps(duration, count);
            assert!(!timestamps.is_empty());
            assert!(timestamps.len() <= count);
            for pair in timestamps.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            assert!(*timestamps.last().unwrap() <= duration);
        }
    }

    #[test]
    fn test_schedule_empty_for_non_positive_duration() {
        assert!(sample_timestamps(0.0, 10).is_empty());
        assert!(sample_timestamps(-3.0, 10).is_empty());
    }

    #[test]
    fn test_schedule_empty_for_zero_count() {
        assert!(sample_timestamps(8.0, 0).is_empty());
    }

    #[test]
    fn test_single_sample_lands_on_start() {
        assert_eq!(sample_timestamps(5.0, 1), vec![0.0]);
    }
}
