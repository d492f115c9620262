//! JPEG quality mapping and payload encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// JPEG quality for reference frame samples.
pub const SAMPLE_QUALITY: f32 = 0.8;

/// JPEG quality for the single first-frame extraction used when the
/// uploaded content is itself a video.
pub const FIRST_FRAME_QUALITY: f32 = 0.9;

/// Map a quality factor in [0.0, 1.0] onto FFmpeg's `-q:v` scale,
/// where 2 is best and 31 is worst.
pub fn jpeg_qscale(quality: f32) -> u8 {
    let quality = quality.clamp(0.0, 1.0);
    (31.0 - quality * 29.0).round() as u8
}

/// Base64-encode raw image bytes for transport.
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qscale_endpoints() {
        assert_eq!(jpeg_qscale(1.0), 2);
        assert_eq!(jpeg_qscale(0.0), 31);
    }

    #[test]
    fn test_qscale_monotonic_in_quality() {
        let mut last = jpeg_qscale(0.0);
        for step in 1..=10 {
            let q = jpeg_qscale(step as f32 / 10.0);
            assert!(q <= last, "higher quality must not raise qscale");
            last = q;
        }
    }

    #[test]
    fn test_qscale_clamps_out_of_range() {
        assert_eq!(jpeg_qscale(1.5), jpeg_qscale(1.0));
        assert_eq!(jpeg_qscale(-0.5), jpeg_qscale(0.0));
    }

    #[test]
    fn test_encode_payload_deterministic() {
        let bytes = [0xff, 0xd8, 0xff, 0xe0];
        assert_eq!(encode_payload(&bytes), encode_payload(&bytes));
        assert_eq!(encode_payload(&bytes), "/9j/4A==");
    }
}
