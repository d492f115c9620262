//! Content ingestion for generation input.

use std::path::Path;

use tracing::info;

use crate::encode::encode_payload;
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_video;
use crate::sampler::extract_first_frame;
use motionref_models::{ContentAsset, MediaKind};

/// Prepare a user-supplied content file for generation.
///
/// Images are submitted as-is; videos contribute their first frame at
/// high quality. The output ratio class comes from the source pixel
/// dimensions.
pub async fn load_content(path: impl AsRef<Path>) -> MediaResult<ContentAsset> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    let asset = match detect_kind(path)? {
        MediaKind::Image => {
            let (width, height) = image::image_dimensions(path)
                .map_err(|e| MediaError::InvalidImage(e.to_string()))?;
            let bytes = tokio::fs::read(path).await?;

            ContentAsset {
                kind: MediaKind::Image,
                payload: encode_payload(&bytes),
                mime_type: image_mime(path).to_string(),
                aspect: motionref_models::AspectRatio::classify(width, height),
            }
        }
        MediaKind::Video => {
            let metadata = probe_video(path).await?;
            let frame = extract_first_frame(path).await?;

            ContentAsset {
                kind: MediaKind::Video,
                payload: encode_payload(&frame),
                mime_type: "image/jpeg".to_string(),
                aspect: metadata.aspect(),
            }
        }
    };

    info!(
        path = %path.display(),
        kind = ?asset.kind,
        aspect = %asset.aspect,
        "content prepared for generation"
    );
    Ok(asset)
}

/// Classify a file as image or video content by extension.
fn detect_kind(path: &Path) -> MediaResult<MediaKind> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" => Ok(MediaKind::Image),
        "mp4" | "mov" | "webm" | "mkv" | "avi" | "m4v" => Ok(MediaKind::Video),
        other => Err(MediaError::UnsupportedFormat(other.to_string())),
    }
}

/// MIME type for a recognized image extension.
fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            detect_kind(Path::new("photo.JPG")).unwrap(),
            MediaKind::Image
        );
        assert_eq!(
            detect_kind(Path::new("clip.mp4")).unwrap(),
            MediaKind::Video
        );
        assert!(matches!(
            detect_kind(Path::new("notes.txt")),
            Err(MediaError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_kind(Path::new("no_extension")),
            Err(MediaError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a.png")), "image/png");
        assert_eq!(image_mime(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.webp")), "image/webp");
    }

    #[tokio::test]
    async fn test_load_content_missing_file() {
        let err = load_content(PathBuf::from("/nonexistent/photo.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
