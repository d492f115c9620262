//! Output aspect ratio classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output aspect ratio accepted by the video generation service.
///
/// The generation endpoint only accepts widescreen and portrait output,
/// so only those two ratios are representable. Content is classified by
/// comparing pixel width to height; square sources classify as widescreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    /// Widescreen (16:9)
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    /// Portrait (9:16)
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    /// Classify source pixel dimensions into an output ratio.
    pub fn classify(width: u32, height: u32) -> Self {
        if width >= height {
            Self::Wide
        } else {
            Self::Tall
        }
    }

    /// String form expected by the generation API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wide => "16:9",
            Self::Tall => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(Self::Wide),
            "9:16" => Ok(Self::Tall),
            other => Err(AspectRatioParseError::Unsupported(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum AspectRatioParseError {
    #[error("Unsupported aspect ratio: {0}, expected '16:9' or '9:16'")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_landscape_and_portrait() {
        assert_eq!(AspectRatio::classify(1920, 1080), AspectRatio::Wide);
        assert_eq!(AspectRatio::classify(1080, 1920), AspectRatio::Tall);
    }

    #[test]
    fn test_classify_square_is_wide() {
        assert_eq!(AspectRatio::classify(512, 512), AspectRatio::Wide);
    }

    #[test]
    fn test_parse_round_trip() {
        for ratio in [AspectRatio::Wide, AspectRatio::Tall] {
            assert_eq!(ratio.as_str().parse::<AspectRatio>().unwrap(), ratio);
        }
        assert!("4:3".parse::<AspectRatio>().is_err());
    }
}
