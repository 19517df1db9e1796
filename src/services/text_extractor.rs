//! Text recognition stage
//!
//! Invokes the backend's free-form text recognition at a quality tier and
//! assigns the tier's fixed confidence. Backend failures are swallowed
//! here: the stage returns empty text with zero confidence, which reads as
//! an always-incomplete parse downstream and escalates normally.

use crate::types::{ExtractedText, OcrQuality, VisionBackend};
use tracing::warn;

/// Recognize text from the image at the given quality tier.
///
/// Never fails. Confidence is tier-fixed (standard 0.80, high 0.95),
/// independent of actual recognition quality; a failed call yields
/// `{text: "", confidence: 0.0}`.
pub async fn extract(
    backend: &dyn VisionBackend,
    image: &[u8],
    quality: OcrQuality,
) -> ExtractedText {
    match backend.recognize_text(image, quality).await {
        Ok(text) => ExtractedText {
            text,
            confidence: quality.confidence(),
        },
        Err(e) => {
            warn!(quality = quality.as_str(), error = %e, "Text recognition failed");
            ExtractedText {
                text: String::new(),
                confidence: 0.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModelTier, VisionError};

    struct FixedBackend {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl VisionBackend for FixedBackend {
        async fn recognize_text(
            &self,
            _image: &[u8],
            _quality: OcrQuality,
        ) -> Result<String, VisionError> {
            if self.fail {
                Err(VisionError::Network("connection refused".to_string()))
            } else {
                Ok("Ball Speed: 150 mph".to_string())
            }
        }

        async fn extract_structured(
            &self,
            _image: &[u8],
            _hint_text: &str,
            _tier: ModelTier,
        ) -> Result<String, VisionError> {
            unreachable!("not exercised")
        }
    }

    #[tokio::test]
    async fn test_confidence_is_tier_fixed() {
        let backend = FixedBackend { fail: false };

        let standard = extract(&backend, b"img", OcrQuality::Standard).await;
        assert_eq!(standard.confidence, 0.80);
        assert_eq!(standard.text, "Ball Speed: 150 mph");

        let high = extract(&backend, b"img", OcrQuality::High).await;
        assert_eq!(high.confidence, 0.95);
    }

    #[tokio::test]
    async fn test_failure_swallowed_to_empty_text() {
        let backend = FixedBackend { fail: true };

        let result = extract(&backend, b"img", OcrQuality::Standard).await;
        assert_eq!(result.text, "");
        assert_eq!(result.confidence, 0.0);
    }
}
