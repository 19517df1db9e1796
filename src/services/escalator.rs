//! Confidence-driven escalation ladders
//!
//! Two deterministic ladders, selected by caller role. Each stage is
//! strictly more expensive than the last: cheap regex parsing over OCR
//! text is attempted first, and model escalation is gated by fixed
//! confidence thresholds rather than retried blindly. Thresholds and
//! per-tier confidences are policy constants.

use crate::services::ai_extractor::{self, ExtractionError};
use crate::services::metrics_parser::MetricsParser;
use crate::services::text_extractor;
use crate::types::{AnalyzerOptions, ModelTier, OcrQuality, ShotMetrics, UserRole, VisionBackend};
use tracing::{debug, info};

/// A fast-tier result below this confidence (or with missing fields)
/// escalates to the premium tier
const FAST_ESCALATION_THRESHOLD: f64 = 0.85;

/// A premium-tier result below this confidence escalates to max vision
const PREMIUM_ESCALATION_THRESHOLD: f64 = 0.95;

/// Confidence for a complete regex parse over standard-quality OCR text
const REGEX_CONFIDENCE_STANDARD: f64 = 0.90;

/// Confidence for a complete regex parse over high-quality OCR text
const REGEX_CONFIDENCE_PREMIUM: f64 = 0.95;

/// Dealers get the premium ladder; `force_high_accuracy` selects it for
/// any role.
pub fn uses_premium_ladder(options: &AnalyzerOptions) -> bool {
    options.user_role == UserRole::Dealer || options.force_high_accuracy
}

/// Run the ladder selected by the caller's options.
pub async fn run(
    backend: &dyn VisionBackend,
    parser: &MetricsParser,
    image: &[u8],
    options: &AnalyzerOptions,
) -> Result<ShotMetrics, ExtractionError> {
    if uses_premium_ladder(options) {
        premium_ladder(backend, parser, image).await
    } else {
        standard_ladder(backend, parser, image).await
    }
}

/// Standard ladder (free/pro): standard OCR → regex → fast model.
async fn standard_ladder(
    backend: &dyn VisionBackend,
    parser: &MetricsParser,
    image: &[u8],
) -> Result<ShotMetrics, ExtractionError> {
    let ocr = text_extractor::extract(backend, image, OcrQuality::Standard).await;
    let partial = parser.parse(&ocr.text);

    if partial.is_complete() {
        debug!("Regex parse complete, skipping model extraction");
        return Ok(partial.into_metrics(REGEX_CONFIDENCE_STANDARD));
    }

    debug!("Regex parse incomplete, extracting with fast model");
    ai_extractor::extract(backend, image, &ocr.text, ModelTier::Fast).await
}

/// Premium ladder (dealer / forced): high OCR → regex → fast model →
/// premium model → max vision, each step gated by its threshold.
async fn premium_ladder(
    backend: &dyn VisionBackend,
    parser: &MetricsParser,
    image: &[u8],
) -> Result<ShotMetrics, ExtractionError> {
    let ocr = text_extractor::extract(backend, image, OcrQuality::High).await;
    let partial = parser.parse(&ocr.text);

    if partial.is_complete() {
        debug!("Regex parse complete, skipping model extraction");
        return Ok(partial.into_metrics(REGEX_CONFIDENCE_PREMIUM));
    }

    let fast = ai_extractor::extract(backend, image, &ocr.text, ModelTier::Fast).await?;
    if fast.confidence >= FAST_ESCALATION_THRESHOLD && fast.is_complete() {
        return Ok(fast);
    }

    info!("Escalating to premium tier for dealer accuracy");
    let premium = ai_extractor::extract(backend, image, &ocr.text, ModelTier::Premium).await?;
    if premium.confidence >= PREMIUM_ESCALATION_THRESHOLD {
        return Ok(premium);
    }

    info!("Using max-vision tier for maximum accuracy");
    ai_extractor::extract(backend, image, &ocr.text, ModelTier::MaxVision).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VisionError;

    #[test]
    fn test_ladder_selection() {
        let free = AnalyzerOptions::default();
        assert!(!uses_premium_ladder(&free));

        let pro = AnalyzerOptions {
            user_role: UserRole::Pro,
            force_high_accuracy: false,
        };
        assert!(!uses_premium_ladder(&pro));

        let dealer = AnalyzerOptions {
            user_role: UserRole::Dealer,
            force_high_accuracy: false,
        };
        assert!(uses_premium_ladder(&dealer));

        let forced = AnalyzerOptions {
            user_role: UserRole::Free,
            force_high_accuracy: true,
        };
        assert!(uses_premium_ladder(&forced));
    }

    struct ScriptedBackend {
        ocr_text: &'static str,
        fast_response: &'static str,
    }

    #[async_trait::async_trait]
    impl VisionBackend for ScriptedBackend {
        async fn recognize_text(
            &self,
            _image: &[u8],
            _quality: OcrQuality,
        ) -> Result<String, VisionError> {
            Ok(self.ocr_text.to_string())
        }

        async fn extract_structured(
            &self,
            _image: &[u8],
            _hint_text: &str,
            tier: ModelTier,
        ) -> Result<String, VisionError> {
            assert_eq!(tier, ModelTier::Fast, "only the fast tier should run");
            Ok(self.fast_response.to_string())
        }
    }

    const READOUT: &str =
        "Ball Speed: 150.2 mph\nLaunch Angle: 12.5°\nSpin Rate: 2850 rpm\nCarry: 245 yds\nTotal: 268 yds";

    #[tokio::test]
    async fn test_standard_ladder_regex_confidence() {
        let backend = ScriptedBackend {
            ocr_text: READOUT,
            fast_response: "{}",
        };
        let parser = MetricsParser::new();

        let metrics = standard_ladder(&backend, &parser, b"img").await.unwrap();
        assert_eq!(metrics.ball_speed, 150.2);
        assert_eq!(metrics.confidence, REGEX_CONFIDENCE_STANDARD);
    }

    #[tokio::test]
    async fn test_premium_ladder_regex_confidence() {
        let backend = ScriptedBackend {
            ocr_text: READOUT,
            fast_response: "{}",
        };
        let parser = MetricsParser::new();

        let metrics = premium_ladder(&backend, &parser, b"img").await.unwrap();
        assert_eq!(metrics.confidence, REGEX_CONFIDENCE_PREMIUM);
    }

    #[tokio::test]
    async fn test_premium_ladder_accepts_sufficient_fast_result() {
        let backend = ScriptedBackend {
            ocr_text: "Ball Speed: ???",
            fast_response:
                r#"{"ballSpeed": 145, "launchAngle": 11, "spinRate": 2700, "carry": 240, "total": 265}"#,
        };
        let parser = MetricsParser::new();

        // Fast result is complete and meets its threshold, so the premium
        // and max tiers must not run (the backend asserts on tier).
        let metrics = premium_ladder(&backend, &parser, b"img").await.unwrap();
        assert_eq!(metrics.confidence, 0.85);
        assert_eq!(metrics.ball_speed, 145.0);
    }
}
