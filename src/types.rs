//! Core types and trait definitions for the shot analysis engine
//!
//! Defines the data model shared by every pipeline stage plus the
//! `VisionBackend` trait seam through which the external multimodal
//! service is consumed. Tests substitute a scripted backend at this seam.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Metrics
// ============================================================================

/// Complete shot metrics produced by one analysis pass
///
/// Immutable after creation and cached by image fingerprint. `club` and
/// `confidence` are always populated on any value leaving the analyzer;
/// `confidence` is determined by the tier that produced the result, never
/// computed from the data itself.
///
/// Serialized camelCase to match the upstream consumers of the shot API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotMetrics {
    /// Ball speed in mph
    pub ball_speed: f64,
    /// Launch angle in degrees
    pub launch_angle: f64,
    /// Spin rate in rpm
    pub spin_rate: f64,
    /// Carry distance in yards
    pub carry: f64,
    /// Total distance in yards
    pub total: f64,
    /// Inferred club label ("Driver", "7 Iron", ..., or "Unknown")
    pub club: String,
    /// Tier-assigned confidence (0.0-1.0)
    pub confidence: f64,
}

impl ShotMetrics {
    /// True if all five numeric fields are present and non-zero.
    ///
    /// Zero counts as missing: a genuine 0.0 reading is indistinguishable
    /// from an absent field and re-escalates.
    pub fn is_complete(&self) -> bool {
        self.ball_speed != 0.0
            && self.launch_angle != 0.0
            && self.spin_rate != 0.0
            && self.carry != 0.0
            && self.total != 0.0
    }
}

/// Partially extracted metrics, intermediate output of the regex parser
///
/// Each field is optional - the parser fills only what it matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialMetrics {
    pub ball_speed: Option<f64>,
    pub launch_angle: Option<f64>,
    pub spin_rate: Option<f64>,
    pub carry: Option<f64>,
    pub total: Option<f64>,
}

impl PartialMetrics {
    /// True if all five fields are present and non-zero.
    ///
    /// Zero counts as missing (see [`ShotMetrics::is_complete`]).
    pub fn is_complete(&self) -> bool {
        let truthy = |f: &Option<f64>| matches!(f, Some(v) if *v != 0.0);
        truthy(&self.ball_speed)
            && truthy(&self.launch_angle)
            && truthy(&self.spin_rate)
            && truthy(&self.carry)
            && truthy(&self.total)
    }

    /// Promote to full metrics with the given tier confidence.
    ///
    /// Unmatched fields become 0.0; the club label is filled later by the
    /// analyzer.
    pub fn into_metrics(self, confidence: f64) -> ShotMetrics {
        ShotMetrics {
            ball_speed: self.ball_speed.unwrap_or_default(),
            launch_angle: self.launch_angle.unwrap_or_default(),
            spin_rate: self.spin_rate.unwrap_or_default(),
            carry: self.carry.unwrap_or_default(),
            total: self.total.unwrap_or_default(),
            club: String::new(),
            confidence,
        }
    }
}

/// Raw text recognized from an image, with tier-assigned confidence
///
/// Never persisted - consumed immediately by the regex parser.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub confidence: f64,
}

// ============================================================================
// Caller options
// ============================================================================

/// Caller role, decided upstream by the request handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Free,
    Pro,
    Dealer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Free => "free",
            UserRole::Pro => "pro",
            UserRole::Dealer => "dealer",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(UserRole::Free),
            "pro" => Ok(UserRole::Pro),
            "dealer" => Ok(UserRole::Dealer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Per-request analysis options, supplied by the caller
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Selects the escalation ladder (dealers get the premium ladder)
    pub user_role: UserRole,
    /// Force the premium ladder regardless of role
    pub force_high_accuracy: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            user_role: UserRole::Free,
            force_high_accuracy: false,
        }
    }
}

// ============================================================================
// Recognition tiers
// ============================================================================

/// Text-recognition quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrQuality {
    /// Fast model, confidence 0.80
    Standard,
    /// Premium model, confidence 0.95
    High,
}

impl OcrQuality {
    /// Fixed confidence for text recognized at this tier, independent of
    /// actual recognition quality.
    pub fn confidence(&self) -> f64 {
        match self {
            OcrQuality::Standard => 0.80,
            OcrQuality::High => 0.95,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OcrQuality::Standard => "standard",
            OcrQuality::High => "high",
        }
    }
}

/// Structured-extraction model tier
///
/// Each tier is strictly more expensive than the previous one; the
/// escalator advances through them under fixed confidence thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Cheap mini model, confidence 0.85
    Fast,
    /// Premium model, confidence 0.95
    Premium,
    /// Maximum-accuracy vision model, confidence 0.99
    MaxVision,
}

impl ModelTier {
    /// Fixed confidence assigned to results from this tier.
    pub fn confidence(&self) -> f64 {
        match self {
            ModelTier::Fast => 0.85,
            ModelTier::Premium => 0.95,
            ModelTier::MaxVision => 0.99,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Fast => "fast",
            ModelTier::Premium => "premium",
            ModelTier::MaxVision => "max-vision",
        }
    }
}

// ============================================================================
// Vision backend seam
// ============================================================================

/// Errors from the external multimodal service
#[derive(Debug, Error)]
pub enum VisionError {
    /// Transport failure, including request timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the service
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Abstract multimodal recognition capability
///
/// The shipped implementation is an OpenAI-style chat-completions client
/// ([`crate::services::vision_client::OpenAiVisionClient`]); tests script
/// this trait directly.
///
/// Both operations return the raw message content. Interpreting that
/// content (confidence assignment, JSON parsing, alias handling) is the
/// caller's concern.
#[async_trait::async_trait]
pub trait VisionBackend: Send + Sync {
    /// Free-form text recognition against the image at a quality tier.
    async fn recognize_text(&self, image: &[u8], quality: OcrQuality)
        -> Result<String, VisionError>;

    /// Structured extraction of the five metric fields at a model tier.
    ///
    /// `hint_text` is the best-effort OCR output, embedded in the prompt
    /// as a cross-check. The max-vision tier ignores it.
    async fn extract_structured(
        &self,
        image: &[u8],
        hint_text: &str,
        tier: ModelTier,
    ) -> Result<String, VisionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_complete_all_fields() {
        let partial = PartialMetrics {
            ball_speed: Some(150.2),
            launch_angle: Some(12.5),
            spin_rate: Some(2850.0),
            carry: Some(245.0),
            total: Some(268.0),
        };
        assert!(partial.is_complete());
    }

    #[test]
    fn test_partial_incomplete_missing_field() {
        let partial = PartialMetrics {
            ball_speed: Some(150.2),
            ..Default::default()
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_partial_zero_counts_as_missing() {
        // A genuine 0.0 reading still reads as incomplete
        let partial = PartialMetrics {
            ball_speed: Some(150.2),
            launch_angle: Some(0.0),
            spin_rate: Some(2850.0),
            carry: Some(245.0),
            total: Some(268.0),
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_into_metrics_defaults_missing_to_zero() {
        let partial = PartialMetrics {
            ball_speed: Some(150.2),
            ..Default::default()
        };
        let metrics = partial.into_metrics(0.9);
        assert_eq!(metrics.ball_speed, 150.2);
        assert_eq!(metrics.carry, 0.0);
        assert_eq!(metrics.confidence, 0.9);
        assert!(metrics.club.is_empty());
    }

    #[test]
    fn test_tier_confidences() {
        assert_eq!(OcrQuality::Standard.confidence(), 0.80);
        assert_eq!(OcrQuality::High.confidence(), 0.95);
        assert_eq!(ModelTier::Fast.confidence(), 0.85);
        assert_eq!(ModelTier::Premium.confidence(), 0.95);
        assert_eq!(ModelTier::MaxVision.confidence(), 0.99);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("dealer".parse::<UserRole>().unwrap(), UserRole::Dealer);
        assert_eq!("PRO".parse::<UserRole>().unwrap(), UserRole::Pro);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_metrics_wire_shape_is_camel_case() {
        let metrics = ShotMetrics {
            ball_speed: 150.2,
            launch_angle: 12.5,
            spin_rate: 2850.0,
            carry: 245.0,
            total: 268.0,
            club: "Driver".to_string(),
            confidence: 0.9,
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["ballSpeed"], 150.2);
        assert_eq!(json["launchAngle"], 12.5);
        assert_eq!(json["spinRate"], 2850.0);
    }
}
