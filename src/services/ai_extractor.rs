//! Structured metrics extraction via the vision model tiers
//!
//! Asks the backend for a single JSON object with the five numeric fields
//! and interprets the response: tolerant field-name aliases, missing
//! fields defaulting to 0.0, and a fixed per-tier confidence. The fast and
//! premium tiers propagate unparseable responses; the max-vision tier
//! catches any failure and downgrades one tier instead.

use crate::types::{ModelTier, ShotMetrics, VisionBackend, VisionError};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

/// Structured extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The backend call itself failed
    #[error("Vision backend error: {0}")]
    Backend(#[from] VisionError),

    /// The model did not return a parseable JSON object
    #[error("Model returned unparseable metrics: {0}")]
    Unparseable(String),
}

/// Accepted field-name aliases, checked in order
const BALL_SPEED_KEYS: &[&str] = &["ballSpeed", "ball_speed"];
const LAUNCH_ANGLE_KEYS: &[&str] = &["launchAngle", "launch_angle", "launch"];
const SPIN_RATE_KEYS: &[&str] = &["spinRate", "spin_rate", "spin"];
const CARRY_KEYS: &[&str] = &["carry", "carryDistance", "carry_distance"];
const TOTAL_KEYS: &[&str] = &["total", "totalDistance", "total_distance"];

/// Extract metrics from the image at the given model tier.
///
/// The returned metrics carry the tier's fixed confidence and an empty
/// club label (filled later by the analyzer).
pub async fn extract(
    backend: &dyn VisionBackend,
    image: &[u8],
    hint_text: &str,
    tier: ModelTier,
) -> Result<ShotMetrics, ExtractionError> {
    match tier {
        ModelTier::Fast | ModelTier::Premium => extract_at(backend, image, hint_text, tier).await,
        ModelTier::MaxVision => match max_vision_attempt(backend, image).await {
            Ok(metrics) => Ok(metrics),
            Err(e) => {
                // The one retry path in the system: the max tier downgrades
                // to premium with an empty hint instead of propagating.
                warn!(error = %e, "Max-vision extraction failed, downgrading to premium tier");
                extract_at(backend, image, "", ModelTier::Premium).await
            }
        },
    }
}

/// Single-tier extraction with fail-fast semantics (fast and premium).
async fn extract_at(
    backend: &dyn VisionBackend,
    image: &[u8],
    hint_text: &str,
    tier: ModelTier,
) -> Result<ShotMetrics, ExtractionError> {
    let content = backend.extract_structured(image, hint_text, tier).await?;

    // An empty response reads as an empty object: all-zero metrics that
    // fail the completeness check downstream.
    let content = content.trim();
    let content = if content.is_empty() { "{}" } else { content };

    let value: Value =
        serde_json::from_str(content).map_err(|e| ExtractionError::Unparseable(e.to_string()))?;

    Ok(metrics_from_value(&value, tier))
}

/// Max-vision extraction: the model answers in prose, so recover the first
/// JSON object from the response body.
async fn max_vision_attempt(
    backend: &dyn VisionBackend,
    image: &[u8],
) -> Result<ShotMetrics, ExtractionError> {
    let content = backend
        .extract_structured(image, "", ModelTier::MaxVision)
        .await?;

    let blob = json_blob(&content).unwrap_or("{}");
    let value: Value =
        serde_json::from_str(blob).map_err(|e| ExtractionError::Unparseable(e.to_string()))?;

    Ok(metrics_from_value(&value, ModelTier::MaxVision))
}

fn json_blob(content: &str) -> Option<&str> {
    static BLOB: OnceLock<Regex> = OnceLock::new();
    let re = BLOB.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("blob pattern is valid"));
    re.find(content).map(|m| m.as_str())
}

fn metrics_from_value(value: &Value, tier: ModelTier) -> ShotMetrics {
    ShotMetrics {
        ball_speed: numeric_field(value, BALL_SPEED_KEYS),
        launch_angle: numeric_field(value, LAUNCH_ANGLE_KEYS),
        spin_rate: numeric_field(value, SPIN_RATE_KEYS),
        carry: numeric_field(value, CARRY_KEYS),
        total: numeric_field(value, TOTAL_KEYS),
        club: String::new(),
        confidence: tier.confidence(),
    }
}

fn numeric_field(value: &Value, keys: &[&str]) -> f64 {
    keys.iter()
        .find_map(|k| value.get(k).and_then(Value::as_f64))
        .unwrap_or(0.0)
}
