//! Error types for the shot analysis engine

use crate::services::ai_extractor::ExtractionError;
use thiserror::Error;

/// Result type for analyzer operations
pub type AnalyzerResult<T> = std::result::Result<T, AnalyzerError>;

/// Any failure surfacing out of [`crate::services::analyzer::ShotAnalyzer::analyze`]
///
/// No partial results ever cross the analyze boundary: the caller gets a
/// complete `ShotMetrics` or one of these.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Structured extraction failed at a non-recoverable tier
    #[error("Metrics extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
