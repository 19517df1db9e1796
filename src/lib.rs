//! shot-analyzer - Launch monitor shot analysis engine
//!
//! Extracts structured performance metrics (ball speed, launch angle,
//! spin rate, carry, total) from a photograph of a golf launch-monitor
//! display, then derives a club label. A multi-stage extraction pipeline
//! trades cost against accuracy: fingerprint memoization, cheap regex
//! parsing over recognized text, then tiered vision-model extraction
//! gated by fixed confidence thresholds.
//!
//! The upstream request handler owns authentication, credits, and
//! persistence; this crate exposes a single operation,
//! [`ShotAnalyzer::analyze`].

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use crate::config::AnalyzerConfig;
pub use crate::error::{AnalyzerError, AnalyzerResult};
pub use crate::services::{OpenAiVisionClient, ShotAnalyzer};
pub use crate::types::{AnalyzerOptions, ShotMetrics, UserRole, VisionBackend};
