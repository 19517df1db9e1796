//! Service modules for the shot analysis pipeline
//!
//! Listed leaf-first: the analyzer at the bottom orchestrates everything
//! above it.

pub mod fingerprinter;
pub mod result_cache;
pub mod vision_client;
pub mod text_extractor;
pub mod metrics_parser;
pub mod ai_extractor;
pub mod escalator;
pub mod club_inferencer;
pub mod analyzer;

pub use ai_extractor::ExtractionError;
pub use analyzer::ShotAnalyzer;
pub use club_inferencer::infer_club;
pub use metrics_parser::MetricsParser;
pub use result_cache::ResultCache;
pub use vision_client::OpenAiVisionClient;
