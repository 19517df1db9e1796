//! Shot analysis pipeline
//!
//! The sole external entry point: fingerprint → cache check → escalation
//! ladder → club inference → cache store → return. Every other stage is a
//! private collaborator invoked only from here.

use crate::error::AnalyzerResult;
use crate::services::club_inferencer::infer_club;
use crate::services::metrics_parser::MetricsParser;
use crate::services::result_cache::ResultCache;
use crate::services::{escalator, fingerprinter};
use crate::types::{AnalyzerOptions, ShotMetrics, VisionBackend};
use std::sync::Arc;
use tracing::{debug, info};

/// Launch-monitor shot analyzer
///
/// Constructed once with an injected backend and cache, then cloned into
/// whatever tasks need it - clones share the cache. Within one `analyze`
/// call every external call is awaited sequentially; concurrent calls
/// share only the cache, with no single-flight dedup (see
/// [`ResultCache`]).
#[derive(Clone)]
pub struct ShotAnalyzer {
    backend: Arc<dyn VisionBackend>,
    cache: ResultCache,
    parser: MetricsParser,
}

impl ShotAnalyzer {
    /// Create an analyzer with a fresh cache.
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self::with_cache(backend, ResultCache::new())
    }

    /// Create an analyzer sharing an existing cache.
    pub fn with_cache(backend: Arc<dyn VisionBackend>, cache: ResultCache) -> Self {
        Self {
            backend,
            cache,
            parser: MetricsParser::new(),
        }
    }

    /// Analyze a launch-monitor photograph into complete shot metrics.
    ///
    /// No image validation happens here - format, size, and corruption
    /// checks are the caller's responsibility. Either a complete
    /// `ShotMetrics` comes back or the whole call fails; no partial
    /// results cross this boundary.
    pub async fn analyze(
        &self,
        image: &[u8],
        options: &AnalyzerOptions,
    ) -> AnalyzerResult<ShotMetrics> {
        let fingerprint = fingerprinter::fingerprint(image);

        if let Some(cached) = self.cache.get(&fingerprint).await {
            debug!(fingerprint = %fingerprint, "Cache hit, returning stored metrics");
            return Ok(cached);
        }

        let mut metrics = escalator::run(self.backend.as_ref(), &self.parser, image, options).await?;
        metrics.club = infer_club(&metrics).to_string();

        info!(
            role = options.user_role.as_str(),
            club = %metrics.club,
            confidence = metrics.confidence,
            "Shot analysis complete"
        );

        self.cache.put(fingerprint, metrics.clone()).await;
        Ok(metrics)
    }
}
