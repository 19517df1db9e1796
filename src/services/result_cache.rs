//! Memoization cache for completed analyses
//!
//! Maps image fingerprint → finished [`ShotMetrics`]. Deliberately
//! unbounded: entries live for the life of the process with no TTL and no
//! eviction. There is also no single-flight guarantee - two concurrent
//! requests for the same unseen fingerprint both run the full ladder and
//! the later `put` wins.

use crate::types::ShotMetrics;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared fingerprint → metrics cache
///
/// Cheap to clone; clones share the same underlying map. Constructed once
/// and injected into the analyzer rather than living in ambient global
/// state.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    inner: Arc<RwLock<HashMap<String, ShotMetrics>>>,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a completed result by fingerprint
    pub async fn get(&self, fingerprint: &str) -> Option<ShotMetrics> {
        self.inner.read().await.get(fingerprint).cloned()
    }

    /// Store a completed result. An existing entry is overwritten.
    pub async fn put(&self, fingerprint: String, metrics: ShotMetrics) {
        self.inner.write().await.insert(fingerprint, metrics);
    }

    /// Number of cached results
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(confidence: f64) -> ShotMetrics {
        ShotMetrics {
            ball_speed: 150.0,
            launch_angle: 12.0,
            spin_rate: 2800.0,
            carry: 245.0,
            total: 268.0,
            club: "Driver".to_string(),
            confidence,
        }
    }

    #[tokio::test]
    async fn test_get_miss_returns_none() {
        let cache = ResultCache::new();
        assert!(cache.get("unseen").await.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = ResultCache::new();
        cache.put("fp-1".to_string(), metrics(0.9)).await;

        let hit = cache.get("fp-1").await.unwrap();
        assert_eq!(hit.confidence, 0.9);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = ResultCache::new();
        cache.put("fp-1".to_string(), metrics(0.85)).await;
        cache.put("fp-1".to_string(), metrics(0.99)).await;

        let hit = cache.get("fp-1").await.unwrap();
        assert_eq!(hit.confidence, 0.99);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = ResultCache::new();
        let clone = cache.clone();
        clone.put("fp-1".to_string(), metrics(0.9)).await;

        assert!(cache.get("fp-1").await.is_some());
    }
}
