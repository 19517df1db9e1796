//! Configuration resolution for the shot analyzer
//!
//! Two-tier resolution with ENV → TOML priority. The vision API key is
//! resolved at startup; model identifiers, endpoint, and timeout come from
//! the TOML file with compiled defaults as fallback.

use crate::error::{AnalyzerError, AnalyzerResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the vision API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Model identifiers for the three extraction tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCatalog {
    /// Fast/mini tier model
    pub fast: String,
    /// Standard-premium tier model
    pub premium: String,
    /// Maximum-accuracy vision tier model
    pub vision: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            fast: "gpt-4o-mini".to_string(),
            premium: "gpt-4o".to_string(),
            vision: "gpt-4-vision-preview".to_string(),
        }
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Vision API key (ENV takes priority over this field)
    pub api_key: Option<String>,
    /// Chat-completions endpoint base URL
    pub base_url: String,
    /// Bounded per-request timeout; expiry is the same failure class as a
    /// transport error
    pub request_timeout_secs: u64,
    /// Per-tier model identifiers
    pub models: ModelCatalog,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 30,
            models: ModelCatalog::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file.
    ///
    /// An explicit path must exist and parse; the default platform path
    /// (`<config dir>/shot-analyzer/config.toml`) is used only if present,
    /// otherwise compiled defaults apply.
    pub fn load(explicit_path: Option<&Path>) -> AnalyzerResult<Self> {
        let path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_config_path().filter(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Config(format!("Parse {} failed: {}", path.display(), e)))?;

        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Default platform config path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shot-analyzer").join("config.toml"))
    }

    /// Resolve the vision API key with ENV → TOML priority.
    ///
    /// Warns when multiple sources define a key (potential misconfiguration).
    pub fn resolve_api_key(&self) -> AnalyzerResult<String> {
        let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| is_valid_key(k));
        let toml_key = self.api_key.clone().filter(|k| is_valid_key(k));

        if env_key.is_some() && toml_key.is_some() {
            warn!(
                "Vision API key found in both environment and TOML config. \
                 Using environment (highest priority)."
            );
        }

        if let Some(key) = env_key {
            info!("Vision API key loaded from environment variable");
            return Ok(key);
        }

        if let Some(key) = toml_key {
            info!("Vision API key loaded from TOML config");
            return Ok(key);
        }

        Err(AnalyzerError::Config(format!(
            "Vision API key not configured. Please configure using one of:\n\
             1. Environment: {}=your-key-here\n\
             2. TOML config: api_key = \"your-key\" (default path: {})",
            API_KEY_ENV,
            Self::default_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unavailable".to_string()),
        )))
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
