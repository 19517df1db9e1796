//! shot-analyzer - one-shot CLI
//!
//! Diagnostic surface for the analysis engine: reads an image file, runs
//! the full pipeline against the configured vision endpoint, and prints
//! the resulting metrics as JSON. Transport, authentication, and credit
//! accounting live upstream and are deliberately absent here.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shot_analyzer::types::AnalyzerOptions;
use shot_analyzer::{AnalyzerConfig, OpenAiVisionClient, ShotAnalyzer, UserRole};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shot-analyzer", about = "Analyze a launch monitor photograph")]
struct Args {
    /// Path to the shot image (JPEG/PNG)
    image: PathBuf,

    /// Caller role: free, pro, or dealer
    #[arg(long, default_value = "free", env = "SHOT_ANALYZER_ROLE")]
    role: UserRoleArg,

    /// Force the premium escalation ladder regardless of role
    #[arg(long)]
    high_accuracy: bool,

    /// Path to a TOML config file (default: platform config dir)
    #[arg(long, env = "SHOT_ANALYZER_CONFIG")]
    config: Option<PathBuf>,
}

/// clap-side role so the library type stays free of CLI concerns
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UserRoleArg {
    Free,
    Pro,
    Dealer,
}

impl From<UserRoleArg> for UserRole {
    fn from(role: UserRoleArg) -> Self {
        match role {
            UserRoleArg::Free => UserRole::Free,
            UserRoleArg::Pro => UserRole::Pro,
            UserRoleArg::Dealer => UserRole::Dealer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Starting shot-analyzer");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = AnalyzerConfig::load(args.config.as_deref())?;
    let api_key = config.resolve_api_key()?;

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    info!("Image: {} ({} bytes)", args.image.display(), image.len());

    let backend = OpenAiVisionClient::new(api_key, &config)
        .map_err(|e| anyhow::anyhow!("Failed to create vision client: {}", e))?;
    let analyzer = ShotAnalyzer::new(Arc::new(backend));

    let options = AnalyzerOptions {
        user_role: args.role.into(),
        force_high_accuracy: args.high_accuracy,
    };

    let metrics = analyzer.analyze(&image, &options).await?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    Ok(())
}
