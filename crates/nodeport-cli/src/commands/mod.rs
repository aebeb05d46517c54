//! CLI command implementations

pub mod export;
pub mod extract;
pub mod mappings;
pub mod validate;

use anyhow::{Context, Result};
use nodeport_core::{Config, GraphSnapshot};
use std::path::Path;

/// Load a mapping profile, or the built-in one when no path is given
pub(crate) fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            Config::load(path).context("Failed to load configuration")
        }
        None => {
            tracing::debug!("No configuration given, using built-in profile");
            Ok(Config::default())
        }
    }
}

/// Read a snapshot file. A `null` or empty document yields `None`.
pub(crate) async fn load_snapshot(path: &Path) -> Result<Option<GraphSnapshot>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    GraphSnapshot::from_json(&text)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}
