//! Print the normalized graph of a snapshot

use anyhow::{Context, Result};
use nodeport_core::{HostGraph, extract};
use std::path::Path;

/// Run the extract command
pub async fn run(snapshot: &str) -> Result<()> {
    let path = Path::new(snapshot);
    let host = super::load_snapshot(path).await?;

    let graph = extract(host.as_ref().map(|s| s as &dyn HostGraph))
        .with_context(|| format!("Extraction failed for {}", path.display()))?;

    tracing::info!(
        "Extracted '{}' ({} nodes, hash: {}...)",
        graph.name,
        graph.len(),
        &graph.content_hash()[..8]
    );

    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}
