//! Validate a snapshot without writing output

use anyhow::Result;
use nodeport_codegen::Exporter;
use std::path::Path;

/// Run the validate command
pub async fn run(snapshot: &str, config_path: Option<&str>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let exporter = Exporter::from_config(&config);

    let artifact = super::export::export_file(&exporter, Path::new(snapshot)).await?;
    let stats = artifact.stats;

    tracing::info!("✓ Node tree: {}", artifact.name);
    tracing::info!("✓ Nodes: {} ({} supported)", stats.nodes, stats.declared);
    tracing::info!("✓ Connections: {}", stats.connections);
    if stats.assembled {
        tracing::info!("✓ Scene assembled");
    }

    for warning in &artifact.warnings {
        println!("warning: {}", warning);
    }

    if artifact.is_clean() {
        println!("{}: ok", snapshot);
    } else {
        println!("{}: ok ({} warnings)", snapshot, artifact.warnings.len());
    }
    Ok(())
}
