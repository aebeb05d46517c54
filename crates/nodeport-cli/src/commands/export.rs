//! Export snapshots to JavaScript

use anyhow::{Context, Result};
use nodeport_codegen::{Artifact, Exporter};
use nodeport_core::{EvaluationOrder, HostGraph};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Run the export command
pub async fn run(
    snapshot: &str,
    output: Option<&str>,
    config_path: Option<&str>,
    order: Option<EvaluationOrder>,
) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(order) = order {
        config.evaluation_order = order;
    }
    let exporter = Exporter::from_config(&config);

    let artifact = export_file(&exporter, Path::new(snapshot)).await?;

    match output {
        Some(path) => write_artifact(&artifact, Path::new(path)).await?,
        None => print!("{}", artifact.text),
    }

    Ok(())
}

/// Run the export-all command
pub async fn run_all(dir: &str, out_dir: Option<&str>, config_path: Option<&str>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let exporter = Exporter::from_config(&config);

    let root = Path::new(dir);
    let out_root = out_dir.map(PathBuf::from).unwrap_or_else(|| root.to_path_buf());
    let snapshots = find_snapshots(root)?;
    if snapshots.is_empty() {
        anyhow::bail!("No snapshots found in {}", root.display());
    }

    tracing::info!("Exporting {} snapshots from {}", snapshots.len(), root.display());

    let mut failed = 0;
    for path in &snapshots {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let target = out_root.join(relative).with_extension("js");

        match export_file(&exporter, path).await {
            Ok(artifact) => write_artifact(&artifact, &target).await?,
            Err(e) => {
                tracing::error!("✗ {}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} exports failed", failed, snapshots.len());
    }

    tracing::info!("Export complete");
    Ok(())
}

/// Snapshot files under `root`, sorted by path
fn find_snapshots(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

pub(crate) async fn export_file(exporter: &Exporter, path: &Path) -> Result<Artifact> {
    tracing::info!("Exporting {}", path.display());

    let snapshot = super::load_snapshot(path).await?;
    exporter
        .export(snapshot.as_ref().map(|s| s as &dyn HostGraph))
        .with_context(|| format!("Export failed for {}", path.display()))
}

async fn write_artifact(artifact: &Artifact, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, &artifact.text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(
        "✓ {} → {} ({} bytes, {} warnings, hash: {}...)",
        artifact.name,
        path.display(),
        artifact.size(),
        artifact.warnings.len(),
        &artifact.hash[..8]
    );
    Ok(())
}
