//! nodeport CLI
//!
//! Exports node graph snapshots to three.js modules.

use anyhow::Result;
use clap::{Parser, Subcommand};
use nodeport_core::EvaluationOrder;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// nodeport - node graph to three.js exporter
#[derive(Parser)]
#[command(name = "nodeport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one snapshot to JavaScript
    Export {
        /// Snapshot file (JSON)
        snapshot: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Mapping profile (nodeport.yaml or its directory)
        #[arg(short, long, env = "NODEPORT_CONFIG")]
        config: Option<String>,

        /// Evaluation order: listing or topological
        #[arg(long)]
        order: Option<EvaluationOrder>,
    },

    /// Export every snapshot under a directory
    ExportAll {
        /// Directory to search for *.json snapshots
        dir: String,

        /// Where to write the modules (defaults to the snapshot directory)
        #[arg(long)]
        out_dir: Option<String>,

        /// Mapping profile (nodeport.yaml or its directory)
        #[arg(short, long, env = "NODEPORT_CONFIG")]
        config: Option<String>,
    },

    /// Print the normalized graph of a snapshot as JSON
    Extract {
        /// Snapshot file (JSON)
        snapshot: String,
    },

    /// Check that a snapshot exports, without writing anything
    Validate {
        /// Snapshot file (JSON)
        snapshot: String,

        /// Mapping profile (nodeport.yaml or its directory)
        #[arg(short, long, env = "NODEPORT_CONFIG")]
        config: Option<String>,
    },

    /// List the active type mapping
    Mappings {
        /// Mapping profile (nodeport.yaml or its directory)
        #[arg(short, long, env = "NODEPORT_CONFIG")]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for generated output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Export {
            snapshot,
            output,
            config,
            order,
        } => {
            commands::export::run(&snapshot, output.as_deref(), config.as_deref(), order).await?;
        }
        Commands::ExportAll {
            dir,
            out_dir,
            config,
        } => {
            commands::export::run_all(&dir, out_dir.as_deref(), config.as_deref()).await?;
        }
        Commands::Extract { snapshot } => {
            commands::extract::run(&snapshot).await?;
        }
        Commands::Validate { snapshot, config } => {
            commands::validate::run(&snapshot, config.as_deref()).await?;
        }
        Commands::Mappings { config } => {
            commands::mappings::run(config.as_deref()).await?;
        }
    }

    Ok(())
}
