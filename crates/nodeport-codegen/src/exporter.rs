//! Export pipeline
//!
//! Host graph → normalized graph → statements → JavaScript text. Nothing
//! here touches the file system; callers decide where the text goes.

use nodeport_core::{Config, EvaluationOrder, Graph, HostGraph, extract};

use crate::error::Result;
use crate::generator::Generator;
use crate::ir::{Statement, Warning};
use crate::mapping::TypeMapping;
use crate::printer::JsPrinter;
use crate::resolver::OutputResolver;

/// Options for the exporter
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Order of the Evaluations section
    pub evaluation_order: EvaluationOrder,
}

/// Graph → JavaScript exporter
pub struct Exporter {
    mapping: TypeMapping,
    options: ExportOptions,
    printer: JsPrinter,
}

impl Exporter {
    /// Create a new exporter with the given mapping and options
    pub fn new(mapping: TypeMapping, options: ExportOptions) -> Self {
        Self {
            mapping,
            options,
            printer: JsPrinter::new(),
        }
    }

    /// Create an exporter from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TypeMapping::from_config(config),
            ExportOptions {
                evaluation_order: config.evaluation_order,
            },
        )
    }

    /// The active mapping profile
    pub fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    /// Extract a host graph and export it
    pub fn export(&self, host: Option<&dyn HostGraph>) -> Result<Artifact> {
        let graph = extract(host)?;
        self.export_graph(&graph)
    }

    /// Export an already normalized graph
    pub fn export_graph(&self, graph: &Graph) -> Result<Artifact> {
        tracing::info!(
            "Exporting '{}' ({} nodes, profile {})",
            graph.name,
            graph.len(),
            self.mapping.name()
        );

        let mut program = Generator::new(&self.mapping)
            .with_evaluation_order(self.options.evaluation_order)
            .generate(graph)?;
        OutputResolver::new(&self.mapping).resolve(graph, &mut program);

        let stats = ExportStats {
            nodes: graph.len(),
            declared: program.bindings.len(),
            connections: count(&program.connections, |s| matches!(s, Statement::Connect { .. })),
            evaluations: count(&program.evaluations, |s| matches!(s, Statement::Evaluate { .. })),
            assembled: program.has_assembly(),
        };

        let text = self.printer.render(&program);
        let hash = text_hash(&text);

        tracing::info!(
            "Exported '{}': {} declared, {} skipped, {} warnings",
            graph.name,
            stats.declared,
            stats.nodes - stats.declared,
            program.warnings.len()
        );

        Ok(Artifact {
            name: graph.name.clone(),
            text,
            hash,
            warnings: program.warnings,
            stats,
        })
    }
}

fn count(statements: &[Statement], pred: impl Fn(&Statement) -> bool) -> usize {
    statements.iter().filter(|s| pred(*s)).count()
}

fn text_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Counts describing one export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Nodes in the graph
    pub nodes: usize,
    /// Nodes with a declaration
    pub declared: usize,
    /// Connection statements
    pub connections: usize,
    /// Evaluation statements
    pub evaluations: usize,
    /// Whether scene assembly was emitted
    pub assembled: bool,
}

/// A generated JavaScript module
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Node tree name
    pub name: String,

    /// Generated source text
    pub text: String,

    /// SHA-256 of `text`
    pub hash: String,

    /// Recoverable conditions; each also appears as a comment in `text`
    pub warnings: Vec<Warning>,

    /// Section counts
    pub stats: ExportStats,
}

impl Artifact {
    /// Size of the generated text in bytes
    pub fn size(&self) -> usize {
        self.text.len()
    }

    /// Whether the export finished without inline warnings
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
