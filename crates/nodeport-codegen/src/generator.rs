//! Section generator
//!
//! Builds the header, Declarations, Connections and Evaluations sections of
//! a `Program`. The Output Assembly section is left to `OutputResolver`.

use nodeport_core::{EvaluationOrder, Graph, Node};

use crate::error::{Error, Result};
use crate::identifier::Bindings;
use crate::ir::{Param, Program, RUNTIME_MODULE, RUNTIME_NAMESPACE, Statement, Warning};
use crate::mapping::TypeMapping;

/// Banner written at the top of every artifact
pub const BANNER: &str = "Auto-generated by nodeport";

/// Statement generator for one mapping profile
pub struct Generator<'m> {
    mapping: &'m TypeMapping,
    order: EvaluationOrder,
}

impl<'m> Generator<'m> {
    /// Create a generator using listing order for evaluations
    pub fn new(mapping: &'m TypeMapping) -> Self {
        Self {
            mapping,
            order: EvaluationOrder::Listing,
        }
    }

    /// Choose the order of the Evaluations section
    pub fn with_evaluation_order(mut self, order: EvaluationOrder) -> Self {
        self.order = order;
        self
    }

    /// Generate every section except Output Assembly
    pub fn generate(&self, graph: &Graph) -> Result<Program> {
        let mut bindings = Bindings::default();
        bindings.reserve(self.mapping.entries().map(|(_, construct)| construct));
        for node in graph.nodes().filter(|n| self.supported(n)) {
            bindings.insert(&node.name);
        }

        let mut program = Program {
            bindings,
            ..Default::default()
        };

        program.header = self.header(graph);
        self.declarations(graph, &mut program)?;
        self.connections(graph, &mut program)?;
        self.evaluations(graph, &mut program)?;

        tracing::debug!(
            "Generated {} declarations, {} connections, {} evaluations",
            program.bindings.len(),
            program.connections.len(),
            program.evaluations.len()
        );
        Ok(program)
    }

    fn supported(&self, node: &Node) -> bool {
        self.mapping.supports(&node.type_tag)
    }

    fn header(&self, graph: &Graph) -> Vec<Statement> {
        let mut header = vec![Statement::Comment(BANNER.to_string())];
        if !graph.name.is_empty() {
            header.push(Statement::Comment(format!("Node tree: {}", graph.name)));
        }
        header.push(Statement::Import {
            namespace: RUNTIME_NAMESPACE.to_string(),
            module: RUNTIME_MODULE.to_string(),
        });
        header
    }

    fn declarations(&self, graph: &Graph, program: &mut Program) -> Result<()> {
        for node in graph.nodes() {
            let Some(construct) = self.mapping.lookup(&node.type_tag) else {
                Program::warn(
                    &mut program.declarations,
                    &mut program.warnings,
                    Warning::UnsupportedNode {
                        name: node.name.clone(),
                        type_tag: node.type_tag.clone(),
                    },
                );
                continue;
            };

            let params = node
                .literals()
                .map(|(name, value)| Param {
                    name: name.to_string(),
                    value: value.clone(),
                })
                .collect();

            program.declarations.push(Statement::Construct {
                binding: binding(&program.bindings, &node.name)?,
                construct: construct.to_string(),
                params,
            });
        }
        Ok(())
    }

    fn connections(&self, graph: &Graph, program: &mut Program) -> Result<()> {
        for node in graph.nodes().filter(|n| self.supported(n)) {
            let consumer = binding(&program.bindings, &node.name)?;
            for (input, source) in node.connections() {
                let Some(producer) = program.bindings.get(&source.node) else {
                    tracing::debug!(
                        "Skipping link {}.{} -> {}.{}: source not declared",
                        source.node,
                        source.socket,
                        node.name,
                        input
                    );
                    continue;
                };
                program.connections.push(Statement::Connect {
                    consumer: consumer.clone(),
                    input: input.to_string(),
                    producer: producer.to_string(),
                    output: source.socket.clone(),
                });
            }
        }
        Ok(())
    }

    fn evaluations(&self, graph: &Graph, program: &mut Program) -> Result<()> {
        let nodes: Vec<&Node> = match self.order {
            EvaluationOrder::Listing => graph.nodes().filter(|n| self.supported(n)).collect(),
            EvaluationOrder::Topological => graph.topological_order(|n| self.supported(n))?,
        };

        for node in nodes {
            program.evaluations.push(Statement::Evaluate {
                binding: binding(&program.bindings, &node.name)?,
            });
        }
        Ok(())
    }
}

fn binding(bindings: &Bindings, name: &str) -> Result<String> {
    bindings
        .get(name)
        .map(str::to_string)
        .ok_or_else(|| Error::GenerationError(format!("no binding for node '{}'", name)))
}
