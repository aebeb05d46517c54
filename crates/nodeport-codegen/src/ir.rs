//! Statement AST
//!
//! The generator and resolver build a `Program`; the printer is the only
//! place that knows JavaScript syntax.

use std::fmt;

use nodeport_core::Value;

use crate::identifier::Bindings;

/// Namespace the runtime module is imported under
pub const RUNTIME_NAMESPACE: &str = "THREE";

/// Module specifier of the runtime library
pub const RUNTIME_MODULE: &str = "three";

/// Binding that holds the output node's computed geometry
pub const RESULT_BINDING: &str = "finalGeometry";

/// Binding of the scene container
pub const SCENE_BINDING: &str = "scene";

/// Binding of the default material
pub const MATERIAL_BINDING: &str = "material";

/// Binding of the renderable mesh
pub const MESH_BINDING: &str = "mesh";

/// Color of the default material
pub const MATERIAL_COLOR: u32 = 0x00ff00;

/// A constructor parameter taken from an unconnected input socket
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Socket name
    pub name: String,
    /// Socket default value
    pub value: Value,
}

/// One emitted statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Line comment
    Comment(String),

    /// Empty line
    Blank,

    /// Namespace import of the runtime module
    Import {
        /// Local namespace name
        namespace: String,
        /// Module specifier
        module: String,
    },

    /// `const binding = new Construct({params})`
    Construct {
        /// Variable bound to the node instance
        binding: String,
        /// Target construct from the mapping table
        construct: String,
        /// Unconnected input sockets in declared order
        params: Vec<Param>,
    },

    /// `consumer.connectInput(input, producer, output)`
    Connect {
        /// Binding of the consuming node
        consumer: String,
        /// Input socket name on the consumer
        input: String,
        /// Binding of the producing node
        producer: String,
        /// Output socket name on the producer
        output: String,
    },

    /// `binding.compute()`
    Evaluate {
        /// Binding of the node to evaluate
        binding: String,
    },

    /// `const binding = node.getOutput()`
    ExtractResult {
        /// Variable receiving the result
        binding: String,
        /// Binding of the output node
        node: String,
    },

    /// `const binding = new THREE.Scene()`
    NewScene {
        /// Scene variable
        binding: String,
    },

    /// `const binding = new THREE.MeshBasicMaterial({ color })`
    NewMaterial {
        /// Material variable
        binding: String,
        /// RGB color
        color: u32,
    },

    /// `const binding = new THREE.Mesh(geometry, material)`
    NewMesh {
        /// Mesh variable
        binding: String,
        /// Geometry variable
        geometry: String,
        /// Material variable
        material: String,
    },

    /// `container.add(object)`
    Attach {
        /// Container variable
        container: String,
        /// Object variable
        object: String,
    },
}

/// A recoverable condition reported inline and to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Node type has no mapping; the node was left out
    UnsupportedNode {
        /// Node name
        name: String,
        /// Node-type tag
        type_tag: String,
    },

    /// No node of the output type exists
    NoOutputNode {
        /// Output type that was searched for
        output_type: String,
    },

    /// An output-type node exists but its type has no mapping
    UnsupportedOutputNode {
        /// Node name
        name: String,
    },

    /// More than one output-type node; the first one was used
    ExtraOutputNode {
        /// Ignored node
        name: String,
        /// Node that was used
        chosen: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedNode { name, type_tag } => {
                write!(f, "Unsupported node type: {} ({})", type_tag, name)
            }
            Warning::NoOutputNode { output_type } => {
                write!(f, "No output node found ({}).", output_type)
            }
            Warning::UnsupportedOutputNode { name } => {
                write!(f, "Output node {} has an unsupported type; scene not assembled.", name)
            }
            Warning::ExtraOutputNode { name, chosen } => {
                write!(f, "Ignoring extra output node {} (using {}).", name, chosen)
            }
        }
    }
}

/// A generated program, section by section
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Banner and imports
    pub header: Vec<Statement>,

    /// Node constructions and unsupported-node markers
    pub declarations: Vec<Statement>,

    /// Input wiring
    pub connections: Vec<Statement>,

    /// Compute calls
    pub evaluations: Vec<Statement>,

    /// Final result extraction and scene assembly
    pub assembly: Vec<Statement>,

    /// Node name → binding for every declared node
    pub bindings: Bindings,

    /// Recoverable conditions, in the order they were found
    pub warnings: Vec<Warning>,
}

impl Program {
    /// Record a warning and mirror it as an inline comment in `section`
    pub fn warn(section: &mut Vec<Statement>, warnings: &mut Vec<Warning>, warning: Warning) {
        tracing::warn!("{}", warning);
        section.push(Statement::Comment(warning.to_string()));
        warnings.push(warning);
    }

    /// Whether scene assembly statements were produced
    pub fn has_assembly(&self) -> bool {
        self.assembly
            .iter()
            .any(|s| matches!(s, Statement::ExtractResult { .. }))
    }
}
