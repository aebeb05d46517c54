//! Output resolver
//!
//! Finds the terminal node and appends the Output Assembly section: pull the
//! computed geometry out of it and put it in a scene as a mesh.

use nodeport_core::Graph;

use crate::ir::{
    MATERIAL_BINDING, MATERIAL_COLOR, MESH_BINDING, Program, RESULT_BINDING, SCENE_BINDING,
    Statement, Warning,
};
use crate::mapping::TypeMapping;

/// Appends the Output Assembly section to a generated program
pub struct OutputResolver<'m> {
    mapping: &'m TypeMapping,
}

impl<'m> OutputResolver<'m> {
    /// Create a resolver for a mapping profile
    pub fn new(mapping: &'m TypeMapping) -> Self {
        Self { mapping }
    }

    /// Resolve the output node of `graph` into `program.assembly`.
    ///
    /// The first output-type node in listing order wins. Missing or
    /// unsupported output nodes leave a marker comment instead of assembly.
    pub fn resolve(&self, graph: &Graph, program: &mut Program) {
        let mut candidates = graph
            .nodes()
            .filter(|n| self.mapping.is_output(&n.type_tag));

        let Some(chosen) = candidates.next() else {
            Program::warn(
                &mut program.assembly,
                &mut program.warnings,
                Warning::NoOutputNode {
                    output_type: self.mapping.output_type().to_string(),
                },
            );
            return;
        };

        for extra in candidates {
            Program::warn(
                &mut program.assembly,
                &mut program.warnings,
                Warning::ExtraOutputNode {
                    name: extra.name.clone(),
                    chosen: chosen.name.clone(),
                },
            );
        }

        let Some(node) = program.bindings.get(&chosen.name).map(str::to_string) else {
            Program::warn(
                &mut program.assembly,
                &mut program.warnings,
                Warning::UnsupportedOutputNode {
                    name: chosen.name.clone(),
                },
            );
            return;
        };

        tracing::debug!("Assembling scene from output node '{}'", chosen.name);
        program.assembly.extend(assembly(node));
    }
}

fn assembly(node: String) -> Vec<Statement> {
    vec![
        Statement::Comment("Get Final Geometry".to_string()),
        Statement::ExtractResult {
            binding: RESULT_BINDING.to_string(),
            node,
        },
        Statement::Blank,
        Statement::Comment("Create Mesh and Add to Scene".to_string()),
        Statement::NewScene {
            binding: SCENE_BINDING.to_string(),
        },
        Statement::NewMaterial {
            binding: MATERIAL_BINDING.to_string(),
            color: MATERIAL_COLOR,
        },
        Statement::NewMesh {
            binding: MESH_BINDING.to_string(),
            geometry: RESULT_BINDING.to_string(),
            material: MATERIAL_BINDING.to_string(),
        },
        Statement::Attach {
            container: SCENE_BINDING.to_string(),
            object: MESH_BINDING.to_string(),
        },
    ]
}
