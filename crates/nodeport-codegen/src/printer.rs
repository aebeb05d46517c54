//! JavaScript printer
//!
//! Renders a `Program` section by section. Sections are separated by a blank
//! line; Connections and Evaluations get a heading comment.

use crate::ir::{Program, RUNTIME_NAMESPACE, Statement};
use crate::literal;

/// Characters that end a JavaScript line comment
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Renders programs as JavaScript modules
#[derive(Debug, Clone, Default)]
pub struct JsPrinter;

impl JsPrinter {
    /// Create a printer
    pub fn new() -> Self {
        Self
    }

    /// Render a whole program. Output always ends with a newline.
    pub fn render(&self, program: &Program) -> String {
        let mut lines: Vec<String> = Vec::new();

        self.push_all(&mut lines, &program.header);
        lines.push(String::new());

        self.push_all(&mut lines, &program.declarations);
        lines.push(String::new());

        lines.push(self.statement(&Statement::Comment("Connect Nodes".to_string())));
        self.push_all(&mut lines, &program.connections);
        lines.push(String::new());

        lines.push(self.statement(&Statement::Comment("Compute Nodes".to_string())));
        self.push_all(&mut lines, &program.evaluations);
        lines.push(String::new());

        self.push_all(&mut lines, &program.assembly);

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn push_all(&self, lines: &mut Vec<String>, statements: &[Statement]) {
        lines.extend(statements.iter().map(|s| self.statement(s)));
    }

    /// Render one statement as a single line
    pub fn statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::Comment(text) => format!("// {}", text.replace(LINE_TERMINATORS, " ")),
            Statement::Blank => String::new(),
            Statement::Import { namespace, module } => {
                format!("import * as {} from {};", namespace, literal::string(module))
            }
            Statement::Construct {
                binding,
                construct,
                params,
            } => {
                let params: Vec<String> = params
                    .iter()
                    .map(|p| format!("{}: {}", literal::key(&p.name), literal::value(&p.value)))
                    .collect();
                format!(
                    "const {} = new {}({{{}}});",
                    binding,
                    construct,
                    params.join(", ")
                )
            }
            Statement::Connect {
                consumer,
                input,
                producer,
                output,
            } => format!(
                "{}.connectInput({}, {}, {});",
                consumer,
                literal::string(input),
                producer,
                literal::string(output)
            ),
            Statement::Evaluate { binding } => format!("{}.compute();", binding),
            Statement::ExtractResult { binding, node } => {
                format!("const {} = {}.getOutput();", binding, node)
            }
            Statement::NewScene { binding } => {
                format!("const {} = new {}.Scene();", binding, RUNTIME_NAMESPACE)
            }
            Statement::NewMaterial { binding, color } => format!(
                "const {} = new {}.MeshBasicMaterial({{ color: {} }});",
                binding,
                RUNTIME_NAMESPACE,
                literal::color(*color)
            ),
            Statement::NewMesh {
                binding,
                geometry,
                material,
            } => format!(
                "const {} = new {}.Mesh({}, {});",
                binding, RUNTIME_NAMESPACE, geometry, material
            ),
            Statement::Attach { container, object } => format!("{}.add({});", container, object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Param;
    use nodeport_core::Value;
    use rstest::rstest;

    #[test]
    fn test_construct_line() {
        let line = JsPrinter::new().statement(&Statement::Construct {
            binding: "Grid".to_string(),
            construct: "PlaneGeometryNode".to_string(),
            params: vec![
                Param {
                    name: "size".to_string(),
                    value: Value::Float(2.0),
                },
                Param {
                    name: "Size X".to_string(),
                    value: Value::Int(4),
                },
            ],
        });
        assert_eq!(line, "const Grid = new PlaneGeometryNode({size: 2.0, 'Size X': 4});");
    }

    #[test]
    fn test_construct_without_params() {
        let line = JsPrinter::new().statement(&Statement::Construct {
            binding: "Out".to_string(),
            construct: "GroupOutputNode".to_string(),
            params: vec![],
        });
        assert_eq!(line, "const Out = new GroupOutputNode({});");
    }

    #[test]
    fn test_connect_line() {
        let line = JsPrinter::new().statement(&Statement::Connect {
            consumer: "Out".to_string(),
            input: "Geometry".to_string(),
            producer: "Grid".to_string(),
            output: "Mesh".to_string(),
        });
        assert_eq!(line, "Out.connectInput('Geometry', Grid, 'Mesh');");
    }

    #[test]
    fn test_assembly_lines() {
        let printer = JsPrinter::new();
        assert_eq!(
            printer.statement(&Statement::NewMaterial {
                binding: "material".to_string(),
                color: 0x00ff00,
            }),
            "const material = new THREE.MeshBasicMaterial({ color: 0x00ff00 });"
        );
        assert_eq!(
            printer.statement(&Statement::NewMesh {
                binding: "mesh".to_string(),
                geometry: "finalGeometry".to_string(),
                material: "material".to_string(),
            }),
            "const mesh = new THREE.Mesh(finalGeometry, material);"
        );
        assert_eq!(
            printer.statement(&Statement::Attach {
                container: "scene".to_string(),
                object: "mesh".to_string(),
            }),
            "scene.add(mesh);"
        );
    }

    #[rstest]
    #[case("a\nb")]
    #[case("a\rb")]
    #[case("a\u{2028}b")]
    #[case("a\u{2029}b")]
    fn test_comment_stays_on_one_line(#[case] text: &str) {
        let line = JsPrinter::new().statement(&Statement::Comment(text.to_string()));
        assert_eq!(line, "// a b");
    }

    #[test]
    fn test_comment_with_crlf_and_code() {
        let line = JsPrinter::new().statement(&Statement::Comment(
            "Unsupported node type: X (Y\r\nalert();)".to_string(),
        ));
        assert_eq!(line, "// Unsupported node type: X (Y  alert();)");
    }

    #[test]
    fn test_empty_program_layout() {
        let text = JsPrinter::new().render(&Program::default());
        assert_eq!(text, "\n\n// Connect Nodes\n\n// Compute Nodes\n\n");
    }
}
