//! Node name → JavaScript binding
//!
//! Host node names are free text ("Group Output", "Transform.001"). Each
//! declared node gets a distinct, valid identifier; names that already are
//! one are kept as-is.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::ir::{
    MATERIAL_BINDING, MESH_BINDING, RESULT_BINDING, RUNTIME_NAMESPACE, SCENE_BINDING,
};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"));

static INVALID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_$]").expect("valid character class regex"));

/// Names a binding may not take: JavaScript reserved words plus the
/// bindings used by scene assembly
static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
        "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
        "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
        "null", "package", "private", "protected", "public", "return", "static", "super",
        "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
        "yield", "undefined", "NaN", "Infinity", "arguments", "eval",
        RUNTIME_NAMESPACE, RESULT_BINDING, SCENE_BINDING, MATERIAL_BINDING, MESH_BINDING,
    ]
    .into_iter()
    .collect()
});

/// Whether `name` can be used verbatim as a JavaScript identifier
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Turn free text into a valid identifier (not yet checked for collisions)
pub fn sanitize(name: &str) -> String {
    let mut ident = INVALID_CHARS.replace_all(name, "_").into_owned();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Binding table for one program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    by_node: IndexMap<String, String>,
    taken: HashSet<String>,
}

impl Bindings {
    /// Assign bindings to node names, first come first served
    pub fn assign<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut bindings = Self::default();
        for name in names {
            bindings.insert(name);
        }
        bindings
    }

    /// Mark identifiers as unavailable to nodes, such as the construct names
    /// the generated module refers to
    pub fn reserve<'a>(&mut self, identifiers: impl IntoIterator<Item = &'a str>) {
        self.taken.extend(identifiers.into_iter().map(str::to_string));
    }

    /// Assign a binding to one node name and return it
    pub fn insert(&mut self, name: &str) -> &str {
        if !self.by_node.contains_key(name) {
            let base = sanitize(name);
            let mut candidate = base.clone();
            let mut suffix = 2;
            while self.taken.contains(&candidate) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            if candidate != name {
                tracing::debug!("Node '{}' bound as {}", name, candidate);
            }
            self.taken.insert(candidate.clone());
            self.by_node.insert(name.to_string(), candidate);
        }
        &self.by_node[name]
    }

    /// Binding for a node name, if the node was declared
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_node.get(name).map(String::as_str)
    }

    /// Whether a node was declared
    pub fn contains(&self, name: &str) -> bool {
        self.by_node.contains_key(name)
    }

    /// Number of bound nodes
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    /// Whether no node was bound
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Grid", "Grid")]
    #[case("Group Output", "Group_Output")]
    #[case("Transform.001", "Transform_001")]
    #[case("3D Cursor", "_3D_Cursor")]
    #[case("", "_")]
    #[case("new", "new_")]
    #[case("scene", "scene_")]
    #[case("THREE", "THREE_")]
    #[case("$ref", "$ref")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("size"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("Size X"));
        assert!(!is_identifier("1st"));
    }

    #[test]
    fn test_valid_names_kept_verbatim() {
        let bindings = Bindings::assign(["A", "B"]);
        assert_eq!(bindings.get("A"), Some("A"));
        assert_eq!(bindings.get("B"), Some("B"));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_collisions_get_suffixes() {
        let bindings = Bindings::assign(["Group Output", "Group_Output", "Group.Output"]);
        assert_eq!(bindings.get("Group Output"), Some("Group_Output"));
        assert_eq!(bindings.get("Group_Output"), Some("Group_Output_2"));
        assert_eq!(bindings.get("Group.Output"), Some("Group_Output_3"));
    }

    #[test]
    fn test_reserved_identifiers_are_skipped() {
        let mut bindings = Bindings::default();
        bindings.reserve(["TransformNode", "GroupOutputNode"]);
        assert_eq!(bindings.insert("TransformNode"), "TransformNode_2");
        assert_eq!(bindings.insert("Move"), "Move");
        assert!(!bindings.contains("GroupOutputNode"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut bindings = Bindings::default();
        let first = bindings.insert("Mesh Line").to_string();
        let second = bindings.insert("Mesh Line").to_string();
        assert_eq!(first, second);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_unknown_node_has_no_binding() {
        let bindings = Bindings::assign(["A"]);
        assert!(bindings.get("Z").is_none());
        assert!(!bindings.contains("Z"));
    }
}
