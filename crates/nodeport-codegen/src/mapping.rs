//! Node-type → target construct table
//!
//! An immutable value handed to the generator. Supporting a new node type is
//! a data change: add an entry here or in a `nodeport.yaml` profile.

use indexmap::IndexMap;
use nodeport_core::Config;
use phf::phf_ordered_map;

/// Built-in node mappings for the three.js node runtime
static BUILTIN_MAPPINGS: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "GROUP_INPUT" => "GroupInputNode",
    "GROUP_OUTPUT" => "GroupOutputNode",
    "MESH_PRIMITIVE_PLANE" => "PlaneGeometryNode",
    "TRANSFORM" => "TransformNode",
};

/// Tag of the terminal node in the built-in profile
pub const BUILTIN_OUTPUT_TYPE: &str = "GROUP_OUTPUT";

/// Mapping profile used by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    name: String,
    output_type: String,
    entries: IndexMap<String, String>,
}

impl TypeMapping {
    /// Create an empty profile
    pub fn new(name: impl Into<String>, output_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_type: output_type.into(),
            entries: IndexMap::new(),
        }
    }

    /// The built-in three.js profile
    pub fn builtin() -> Self {
        let mut mapping = Self::new("three", BUILTIN_OUTPUT_TYPE);
        for (tag, construct) in BUILTIN_MAPPINGS.entries() {
            mapping.entries.insert(tag.to_string(), construct.to_string());
        }
        mapping
    }

    /// Build a profile from configuration, layering over the built-in
    /// entries when `builtin` is set
    pub fn from_config(config: &Config) -> Self {
        let mut mapping = if config.builtin {
            Self::builtin()
        } else {
            Self::new(config.name.as_str(), config.output_type.as_str())
        };
        mapping.name = config.name.clone();
        mapping.output_type = config.output_type.clone();

        for (tag, construct) in &config.mappings {
            if let Some(previous) = mapping.entries.insert(tag.clone(), construct.clone()) {
                tracing::debug!("Mapping for {} overridden: {} -> {}", tag, previous, construct);
            }
        }
        mapping
    }

    /// Add or replace one entry
    pub fn with_entry(mut self, tag: impl Into<String>, construct: impl Into<String>) -> Self {
        self.entries.insert(tag.into(), construct.into());
        self
    }

    /// Target construct for a node-type tag
    pub fn lookup(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    /// Whether a tag has an entry
    pub fn supports(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Whether a tag denotes the graph output
    pub fn is_output(&self, tag: &str) -> bool {
        self.output_type == tag
    }

    /// Profile name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag of the terminal node
    pub fn output_type(&self) -> &str {
        &self.output_type
    }

    /// All entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(tag, construct)| (tag.as_str(), construct.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the profile has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self::builtin()
    }
}
