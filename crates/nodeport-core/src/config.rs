//! Export configuration
//!
//! A mapping profile lives in `nodeport.yaml`:
//!
//! ```yaml
//! name: three-extended
//! output_type: GROUP_OUTPUT
//! builtin: true
//! evaluation_order: listing
//! mappings:
//!   MESH_PRIMITIVE_CUBE: BoxGeometryNode
//! ```
//!
//! Every field is optional. With `builtin: true` (the default) the entries
//! are layered over the built-in node mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default configuration file name
pub const CONFIG_FILE: &str = "nodeport.yaml";

/// Order of the Evaluations section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationOrder {
    /// Node listing order, as the host enumerates nodes
    #[default]
    Listing,
    /// Producers before consumers; fails on cycles
    Topological,
}

impl FromStr for EvaluationOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "listing" => Ok(EvaluationOrder::Listing),
            "topological" => Ok(EvaluationOrder::Topological),
            other => Err(format!(
                "unknown evaluation order '{}' (expected 'listing' or 'topological')",
                other
            )),
        }
    }
}

/// Mapping profile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Profile name
    #[serde(default = "default_name")]
    pub name: String,

    /// Node-type tag of the terminal node
    #[serde(default = "default_output_type")]
    pub output_type: String,

    /// Whether to layer `mappings` over the built-in entries
    #[serde(default = "default_builtin")]
    pub builtin: bool,

    /// Evaluation section order
    #[serde(default)]
    pub evaluation_order: EvaluationOrder,

    /// Node-type tag → target construct
    #[serde(default)]
    pub mappings: IndexMap<String, String>,
}

fn default_name() -> String {
    "three".to_string()
}

fn default_output_type() -> String {
    "GROUP_OUTPUT".to_string()
}

fn default_builtin() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            output_type: default_output_type(),
            builtin: default_builtin(),
            evaluation_order: EvaluationOrder::default(),
            mappings: IndexMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file, or from `nodeport.yaml` in a directory
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./exports")?;
    /// println!("Profile: {}", config.name);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        tracing::debug!("Loading configuration from {}", config_path.display());
        let contents = std::fs::read_to_string(&config_path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check for empty tags and constructs
    pub fn validate(&self) -> Result<()> {
        if self.output_type.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                message: "output_type must not be empty".to_string(),
            });
        }

        for (tag, construct) in &self.mappings {
            if tag.trim().is_empty() {
                return Err(Error::ConfigInvalid {
                    message: format!("mapping for construct '{}' has an empty node type", construct),
                });
            }
            if construct.trim().is_empty() {
                return Err(Error::ConfigInvalid {
                    message: format!("node type '{}' maps to an empty construct", tag),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.name, "three");
        assert_eq!(config.output_type, "GROUP_OUTPUT");
        assert!(config.builtin);
        assert_eq!(config.evaluation_order, EvaluationOrder::Listing);
        assert!(config.mappings.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_yaml("name: minimal\n").unwrap();
        assert_eq!(config.name, "minimal");
        assert_eq!(config.output_type, "GROUP_OUTPUT");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: custom
output_type: MATERIAL_OUTPUT
builtin: false
evaluation_order: topological
mappings:
  MESH_PRIMITIVE_CUBE: BoxGeometryNode
  SET_POSITION: SetPositionNode
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.output_type, "MATERIAL_OUTPUT");
        assert!(!config.builtin);
        assert_eq!(config.evaluation_order, EvaluationOrder::Topological);
        let tags: Vec<_> = config.mappings.keys().map(String::as_str).collect();
        assert_eq!(tags, vec!["MESH_PRIMITIVE_CUBE", "SET_POSITION"]);
    }

    #[test]
    fn test_empty_construct_is_invalid() {
        let yaml = r#"
mappings:
  MESH_PRIMITIVE_CUBE: ""
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_empty_output_type_is_invalid() {
        let err = Config::from_yaml("output_type: \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("output_type"));
    }

    #[test]
    fn test_unknown_order_is_parse_error() {
        let err = Config::from_yaml("evaluation_order: random\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_evaluation_order_from_str() {
        assert_eq!("listing".parse(), Ok(EvaluationOrder::Listing));
        assert_eq!("Topological".parse(), Ok(EvaluationOrder::Topological));
        assert!("random".parse::<EvaluationOrder>().is_err());
    }
}
