//! Error types for code generation

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum Error {
    /// The graph could not be extracted or ordered
    #[error(transparent)]
    Graph(#[from] nodeport_core::Error),

    /// Internal inconsistency while building statements
    #[error("code generation failed: {0}")]
    GenerationError(String),
}

impl Error {
    /// Short machine-readable kind, for host layers that surface errors
    pub fn kind(&self) -> &'static str {
        use nodeport_core::Error as Core;

        match self {
            Error::Graph(Core::MissingGraph) => "MissingGraph",
            Error::Graph(Core::DuplicateNodeName { .. }) => "DuplicateNodeName",
            Error::Graph(Core::DuplicateSocketName { .. }) => "DuplicateSocketName",
            Error::Graph(Core::UnresolvableConnection { .. }) => "UnresolvableConnection",
            Error::Graph(Core::InvalidDefaultValue { .. }) => "InvalidDefaultValue",
            Error::Graph(Core::CyclicGraph { .. }) => "CyclicGraph",
            Error::Graph(_) => "Input",
            Error::GenerationError(_) => "Generation",
        }
    }
}
