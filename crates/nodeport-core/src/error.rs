//! Error types for nodeport-core

use thiserror::Error;

/// Result type alias for nodeport-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in nodeport-core
#[derive(Error, Debug)]
pub enum Error {
    /// No host graph was supplied
    #[error("no node graph supplied")]
    MissingGraph,

    /// Two nodes in one graph share a name
    #[error("duplicate node name '{name}'")]
    DuplicateNodeName {
        /// The name that appears more than once
        name: String,
    },

    /// Two input sockets (or two output sockets) on one node share a name
    #[error("duplicate socket name '{socket}' on node '{node}'")]
    DuplicateSocketName {
        /// Node owning the sockets
        node: String,
        /// The socket name that appears more than once
        socket: String,
    },

    /// A link references a node or socket that is not in the graph
    #[error("unresolvable connection on '{node}.{socket}': {message}")]
    UnresolvableConnection {
        /// Node owning the socket with the bad reference
        node: String,
        /// Socket holding the bad reference
        socket: String,
        /// Description of what could not be resolved
        message: String,
    },

    /// A socket default value has a shape that cannot become a literal
    #[error("invalid default value on '{node}.{socket}': {message}")]
    InvalidDefaultValue {
        /// Node owning the socket
        node: String,
        /// Socket name
        socket: String,
        /// Description of the offending value
        message: String,
    },

    /// The graph contains a cycle (only checked when ordering topologically)
    #[error("graph contains a cycle through node '{node}'")]
    CyclicGraph {
        /// A node that is part of the cycle
        node: String,
    },

    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
