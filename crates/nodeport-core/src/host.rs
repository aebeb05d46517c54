//! Host graph seam
//!
//! The extractor reads a live node tree through these traits. A host
//! integration implements them over its own objects; `GraphSnapshot` is the
//! in-tree implementation over a JSON dump of a node tree.
//!
//! # Snapshot format
//!
//! ```json
//! {
//!   "name": "GeometryNodes",
//!   "nodes": [
//!     {
//!       "name": "Grid",
//!       "type": "MESH_PRIMITIVE_PLANE",
//!       "inputs": [{ "name": "size", "default_value": 2.0 }],
//!       "outputs": [{ "name": "Mesh", "links": [{ "node": "Out", "socket": "Geometry" }] }]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::graph::SocketRef;

/// A socket as the host exposes it
pub trait HostSocket {
    /// Socket name
    fn name(&self) -> &str;

    /// Whether the host reports the socket as linked
    fn is_linked(&self) -> bool;

    /// Links on this socket. For inputs these name the upstream output,
    /// for outputs the downstream input.
    fn links(&self) -> &[SocketRef];

    /// Current default value in the host's dynamic representation
    fn default_value(&self) -> Option<&serde_json::Value>;
}

/// A node as the host exposes it
pub trait HostNode {
    /// Node name
    fn name(&self) -> &str;

    /// Node-type tag
    fn type_tag(&self) -> &str;

    /// Input sockets in declared order
    fn inputs(&self) -> Vec<&dyn HostSocket>;

    /// Output sockets in declared order
    fn outputs(&self) -> Vec<&dyn HostSocket>;
}

/// A node tree as the host exposes it
pub trait HostGraph {
    /// Tree name
    fn name(&self) -> &str;

    /// Nodes in host order
    fn nodes(&self) -> Vec<&dyn HostNode>;
}

/// JSON dump of a host node tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Tree name
    #[serde(default)]
    pub name: String,

    /// Nodes in host order
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
}

/// One node of a `GraphSnapshot`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Node name
    pub name: String,

    /// Node-type tag
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Input sockets
    #[serde(default)]
    pub inputs: Vec<SnapshotSocket>,

    /// Output sockets
    #[serde(default)]
    pub outputs: Vec<SnapshotSocket>,
}

/// One socket of a `SnapshotNode`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSocket {
    /// Socket name
    pub name: String,

    /// Explicit linked flag; derived from `links` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_linked: Option<bool>,

    /// Links on this socket
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<SocketRef>,

    /// Default value for unlinked inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl GraphSnapshot {
    /// Parse a snapshot document.
    ///
    /// Returns `None` for an empty document or a JSON `null`, which is how a
    /// host reports that no node tree is attached.
    pub fn from_json(text: &str) -> Result<Option<Self>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }
}

impl HostGraph for GraphSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn nodes(&self) -> Vec<&dyn HostNode> {
        self.nodes.iter().map(|n| n as &dyn HostNode).collect()
    }
}

impl HostNode for SnapshotNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn inputs(&self) -> Vec<&dyn HostSocket> {
        self.inputs.iter().map(|s| s as &dyn HostSocket).collect()
    }

    fn outputs(&self) -> Vec<&dyn HostSocket> {
        self.outputs.iter().map(|s| s as &dyn HostSocket).collect()
    }
}

impl HostSocket for SnapshotSocket {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_linked(&self) -> bool {
        self.is_linked.unwrap_or(!self.links.is_empty())
    }

    fn links(&self) -> &[SocketRef] {
        &self.links
    }

    fn default_value(&self) -> Option<&serde_json::Value> {
        self.default_value.as_ref()
    }
}
