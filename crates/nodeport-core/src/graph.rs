//! Normalized node graph
//!
//! The host-independent form of a node tree. Built once per export by the
//! extractor and read-only afterwards. Iteration order is always the order
//! nodes and sockets were inserted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::value::Value;

/// Reference to a socket on another node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    /// Node name
    pub node: String,
    /// Socket name on that node
    pub socket: String,
}

impl SocketRef {
    /// Create a new socket reference
    pub fn new(node: impl Into<String>, socket: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            socket: socket.into(),
        }
    }
}

/// An input socket: either wired to an upstream output or holding a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSocket {
    /// Unconnected socket with its default value
    Literal(Value),
    /// Connected socket with its single upstream output
    Connection(SocketRef),
}

impl InputSocket {
    /// The upstream reference, if this socket is connected
    pub fn connection(&self) -> Option<&SocketRef> {
        match self {
            InputSocket::Connection(source) => Some(source),
            InputSocket::Literal(_) => None,
        }
    }

    /// The literal value, if this socket is unconnected
    pub fn literal(&self) -> Option<&Value> {
        match self {
            InputSocket::Literal(value) => Some(value),
            InputSocket::Connection(_) => None,
        }
    }
}

/// An output socket and its downstream consumers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSocket {
    /// Consumers of this output, in host order. May be empty.
    #[serde(default)]
    pub links: Vec<SocketRef>,
}

/// A node in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node name (unique within the graph)
    pub name: String,

    /// Host node-type tag, e.g. `MESH_PRIMITIVE_PLANE`
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Input sockets in declared order
    #[serde(default)]
    pub inputs: IndexMap<String, InputSocket>,

    /// Output sockets in declared order
    #[serde(default)]
    pub outputs: IndexMap<String, OutputSocket>,
}

impl Node {
    /// Create a node with no sockets
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Add an unconnected input socket
    pub fn with_literal(mut self, socket: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs
            .insert(socket.into(), InputSocket::Literal(value.into()));
        self
    }

    /// Add an output socket with no consumers
    pub fn with_output(mut self, socket: impl Into<String>) -> Self {
        self.outputs.insert(socket.into(), OutputSocket::default());
        self
    }

    /// Connected input sockets as `(input name, upstream)` pairs, in declared order
    pub fn connections(&self) -> impl Iterator<Item = (&str, &SocketRef)> {
        self.inputs
            .iter()
            .filter_map(|(name, socket)| socket.connection().map(|source| (name.as_str(), source)))
    }

    /// Unconnected input sockets as `(input name, value)` pairs, in declared order
    pub fn literals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inputs
            .iter()
            .filter_map(|(name, socket)| socket.literal().map(|value| (name.as_str(), value)))
    }
}

/// A normalized node graph keyed by node name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name as reported by the host
    #[serde(default)]
    pub name: String,

    nodes: IndexMap<String, Node>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
        }
    }

    /// Add a node, rejecting a name that is already taken
    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(Error::DuplicateNodeName { name: node.name });
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Wire `from_node.from_socket` into `to_node.to_socket`.
    ///
    /// Records both ends: the consumer's input becomes a connection and the
    /// producer's output gains a link. Missing sockets are created.
    pub fn link(
        &mut self,
        from_node: &str,
        from_socket: &str,
        to_node: &str,
        to_socket: &str,
    ) -> Result<()> {
        if !self.nodes.contains_key(to_node) {
            return Err(unresolved(from_node, from_socket, format!("node '{}' not found", to_node)));
        }
        let producer = self.nodes.get_mut(from_node).ok_or_else(|| {
            unresolved(to_node, to_socket, format!("node '{}' not found", from_node))
        })?;
        producer
            .outputs
            .entry(from_socket.to_string())
            .or_default()
            .links
            .push(SocketRef::new(to_node, to_socket));

        if let Some(consumer) = self.nodes.get_mut(to_node) {
            consumer.inputs.insert(
                to_socket.to_string(),
                InputSocket::Connection(SocketRef::new(from_node, from_socket)),
            );
        }
        Ok(())
    }

    /// Get a node by name
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove one consumer from a producer's output link list
    pub(crate) fn drop_output_link(&mut self, source: &SocketRef, target: &SocketRef) {
        if let Some(output) = self
            .nodes
            .get_mut(&source.node)
            .and_then(|producer| producer.outputs.get_mut(&source.socket))
        {
            output.links.retain(|link| link != target);
        }
    }

    /// Check that every connection reference names an existing node and
    /// socket, and that every output link is mirrored by the consumer's input
    pub fn validate_references(&self) -> Result<()> {
        for node in self.nodes.values() {
            for (input, source) in node.connections() {
                let producer = self.nodes.get(&source.node).ok_or_else(|| {
                    unresolved(&node.name, input, format!("source node '{}' not found", source.node))
                })?;
                if !producer.outputs.contains_key(&source.socket) {
                    return Err(unresolved(
                        &node.name,
                        input,
                        format!("node '{}' has no output '{}'", source.node, source.socket),
                    ));
                }
            }

            for (output, socket) in &node.outputs {
                for target in &socket.links {
                    let consumer = self.nodes.get(&target.node).ok_or_else(|| {
                        unresolved(&node.name, output, format!("target node '{}' not found", target.node))
                    })?;
                    let message = match consumer.inputs.get(&target.socket) {
                        None => format!("node '{}' has no input '{}'", target.node, target.socket),
                        Some(InputSocket::Connection(source))
                            if source.node == node.name && source.socket == *output =>
                        {
                            continue;
                        }
                        Some(InputSocket::Connection(source)) => format!(
                            "input '{}.{}' is connected to '{}.{}'",
                            target.node, target.socket, source.node, source.socket
                        ),
                        Some(InputSocket::Literal(_)) => format!(
                            "input '{}.{}' is not connected",
                            target.node, target.socket
                        ),
                    };
                    return Err(unresolved(&node.name, output, message));
                }
            }
        }
        Ok(())
    }

    /// Dependency order over the nodes accepted by `include`.
    ///
    /// Producers come before their consumers; ties keep insertion order.
    /// Links to or from excluded nodes are ignored.
    pub fn topological_order<F>(&self, include: F) -> Result<Vec<&Node>>
    where
        F: Fn(&Node) -> bool,
    {
        let included: Vec<usize> = self
            .nodes
            .values()
            .enumerate()
            .filter(|(_, node)| include(node))
            .map(|(idx, _)| idx)
            .collect();
        let members: HashSet<usize> = included.iter().copied().collect();

        let mut indegree: HashMap<usize, usize> = included.iter().map(|&idx| (idx, 0)).collect();
        let mut dependents: HashMap<usize, Vec<usize>> = HashMap::new();

        for &idx in &included {
            let Some((_, node)) = self.nodes.get_index(idx) else {
                continue;
            };
            for (_, source) in node.connections() {
                let Some(producer) = self.nodes.get_index_of(&source.node) else {
                    continue;
                };
                if !members.contains(&producer) {
                    continue;
                }
                *indegree.entry(idx).or_default() += 1;
                dependents.entry(producer).or_default().push(idx);
            }
        }

        let mut ready: BTreeSet<usize> = included
            .iter()
            .copied()
            .filter(|idx| indegree.get(idx) == Some(&0))
            .collect();
        let mut order = Vec::with_capacity(included.len());

        while let Some(idx) = ready.pop_first() {
            order.push(idx);
            for &dependent in dependents.get(&idx).into_iter().flatten() {
                if let Some(count) = indegree.get_mut(&dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        if order.len() < included.len() {
            let emitted: HashSet<usize> = order.iter().copied().collect();
            let stuck = included
                .iter()
                .find(|idx| !emitted.contains(idx))
                .and_then(|&idx| self.nodes.get_index(idx))
                .map(|(name, _)| name.clone())
                .unwrap_or_default();
            return Err(Error::CyclicGraph { node: stuck });
        }

        Ok(order
            .into_iter()
            .filter_map(|idx| self.nodes.get_index(idx).map(|(_, node)| node))
            .collect())
    }

    /// Get a hash of the graph for reproducibility checks
    pub fn content_hash(&self) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        for node in self.nodes.values() {
            hasher.update(format!("{:?}", node).as_bytes());
        }

        hex::encode(hasher.finalize())
    }
}

fn unresolved(node: &str, socket: &str, message: String) -> Error {
    Error::UnresolvableConnection {
        node: node.to_string(),
        socket: socket.to_string(),
        message,
    }
}
