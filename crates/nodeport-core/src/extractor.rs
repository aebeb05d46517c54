//! Host graph → normalized graph
//!
//! Walks a `HostGraph` once and records every node, socket, link and default
//! value. Linked-vs-literal is decided here so nothing downstream inspects
//! the host's value shapes again.

use crate::error::{Error, Result};
use crate::graph::{Graph, InputSocket, Node, OutputSocket, SocketRef};
use crate::host::{HostGraph, HostNode, HostSocket};
use crate::value::Value;

/// Extract a normalized graph from a host graph handle.
///
/// Fails with `MissingGraph` when no handle is supplied. A handle with no
/// nodes yields an empty graph.
pub fn extract(host: Option<&dyn HostGraph>) -> Result<Graph> {
    let host = host.ok_or(Error::MissingGraph)?;
    tracing::debug!("Extracting node tree '{}'", host.name());

    let mut graph = Graph::new(host.name());
    let mut dropped = Vec::new();
    for host_node in host.nodes() {
        graph.insert_node(extract_node(host_node, &mut dropped)?)?;
    }

    // Links discarded from multi-link inputs leave no trace on the producer
    for (source, target) in &dropped {
        graph.drop_output_link(source, target);
    }

    graph.validate_references()?;

    tracing::debug!("Extracted {} nodes", graph.len());
    Ok(graph)
}

fn extract_node(
    host_node: &dyn HostNode,
    dropped: &mut Vec<(SocketRef, SocketRef)>,
) -> Result<Node> {
    let name = host_node.name();
    let mut node = Node::new(name, host_node.type_tag());

    for socket in host_node.inputs() {
        if node.inputs.contains_key(socket.name()) {
            return Err(duplicate_socket(name, socket.name()));
        }
        let input = extract_input(name, socket, dropped)?;
        node.inputs.insert(socket.name().to_string(), input);
    }

    for socket in host_node.outputs() {
        if node.outputs.contains_key(socket.name()) {
            return Err(duplicate_socket(name, socket.name()));
        }
        node.outputs.insert(
            socket.name().to_string(),
            OutputSocket {
                links: socket.links().to_vec(),
            },
        );
    }

    Ok(node)
}

fn duplicate_socket(node: &str, socket: &str) -> Error {
    Error::DuplicateSocketName {
        node: node.to_string(),
        socket: socket.to_string(),
    }
}

fn extract_input(
    node: &str,
    socket: &dyn HostSocket,
    dropped: &mut Vec<(SocketRef, SocketRef)>,
) -> Result<InputSocket> {
    if socket.is_linked() {
        let links = socket.links();
        let source = links.first().ok_or_else(|| Error::UnresolvableConnection {
            node: node.to_string(),
            socket: socket.name().to_string(),
            message: "socket is linked but has no link".to_string(),
        })?;
        if links.len() > 1 {
            tracing::warn!(
                "Input '{}.{}' has {} links; keeping only the one from '{}'",
                node,
                socket.name(),
                links.len(),
                source.node
            );
            let target = SocketRef::new(node, socket.name());
            dropped.extend(links[1..].iter().map(|extra| (extra.clone(), target.clone())));
        }
        return Ok(InputSocket::Connection(source.clone()));
    }

    let value = match socket.default_value() {
        Some(json) => Value::try_from(json).map_err(|message| Error::InvalidDefaultValue {
            node: node.to_string(),
            socket: socket.name().to_string(),
            message,
        })?,
        None => Value::Null,
    };
    Ok(InputSocket::Literal(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GraphSnapshot;

    fn snapshot(json: &str) -> GraphSnapshot {
        GraphSnapshot::from_json(json).unwrap().unwrap()
    }

    #[test]
    fn test_missing_graph() {
        let err = extract(None).unwrap_err();
        assert!(matches!(err, Error::MissingGraph));
    }

    #[test]
    fn test_empty_graph_is_not_missing() {
        let snap = snapshot(r#"{"name": "empty", "nodes": []}"#);
        let graph = extract(Some(&snap)).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.name, "empty");
    }

    #[test]
    fn test_literal_and_connection_inputs() {
        let snap = snapshot(
            r#"{
  "name": "tree",
  "nodes": [
    { "name": "Grid", "type": "MESH_PRIMITIVE_PLANE",
      "inputs": [ { "name": "size", "default_value": 2.0 }, { "name": "vertices", "default_value": 3 } ],
      "outputs": [ { "name": "Mesh", "links": [ { "node": "Out", "socket": "Geometry" } ] } ] },
    { "name": "Out", "type": "GROUP_OUTPUT",
      "inputs": [ { "name": "Geometry", "is_linked": true, "links": [ { "node": "Grid", "socket": "Mesh" } ] } ] }
  ]
}"#,
        );
        let graph = extract(Some(&snap)).unwrap();

        let grid = graph.node("Grid").unwrap();
        assert_eq!(grid.inputs["size"], InputSocket::Literal(Value::Float(2.0)));
        assert_eq!(grid.inputs["vertices"], InputSocket::Literal(Value::Int(3)));
        assert_eq!(grid.outputs["Mesh"].links, vec![SocketRef::new("Out", "Geometry")]);

        let out = graph.node("Out").unwrap();
        assert_eq!(
            out.inputs["Geometry"],
            InputSocket::Connection(SocketRef::new("Grid", "Mesh"))
        );
    }

    #[test]
    fn test_input_without_default_is_null() {
        let snap = snapshot(
            r#"{"nodes": [ { "name": "Out", "type": "GROUP_OUTPUT", "inputs": [ { "name": "Geometry" } ] } ]}"#,
        );
        let graph = extract(Some(&snap)).unwrap();
        assert_eq!(
            graph.node("Out").unwrap().inputs["Geometry"],
            InputSocket::Literal(Value::Null)
        );
    }

    #[test]
    fn test_duplicate_names_fail() {
        let snap = snapshot(
            r#"{"nodes": [ { "name": "A", "type": "TRANSFORM" }, { "name": "A", "type": "TRANSFORM" } ]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert!(matches!(err, Error::DuplicateNodeName { name } if name == "A"));
    }

    #[test]
    fn test_dangling_link_fails() {
        let snap = snapshot(
            r#"{"nodes": [ { "name": "B", "type": "TRANSFORM",
                 "inputs": [ { "name": "Geometry", "links": [ { "node": "Ghost", "socket": "Mesh" } ] } ] } ]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert!(matches!(err, Error::UnresolvableConnection { ref node, .. } if node == "B"));
    }

    #[test]
    fn test_linked_without_links_fails() {
        let snap = snapshot(
            r#"{"nodes": [ { "name": "B", "type": "TRANSFORM",
                 "inputs": [ { "name": "Geometry", "is_linked": true } ] } ]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert!(err.to_string().contains("linked but has no link"));
    }

    #[test]
    fn test_multi_link_input_keeps_first() {
        let snap = snapshot(
            r#"{"nodes": [
  { "name": "A", "type": "TRANSFORM",
    "outputs": [ { "name": "Geometry", "links": [ { "node": "Join", "socket": "Geometry" } ] } ] },
  { "name": "C", "type": "TRANSFORM",
    "outputs": [ { "name": "Geometry", "links": [ { "node": "Join", "socket": "Geometry" } ] } ] },
  { "name": "Join", "type": "JOIN_GEOMETRY",
    "inputs": [ { "name": "Geometry", "links": [ { "node": "A", "socket": "Geometry" }, { "node": "C", "socket": "Geometry" } ] } ] }
]}"#,
        );
        let graph = extract(Some(&snap)).unwrap();
        assert_eq!(
            graph.node("Join").unwrap().inputs["Geometry"].connection(),
            Some(&SocketRef::new("A", "Geometry"))
        );
        assert_eq!(
            graph.node("A").unwrap().outputs["Geometry"].links,
            vec![SocketRef::new("Join", "Geometry")]
        );
        assert!(graph.node("C").unwrap().outputs["Geometry"].links.is_empty());
    }

    #[test]
    fn test_duplicate_input_names_fail() {
        let snap = snapshot(
            r#"{"nodes": [
  { "name": "Grid", "type": "MESH_PRIMITIVE_PLANE",
    "outputs": [ { "name": "Mesh", "links": [ { "node": "Math", "socket": "Value" } ] } ] },
  { "name": "Math", "type": "MATH",
    "inputs": [
      { "name": "Value", "links": [ { "node": "Grid", "socket": "Mesh" } ] },
      { "name": "Value", "default_value": 0.5 }
    ] }
]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateSocketName { ref node, ref socket } if node == "Math" && socket == "Value"
        ));
    }

    #[test]
    fn test_duplicate_output_names_fail() {
        let snap = snapshot(
            r#"{"nodes": [ { "name": "Split", "type": "SEPARATE_XYZ",
                 "outputs": [ { "name": "X" }, { "name": "X" } ] } ]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert_eq!(err.to_string(), "duplicate socket name 'X' on node 'Split'");
    }

    #[test]
    fn test_output_link_to_unlinked_input_fails() {
        let snap = snapshot(
            r#"{"nodes": [
  { "name": "Grid", "type": "MESH_PRIMITIVE_PLANE",
    "outputs": [ { "name": "Mesh", "links": [ { "node": "Move", "socket": "Geometry" } ] } ] },
  { "name": "Move", "type": "TRANSFORM",
    "inputs": [ { "name": "Geometry", "default_value": 0.5 } ] }
]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvableConnection { ref node, ref socket, ref message }
                if node == "Grid" && socket == "Mesh" && message.contains("not connected")
        ));
    }

    #[test]
    fn test_object_default_fails() {
        let snap = snapshot(
            r#"{"nodes": [ { "name": "A", "type": "TRANSFORM",
                 "inputs": [ { "name": "Weird", "default_value": { "x": 1 } } ] } ]}"#,
        );
        let err = extract(Some(&snap)).unwrap_err();
        assert!(matches!(err, Error::InvalidDefaultValue { ref socket, .. } if socket == "Weird"));
    }
}
