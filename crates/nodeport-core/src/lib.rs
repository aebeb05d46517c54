//! nodeport Core Library
//!
//! This crate provides the host-independent half of the exporter:
//! - The normalized node graph model
//! - The host graph seam and the JSON graph snapshot host
//! - Extraction from a host graph into the normalized model
//! - Export configuration (mapping profiles)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Host graph  │────▶│  Extractor  │────▶│    Graph    │
//! │ (snapshot)  │     │ (validate)  │     │ (normalized)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nodeport_core::{GraphSnapshot, extract};
//!
//! let snapshot = GraphSnapshot::from_json(&std::fs::read_to_string("tree.json")?)?;
//! let graph = extract(snapshot.as_ref().map(|s| s as &dyn HostGraph))?;
//! for node in graph.nodes() {
//!     println!("{} ({})", node.name, node.type_tag);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod host;
pub mod value;

pub use config::{Config, EvaluationOrder};
pub use error::{Error, Result};
pub use extractor::extract;
pub use graph::{Graph, InputSocket, Node, OutputSocket, SocketRef};
pub use host::{GraphSnapshot, HostGraph, HostNode, HostSocket};
pub use value::Value;
