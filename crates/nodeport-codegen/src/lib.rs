//! nodeport Code Generation
//!
//! This crate turns a normalized node graph into JavaScript for a three.js
//! style node runtime.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌─────────┐     ┌─────────┐     ┌──────────┐     ┌─────────┐     ┌─────────┐
//! │  Host   │────▶│  Graph  │────▶│ Sections │────▶│ Output  │────▶│  Text   │
//! │  graph  │     │(Extract)│     │  (Gen)   │     │(Resolve)│     │ (Print) │
//! └─────────┘     └─────────┘     └──────────┘     └─────────┘     └─────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nodeport_codegen::{ExportOptions, Exporter, TypeMapping};
//!
//! let exporter = Exporter::new(TypeMapping::builtin(), ExportOptions::default());
//! let artifact = exporter.export(Some(&snapshot))?;
//! std::fs::write("scene.js", &artifact.text)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod exporter;
pub mod generator;
pub mod identifier;
pub mod ir;
pub mod literal;
pub mod mapping;
pub mod printer;
pub mod resolver;

pub use error::{Error, Result};
pub use exporter::{Artifact, ExportOptions, ExportStats, Exporter};
pub use generator::Generator;
pub use ir::{Program, Statement, Warning};
pub use mapping::TypeMapping;
pub use printer::JsPrinter;
pub use resolver::OutputResolver;
