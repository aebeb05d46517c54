//! Integration tests for configuration loading and snapshot extraction
//!
//! Tests use temporary directories with real file fixtures to verify:
//! - Profile loading from a directory and from an explicit file
//! - Error handling for missing and malformed files
//! - Snapshot files flowing through the extractor

use nodeport_core::config::CONFIG_FILE;
use nodeport_core::{
    Config, Error, EvaluationOrder, GraphSnapshot, HostGraph, InputSocket, Value, extract,
};
use tempfile::TempDir;

fn setup_dir() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn test_load_config_from_directory() {
    let dir = setup_dir();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        r#"
name: studio
evaluation_order: topological
mappings:
  MESH_PRIMITIVE_CUBE: BoxGeometryNode
"#,
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();
    assert_eq!(config.name, "studio");
    assert_eq!(config.evaluation_order, EvaluationOrder::Topological);
    assert_eq!(config.mappings["MESH_PRIMITIVE_CUBE"], "BoxGeometryNode");
}

#[test]
fn test_load_config_from_file() {
    let dir = setup_dir();
    let path = dir.path().join("profile.yaml");
    std::fs::write(&path, "builtin: false\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert!(!config.builtin);
    assert_eq!(config.name, "three");
}

#[test]
fn test_missing_config_file() {
    let dir = setup_dir();
    let err = Config::load(dir.path()).unwrap_err();
    match err {
        Error::ConfigNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
        other => panic!("Expected ConfigNotFound, got {other:?}"),
    }
}

#[test]
fn test_malformed_config_file() {
    let dir = setup_dir();
    std::fs::write(dir.path().join(CONFIG_FILE), "mappings: [not, a, map]\n").unwrap();

    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn test_snapshot_file_extracts() {
    let dir = setup_dir();
    let path = dir.path().join("tree.json");
    std::fs::write(
        &path,
        r#"{
  "name": "GeometryNodes",
  "nodes": [
    { "name": "Grid", "type": "MESH_PRIMITIVE_PLANE",
      "inputs": [ { "name": "size", "default_value": 2.0 }, { "name": "flip", "default_value": false } ],
      "outputs": [ { "name": "Mesh", "links": [ { "node": "Group Output", "socket": "Geometry" } ] } ] },
    { "name": "Group Output", "type": "GROUP_OUTPUT",
      "inputs": [ { "name": "Geometry", "links": [ { "node": "Grid", "socket": "Mesh" } ] } ] }
  ]
}"#,
    )
    .unwrap();

    let snapshot = GraphSnapshot::load(&path).unwrap();
    let graph = extract(snapshot.as_ref().map(|s| s as &dyn HostGraph)).unwrap();

    assert_eq!(graph.len(), 2);
    let grid = graph.node("Grid").unwrap();
    assert_eq!(grid.inputs["flip"], InputSocket::Literal(Value::Bool(false)));
    assert!(graph.node("Group Output").unwrap().inputs["Geometry"]
        .connection()
        .is_some());
}

#[test]
fn test_null_snapshot_is_missing_graph() {
    let dir = setup_dir();
    let path = dir.path().join("none.json");
    std::fs::write(&path, "null").unwrap();

    let snapshot = GraphSnapshot::load(&path).unwrap();
    let err = extract(snapshot.as_ref().map(|s| s as &dyn HostGraph)).unwrap_err();
    assert!(matches!(err, Error::MissingGraph));
}

#[test]
fn test_missing_snapshot_file_is_io_error() {
    let dir = setup_dir();
    let err = GraphSnapshot::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
