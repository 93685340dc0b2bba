use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Errors raised when a graph mutation would break one of the graph's invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("A node with id '{0}' already exists")]
    DuplicateNode(NodeId),

    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(EdgeId),

    #[error("Nodes '{first}' and '{second}' are already connected")]
    DuplicateEdge { first: NodeId, second: NodeId },

    #[error("An edge with id '{0}' already exists")]
    DuplicateEdgeId(EdgeId),

    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("Position for node '{node_id}' is not finite: ({x}, {y})")]
    NonFinitePosition { node_id: NodeId, x: f64, y: f64 },
}

/// Errors that can occur when decoding a palette drop payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Failed to parse drop payload JSON: {0}")]
    Json(String),

    #[error("Drop payload field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Errors that can occur when loading or validating an `EditorConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
