//! # Errors
//!
//! Failures surfaced by the graph document. Boundary no-ops (undo at the
//! start of history, redo at the end) are not errors and never show up here.

use crate::model::{ConnectionId, NodeId};
use thiserror::Error;

/// Errors returned by document mutations and workflow import.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The workflow file is not valid JSON or does not match the document shape.
    #[error("invalid workflow file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The workflow file declares a version this library cannot read.
    #[error("unsupported workflow version '{0}'")]
    UnsupportedVersion(String),

    #[error("duplicate node id '{0}'")]
    DuplicateNodeId(NodeId),

    #[error("duplicate connection id '{0}'")]
    DuplicateConnectionId(ConnectionId),

    /// Width and height must both be strictly positive and finite.
    #[error("node '{id}' has invalid size {width}x{height}")]
    InvalidNodeSize {
        id: NodeId,
        width: f32,
        height: f32,
    },

    #[error("node '{0}' has a non-finite position")]
    NonFinitePosition(NodeId),

    /// A connection references a node that is not part of the graph.
    #[error("connection '{connection}' references unknown node '{node}'")]
    DanglingConnection {
        connection: ConnectionId,
        node: NodeId,
    },

    /// A connection would start and end on the same node.
    #[error("connection from '{0}' to itself is not allowed")]
    SelfLoop(NodeId),

    #[error("node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("connection '{0}' not found")]
    ConnectionNotFound(ConnectionId),
}

pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
