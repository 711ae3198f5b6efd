//! Error types for graph and canvas operations.
//!
//! Rejected connections and out-of-range zoom are normal outcomes, not
//! errors; they never show up here.

use crate::graph::{ConnectorId, NodeId};
use thiserror::Error;

/// Errors surfaced to the host application
#[derive(Error, Debug)]
pub enum FlowError {
    /// The node is not part of the graph
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// The connector does not exist on its node
    #[error("connector {0} not found")]
    ConnectorNotFound(ConnectorId),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graph operations
pub type FlowResult<T> = Result<T, FlowError>;
