//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the edges do not form a runnable graph.

use thiserror::Error;

/// Error when compiling a state graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// An edge endpoint was not registered via `add_node` (and is not `END`).
    #[error("node not found: {0}")]
    NodeNotFound(String),
    /// `add_node` was called twice with the same id.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),
    /// `START` and `END` cannot be used as node ids.
    #[error("reserved node id: {0}")]
    ReservedNodeId(String),
    /// More than one outgoing edge definition for the same node.
    #[error("node '{0}' already has an outgoing edge")]
    DuplicateEdge(String),
    /// No edge from `START`.
    #[error("graph has no entry edge from START")]
    MissingEntry,
    /// The entry edge must be a fixed edge.
    #[error("conditional edges from START are not supported")]
    ConditionalEntry,
    /// A branch outcome has no entry in the path map.
    #[error("branch from '{node}' has no mapping for outcome '{outcome}'")]
    UnmappedOutcome { node: String, outcome: String },
}
