//! Error types for graph execution and tools.
//!
//! - `AgentError`: node / graph execution errors
//! - `ValidationError`: tool argument validation against a schema
//! - `ToolError`: errors raised by `Tool::execute`

use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;
use crate::memory::CheckpointError;

/// Errors produced while running nodes or a compiled graph.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed, with a description.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A bounded loop (graph recursion limit or assistant re-prompt cap) ran out.
    #[error("max iterations exceeded: {0}")]
    MaxIterationsExceeded(usize),

    /// An outbound call did not finish in time.
    #[error("{what} timed out after {after:?}")]
    Timeout { what: String, after: Duration },

    /// A branch returned a key that has no entry in its path map.
    #[error("no route for '{key}' from node '{node}'")]
    UnknownRoute { node: String, key: String },

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

/// Argument validation failure, produced by `validate_args(schema, args)`.
///
/// Converts to `ToolError::ValidationFailed` inside `ToolRegistry`.
#[derive(Debug, Error, Clone)]
#[error("validation failed: {0}")]
pub struct ValidationError(pub String);

/// Tool execution and validation errors.
///
/// Returned by `Tool::execute`; `ToolRegistry` maps them to `ToolSourceError`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments missing or of the wrong shape.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    /// Execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<ValidationError> for ToolError {
    fn from(e: ValidationError) -> Self {
        ToolError::ValidationFailed(e.0)
    }
}
