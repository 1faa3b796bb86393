//! Tool source abstraction: list tools and call a tool.
//!
//! The agent depends on `ToolSource` instead of a concrete registry. The
//! in-process implementation is `ToolRegistry`, holding `Tool` handlers such as
//! the demo `FetchStockPriceTool` and `CurrentWeatherTool`.

mod demo;
mod registry;
mod validation;

pub use demo::{CurrentWeatherTool, FetchStockPriceTool, WEATHER_CONDITIONS};
pub use registry::{Tool, ToolRegistry};
pub use validation::validate_args;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification, aligned with MCP `tools/list` result item.
///
/// **Interaction**: Returned by `ToolSource::list_tools()`; bound on the LLM
/// client (`ChatOpenAI::with_tools`) so the model can request calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    /// Tool name, unique within a source.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call; aligns with MCP `tools/call` content.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    pub text: String,
}

/// Errors from listing or calling tools.
///
/// **Interaction**: Returned by `ToolSource::call_tool()`; `ToolsNode` turns every
/// one of them into fallback text instead of failing the run.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
    #[error("tool call timed out after {0:?}")]
    Timeout(Duration),
    #[error("tool call not run: {0}")]
    NotRun(String),
    #[error("duplicate tool name: {0}")]
    Duplicate(String),
}

/// Tool source: list tools and call a tool.
///
/// **Interaction**: `list_tools` feeds the LLM's tool binding; `ToolsNode`
/// uses `call_tool(name, args)`.
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
