//! Tool trait and in-process registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::ToolError;
use crate::tool_source::validation::validate_args;
use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// A callable tool: name, description, argument schema and handler.
///
/// `parameters_schema` is a minimal JSON Schema
/// (`{"type":"object","properties":{...},"required":[...]}`), used both for the
/// LLM tool binding and for argument validation.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters_schema(&self) -> Value;

    /// Runs with already validated arguments.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: Some(self.description().to_string()),
            input_schema: self.parameters_schema(),
        }
    }
}

/// Name-keyed tool registry. Names are unique; registration order is kept for `list_tools`.
///
/// **Interaction**: Implements `ToolSource` for `ToolsNode`; its specs are bound
/// on the LLM client.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool; a second tool with the same name is rejected.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolSourceError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolSourceError::Duplicate(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Builder form of `register`.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Result<Self, ToolSourceError> {
        self.register(tool)?;
        Ok(self)
    }

    /// Registry holding `fetch_stock_price` and `get_current_weather`.
    pub fn demo() -> Result<Self, ToolSourceError> {
        Self::new()
            .with_tool(Arc::new(super::FetchStockPriceTool))?
            .with_tool(Arc::new(super::CurrentWeatherTool))
    }

    /// Specs in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.spec())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolSource for ToolRegistry {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.specs())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        validate_args(&tool.parameters_schema(), &arguments)
            .map_err(|e| ToolSourceError::InvalidInput(e.0))?;
        debug!(tool = name, "executing tool");
        let value = tool.execute(arguments).await.map_err(|e| match e {
            ToolError::ValidationFailed(m) => ToolSourceError::InvalidInput(m),
            ToolError::ExecutionFailed(m) => ToolSourceError::Execution(m),
        })?;
        let text = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(ToolCallContent { text })
    }
}
