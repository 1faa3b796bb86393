//! Tool dispatch node with error fallback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::message::{Message, ToolMessage};
use crate::state::MessagesState;
use crate::tool_source::{ToolSource, ToolSourceError};

/// Per-call bound on a tool invocation.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a failed call into the text recorded as its result.
pub type ToolErrorHandler = fn(&ToolSourceError) -> String;

/// Default fallback text for a failed tool call.
pub fn handle_tool_error(error: &ToolSourceError) -> String {
    format!("An error occurred while using the tool: {}", error)
}

/// Answers every pending tool call of the last message with fallback text,
/// keeping each request paired with a result when the run stops before `tools`.
pub fn close_pending_tool_calls(state: MessagesState) -> MessagesState {
    let calls = state.pending_tool_calls().to_vec();
    if calls.is_empty() {
        return state;
    }
    let error = ToolSourceError::NotRun("recursion limit reached".into());
    let mut messages = state.messages;
    for call in calls {
        warn!(tool = %call.name, call_id = %call.id, "closing tool call that did not run");
        messages.push(Message::Tool(ToolMessage {
            call_id: call.id,
            name: call.name,
            content: handle_tool_error(&error),
            is_error: true,
        }));
    }
    MessagesState { messages }
}

/// Tool dispatch step.
///
/// Runs every tool call of the last assistant message in request order and
/// appends exactly one `Message::Tool` per call with the same call id. Unknown
/// tools, invalid arguments, execution errors and timeouts become fallback text;
/// they never fail the run.
///
/// **Interaction**: Implements `Node<MessagesState>`; calls `ToolSource::call_tool`.
pub struct ToolsNode {
    tools: Arc<dyn ToolSource>,
    timeout: Duration,
    on_error: ToolErrorHandler,
}

impl ToolsNode {
    pub fn new(tools: Arc<dyn ToolSource>) -> Self {
        Self {
            tools,
            timeout: DEFAULT_TOOL_TIMEOUT,
            on_error: handle_tool_error,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_error_handler(mut self, on_error: ToolErrorHandler) -> Self {
        self.on_error = on_error;
        self
    }

    async fn call(&self, name: &str, arguments: serde_json::Value) -> Result<String, ToolSourceError> {
        let content = tokio::time::timeout(self.timeout, self.tools.call_tool(name, arguments))
            .await
            .map_err(|_| ToolSourceError::Timeout(self.timeout))??;
        Ok(content.text)
    }
}

#[async_trait]
impl Node<MessagesState> for ToolsNode {
    fn id(&self) -> &str {
        super::TOOLS_NODE
    }

    async fn run(
        &self,
        state: MessagesState,
        _ctx: &RunContext,
    ) -> Result<(MessagesState, Next), AgentError> {
        let calls = state.pending_tool_calls().to_vec();
        if calls.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "tools node reached without pending tool calls".into(),
            ));
        }
        let mut messages = state.messages;
        for call in calls {
            let (content, is_error) = match self.call(&call.name, call.arguments).await {
                Ok(text) => {
                    debug!(tool = %call.name, call_id = %call.id, "tool call succeeded");
                    (text, false)
                }
                Err(e) => {
                    warn!(tool = %call.name, call_id = %call.id, error = %e, "tool call failed");
                    ((self.on_error)(&e), true)
                }
            };
            messages.push(Message::Tool(ToolMessage {
                call_id: call.id,
                name: call.name,
                content,
                is_error,
            }));
        }
        Ok((MessagesState { messages }, Next::Continue))
    }
}
