//! Tool-using agent graph.
//!
//! `START -> assistant`; `assistant -> tools` while the last reply requests tool
//! calls, else `END`; `tools -> assistant`. Resuming a thread appends the new
//! input to the saved messages (`MessagesState::add_messages`). When the
//! recursion limit stops a run between an assistant reply and `tools`, the
//! pending calls are closed with fallback text so the saved thread stays valid.

mod assistant;
mod condition;
mod tools_node;

pub use assistant::{AssistantNode, AssistantPrompt, DEFAULT_MAX_ATTEMPTS, REPROMPT_TEXT};
pub use condition::ToolsCondition;
pub use tools_node::{
    close_pending_tool_calls, handle_tool_error, ToolErrorHandler, ToolsNode, DEFAULT_TOOL_TIMEOUT,
};

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::memory::Checkpointer;
use crate::state::MessagesState;
use crate::tool_source::ToolSource;

pub const ASSISTANT_NODE: &str = "assistant";
pub const TOOLS_NODE: &str = "tools";

/// Wires the assistant and tool nodes into a graph.
///
/// `llm` must already have the tools bound (e.g. `ChatOpenAI::with_tools`).
/// With a checkpointer, invoke with a `thread_id` to keep the conversation.
pub fn build_agent_graph(
    assistant: AssistantNode,
    tools: ToolsNode,
    checkpointer: Option<Arc<dyn Checkpointer<MessagesState>>>,
) -> Result<CompiledStateGraph<MessagesState>, CompilationError> {
    let mut graph: StateGraph<MessagesState> = StateGraph::new();
    graph
        .add_node(ASSISTANT_NODE, Arc::new(assistant))
        .add_node(TOOLS_NODE, Arc::new(tools))
        .add_edge(START, ASSISTANT_NODE)
        .add_conditional_edges(
            ASSISTANT_NODE,
            Arc::new(ToolsCondition),
            HashMap::from([
                (TOOLS_NODE.to_string(), TOOLS_NODE.to_string()),
                (END.to_string(), END.to_string()),
            ]),
        )
        .add_edge(TOOLS_NODE, ASSISTANT_NODE)
        .with_input_merge(MessagesState::add_messages)
        .on_recursion_limit(close_pending_tool_calls);
    match checkpointer {
        Some(cp) => graph.compile_with_checkpointer(cp),
        None => graph.compile(),
    }
}

/// Agent graph with the default assistant prompt and tool fallback.
pub fn default_agent_graph(
    llm: Arc<dyn LlmClient>,
    tools: Arc<dyn ToolSource>,
    checkpointer: Option<Arc<dyn Checkpointer<MessagesState>>>,
) -> Result<CompiledStateGraph<MessagesState>, CompilationError> {
    build_agent_graph(AssistantNode::new(llm), ToolsNode::new(tools), checkpointer)
}
