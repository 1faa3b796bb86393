//! # agentgraph
//!
//! LangGraph-style state graphs in Rust, with two ready-made pipelines:
//!
//! - **Classification graph** ([`classify`]): one LLM call labels an utterance as
//!   greeting or search, a branch picks the responder.
//! - **Agent graph** ([`agent`]): an assistant bound to tools, a tool-dispatch node
//!   with error fallback, a `tools_condition` edge and a re-prompt loop for empty
//!   replies. Conversations are kept per thread by a checkpointer.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, `Branch`: build and run graphs.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and `ChatOpenAI` (feature `openai`).
//! - [`memory`]: `RunnableConfig`, `Checkpointer`, `MemorySaver`, `SessionStore`.
//! - [`tool_source`]: `ToolSource`, `Tool`, `ToolRegistry` and the demo tools.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentgraph::classify::{build_classification_graph, ClassifyState};
//! use agentgraph::MockLlm;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = build_classification_graph(Arc::new(MockLlm::with_no_tool_calls("greeting")))?;
//! let out = graph.invoke(ClassifyState::new("hi"), None).await?;
//! assert_eq!(out.response.as_deref(), Some("Hello! How can I help you today?"));
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod classify;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod state;
pub mod tool_source;

pub use error::{AgentError, ToolError, ValidationError};
pub use graph::{
    Branch, CompilationError, CompiledStateGraph, GraphEvent, Next, Node, RunContext, StateGraph,
    END, START,
};
pub use llm::{LlmClient, LlmError, LlmResponse, MockLlm};
#[cfg(feature = "openai")]
pub use llm::{ChatOpenAI, OpenAiConfig};
pub use memory::{Checkpointer, MemorySaver, RunnableConfig, SessionStore};
pub use message::{AssistantMessage, ContentPart, Message, MessageContent, ToolMessage};
pub use state::{MessagesState, ToolCall};
pub use tool_source::{Tool, ToolCallContent, ToolRegistry, ToolSource, ToolSourceError, ToolSpec};
