//! LLM client boundary and response type.
//!
//! - `LlmClient`: async completion over a message history
//! - `LlmResponse`: content (text or parts) plus tool calls
//! - `MockLlm`: scripted client for tests and offline demos
//! - `ChatOpenAI`: OpenAI-compatible chat completions (feature `openai`)

mod error;
mod mock;
#[cfg(feature = "openai")]
mod openai;

pub use error::LlmError;
pub use mock::MockLlm;
#[cfg(feature = "openai")]
pub use openai::{ChatOpenAI, OpenAiConfig};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{AssistantMessage, Message, MessageContent};
use crate::state::ToolCall;

/// One completion: assistant content and the tool calls the model requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmResponse {
    pub content: MessageContent,
    pub tool_calls: Vec<ToolCall>,
}

impl LlmResponse {
    /// Plain-text reply without tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: MessageContent::Text(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Reply that only requests tool calls.
    pub fn tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: MessageContent::default(),
            tool_calls,
        }
    }

    /// No tool calls and no usable text: the assistant re-prompts on this.
    pub fn is_degenerate(&self) -> bool {
        self.tool_calls.is_empty() && self.content.is_empty()
    }

    /// Converts into the assistant message appended to the conversation.
    pub fn into_message(self) -> Message {
        Message::Assistant(AssistantMessage {
            content: self.content,
            tool_calls: self.tool_calls,
        })
    }
}

/// LLM client: message history in, one completion out.
///
/// Tools are bound on the client (e.g. `ChatOpenAI::with_tools`), not per call.
///
/// **Interaction**: Used by `ClassifyNode` and `AssistantNode`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}

/// Per-call bound on an LLM request.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// `llm.invoke(messages)` bounded by `after`; elapsed time maps to `AgentError::Timeout`.
pub async fn invoke_with_timeout(
    llm: &dyn LlmClient,
    messages: &[Message],
    after: Duration,
) -> Result<LlmResponse, AgentError> {
    tokio::time::timeout(after, llm.invoke(messages))
        .await
        .map_err(|_| AgentError::Timeout {
            what: "llm call".to_string(),
            after,
        })?
}
