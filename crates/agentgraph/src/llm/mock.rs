//! Mock LLM for tests and offline demos.
//!
//! Returns scripted responses in order; once the script is exhausted the last
//! response repeats. Counts calls and keeps every request so tests can assert
//! on re-prompts and on the system prompt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;

/// Mock LLM: scripted responses.
///
/// **Interaction**: Implements `LlmClient`; used with `ClassifyNode`, `AssistantNode`
/// and the CLI's `--offline` mode.
pub struct MockLlm {
    script: Vec<LlmResponse>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Responses returned in order; the last one repeats.
    pub fn scripted(script: Vec<LlmResponse>) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with the given text and no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::scripted(vec![LlmResponse::text(content)])
    }

    /// First call requests one tool call, later calls reply with `final_answer`.
    pub fn first_tool_then_answer(call: ToolCall, final_answer: impl Into<String>) -> Self {
        Self::scripted(vec![
            LlmResponse::tool_calls(vec![call]),
            LlmResponse::text(final_answer),
        ])
    }

    /// Number of `invoke` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of every request received, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }
        self.script
            .get(n)
            .or_else(|| self.script.last())
            .cloned()
            .ok_or_else(|| AgentError::ExecutionFailed("mock llm has no scripted response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_then_repeat_last() {
        let llm = MockLlm::scripted(vec![LlmResponse::text("one"), LlmResponse::text("two")]);
        let msgs = [Message::user("hi")];
        assert_eq!(llm.invoke(&msgs).await.unwrap(), LlmResponse::text("one"));
        assert_eq!(llm.invoke(&msgs).await.unwrap(), LlmResponse::text("two"));
        assert_eq!(llm.invoke(&msgs).await.unwrap(), LlmResponse::text("two"));
        assert_eq!(llm.calls(), 3);
        assert_eq!(llm.requests().len(), 3);
    }

    #[tokio::test]
    async fn empty_script_is_an_error() {
        let llm = MockLlm::scripted(vec![]);
        let err = llm.invoke(&[]).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }
}
