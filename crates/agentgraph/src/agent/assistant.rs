//! Assistant node: system prompt + history to the LLM, re-prompting on empty replies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::{invoke_with_timeout, LlmClient, DEFAULT_LLM_TIMEOUT};
use crate::message::Message;
use crate::state::MessagesState;

/// Synthetic user turn added to the request after a degenerate reply.
pub const REPROMPT_TEXT: &str = "Respond with a real output.";

/// LLM calls allowed per assistant step.
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant. Use the provided tools to assist with tasks such as fetching stock prices, getting current weather, and calculating age.";

/// System prompt template. The time is captured when the prompt is built and
/// stays fixed for its lifetime; the user id is filled per run.
#[derive(Debug, Clone)]
pub struct AssistantPrompt {
    instructions: String,
    time: String,
}

impl Default for AssistantPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTIONS)
    }
}

impl AssistantPrompt {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            time: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string(),
        }
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Renders the system message text; a missing user id renders as `unknown`.
    pub fn render(&self, user_id: Option<&str>) -> String {
        format!(
            "{}\n\nCurrent user:\n\n{}\n\nCurrent time: {}.",
            self.instructions,
            user_id.unwrap_or("unknown"),
            self.time
        )
    }
}

/// Assistant step.
///
/// Sends the rendered system prompt followed by the conversation. A reply with no
/// tool calls and no usable text is answered with `REPROMPT_TEXT` and the request
/// is sent again; only the final reply is appended to the state. The system
/// prompt and re-prompt turns are never stored.
///
/// **Interaction**: Implements `Node<MessagesState>`; followed by `ToolsCondition`.
pub struct AssistantNode {
    llm: Arc<dyn LlmClient>,
    prompt: AssistantPrompt,
    max_attempts: usize,
    timeout: Duration,
}

impl AssistantNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            prompt: AssistantPrompt::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    pub fn with_prompt(mut self, prompt: AssistantPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Caps LLM calls per step (at least one).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Node<MessagesState> for AssistantNode {
    fn id(&self) -> &str {
        super::ASSISTANT_NODE
    }

    async fn run(
        &self,
        state: MessagesState,
        ctx: &RunContext,
    ) -> Result<(MessagesState, Next), AgentError> {
        let mut request = Vec::with_capacity(state.messages.len() + 1);
        request.push(Message::system(self.prompt.render(ctx.user_id())));
        request.extend(state.messages.iter().cloned());

        for attempt in 1..=self.max_attempts {
            let reply = invoke_with_timeout(self.llm.as_ref(), &request, self.timeout).await?;
            if reply.is_degenerate() {
                warn!(attempt, "empty reply from llm, re-prompting");
                request.push(Message::user(REPROMPT_TEXT));
                continue;
            }
            debug!(attempt, tool_calls = reply.tool_calls.len(), "assistant reply");
            let mut messages = state.messages;
            messages.push(reply.into_message());
            return Ok((MessagesState { messages }, Next::Continue));
        }
        Err(AgentError::MaxIterationsExceeded(self.max_attempts))
    }
}
