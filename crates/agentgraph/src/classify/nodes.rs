//! Classifier and responder nodes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::classify::{ClassifyState, ClassifyStep, Label};
use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::{invoke_with_timeout, LlmClient, DEFAULT_LLM_TIMEOUT};
use crate::message::Message;

/// Reply of the greeting handler.
pub const GREETING_REPLY: &str = "Hello! How can I help you today?";

/// One LLM call with the classification instruction; no retry.
pub async fn classify_input(llm: &dyn LlmClient, question: &str) -> Result<Label, AgentError> {
    classify_with_timeout(llm, question, DEFAULT_LLM_TIMEOUT).await
}

async fn classify_with_timeout(
    llm: &dyn LlmClient,
    question: &str,
    timeout: Duration,
) -> Result<Label, AgentError> {
    let prompt = format!(
        "Classify the following as [greeting, search]: {}",
        question.trim()
    );
    let reply = invoke_with_timeout(llm, &[Message::user(prompt)], timeout).await?;
    Ok(Label::from_reply(&reply.content.to_text()))
}

/// Classifier step: writes `classification`.
pub struct ClassifyNode {
    llm: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl ClassifyNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Node<ClassifyState> for ClassifyNode {
    fn id(&self) -> &str {
        ClassifyStep::ClassifyInput.as_str()
    }

    async fn run(
        &self,
        state: ClassifyState,
        _ctx: &RunContext,
    ) -> Result<(ClassifyState, Next), AgentError> {
        let label = classify_with_timeout(self.llm.as_ref(), &state.question, self.timeout).await?;
        info!(label = label.as_str(), "classified input");
        Ok((
            ClassifyState {
                classification: Some(label),
                ..state
            },
            Next::Continue,
        ))
    }
}

/// Greeting responder.
#[derive(Debug, Default)]
pub struct GreetingNode;

#[async_trait]
impl Node<ClassifyState> for GreetingNode {
    fn id(&self) -> &str {
        ClassifyStep::HandleGreeting.as_str()
    }

    async fn run(
        &self,
        state: ClassifyState,
        _ctx: &RunContext,
    ) -> Result<(ClassifyState, Next), AgentError> {
        info!("handling greeting");
        Ok((
            ClassifyState {
                response: Some(GREETING_REPLY.to_string()),
                ..state
            },
            Next::Continue,
        ))
    }
}

/// Search responder: echoes the trimmed question.
#[derive(Debug, Default)]
pub struct SearchNode;

#[async_trait]
impl Node<ClassifyState> for SearchNode {
    fn id(&self) -> &str {
        ClassifyStep::HandleSearch.as_str()
    }

    async fn run(
        &self,
        state: ClassifyState,
        _ctx: &RunContext,
    ) -> Result<(ClassifyState, Next), AgentError> {
        info!("handling search");
        let response = format!("Search result for '{}'", state.question.trim());
        Ok((
            ClassifyState {
                response: Some(response),
                ..state
            },
            Next::Continue,
        ))
    }
}
