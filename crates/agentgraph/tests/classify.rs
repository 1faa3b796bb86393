//! Classification graph end to end with a scripted LLM.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use agentgraph::classify::{
    build_classification_graph, classify_input, ClassifyNode, ClassifyState, Label,
    GREETING_REPLY,
};
use agentgraph::{
    AgentError, LlmClient, LlmResponse, Message, MockLlm, Node, RunContext, RunnableConfig,
};

#[tokio::test]
async fn classifier_sends_instruction_with_trimmed_question() {
    let llm = MockLlm::with_no_tool_calls("  Greeting \n");
    let label = classify_input(&llm, "  hi  ").await.unwrap();
    assert_eq!(label, Label::Greeting);
    assert_eq!(
        llm.requests(),
        vec![vec![Message::user(
            "Classify the following as [greeting, search]: hi"
        )]]
    );
}

#[tokio::test]
async fn malformed_reply_falls_back_to_search() {
    for reply in ["greeting, search", "hello", "", "I think it's a greeting"] {
        let llm = MockLlm::with_no_tool_calls(reply);
        assert_eq!(classify_input(&llm, "hi").await.unwrap(), Label::Search, "{reply:?}");
        assert_eq!(llm.calls(), 1);
    }
}

#[tokio::test]
async fn hi_routes_to_greeting() {
    let graph = build_classification_graph(Arc::new(MockLlm::with_no_tool_calls("greeting"))).unwrap();
    let out = graph.invoke(ClassifyState::new("hi"), None).await.unwrap();
    assert_eq!(out.classification, Some(Label::Greeting));
    assert_eq!(out.response.as_deref(), Some(GREETING_REPLY));
}

#[tokio::test]
async fn find_cats_routes_to_search() {
    let graph = build_classification_graph(Arc::new(MockLlm::with_no_tool_calls("search"))).unwrap();
    let out = graph
        .invoke(ClassifyState::new(" find cats "), None)
        .await
        .unwrap();
    assert_eq!(out.classification, Some(Label::Search));
    assert_eq!(out.response.as_deref(), Some("Search result for 'find cats'"));
}

struct StalledLlm;

#[async_trait]
impl LlmClient for StalledLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(LlmResponse::text("greeting"))
    }
}

#[tokio::test]
async fn classifier_llm_timeout_fails_the_step() {
    let node = ClassifyNode::new(Arc::new(StalledLlm)).with_timeout(Duration::from_millis(20));
    let ctx = RunContext::new(RunnableConfig::default());
    let err = node
        .run(ClassifyState::new("hi"), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AgentError::Timeout { ref what, after } if what == "llm call" && after == Duration::from_millis(20)
    ));
}
