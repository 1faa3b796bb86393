//! Agent nodes and the agent graph: re-prompt loop, tool dispatch fallback, tool pairing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};

use agentgraph::agent::{
    build_agent_graph, default_agent_graph, handle_tool_error, AssistantNode, ToolsNode,
    REPROMPT_TEXT,
};
use agentgraph::message::ContentPart;
use agentgraph::{
    AgentError, LlmClient, LlmResponse, MemorySaver, Message, MessageContent, MessagesState,
    MockLlm, Next, Node, RunContext, RunnableConfig, Tool, ToolCall, ToolError, ToolRegistry,
    ToolSourceError,
};

fn empty_parts() -> LlmResponse {
    LlmResponse {
        content: MessageContent::Parts(vec![ContentPart::Text {
            text: String::new(),
        }]),
        tool_calls: vec![],
    }
}

fn with_tool_calls(calls: Vec<ToolCall>) -> MessagesState {
    let mut state = MessagesState::from_user("go");
    state.messages.push(LlmResponse::tool_calls(calls).into_message());
    state
}

#[tokio::test]
async fn assistant_reprompts_until_real_output() {
    // N = 3 degenerate replies (empty text, empty first part, no parts) then a real one.
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::text(""),
        empty_parts(),
        LlmResponse {
            content: MessageContent::Parts(vec![]),
            tool_calls: vec![],
        },
        LlmResponse::text("Here you go."),
    ]));
    let node = AssistantNode::new(llm.clone());
    let ctx = RunContext::new(RunnableConfig::default().with_user_id("cplog"));

    let (out, next) = node.run(MessagesState::from_user("hi"), &ctx).await.unwrap();
    assert_eq!(next, Next::Continue);
    assert_eq!(llm.calls(), 4);
    // Only the final reply is persisted.
    assert_eq!(
        out.messages,
        vec![Message::user("hi"), Message::assistant("Here you go.")]
    );

    let requests = llm.requests();
    assert!(matches!(&requests[0][0], Message::System(s) if s.contains("cplog")));
    assert_eq!(requests[0].len(), 2);
    assert_eq!(requests[3].len(), 5);
    assert!(requests[3][2..]
        .iter()
        .all(|m| *m == Message::user(REPROMPT_TEXT)));
}

#[tokio::test]
async fn assistant_accepts_tool_calls_without_text() {
    let call = ToolCall::new("c1", "fetch_stock_price", json!({"symbol": "ABC"}));
    let llm = Arc::new(MockLlm::first_tool_then_answer(call.clone(), "done"));
    let node = AssistantNode::new(llm.clone());
    let (out, _) = node
        .run(MessagesState::from_user("price?"), &RunContext::default())
        .await
        .unwrap();
    assert_eq!(llm.calls(), 1);
    assert_eq!(out.pending_tool_calls(), &[call]);
}

#[tokio::test]
async fn assistant_gives_up_after_max_attempts() {
    let llm = Arc::new(MockLlm::with_no_tool_calls(""));
    let node = AssistantNode::new(llm.clone()).with_max_attempts(3);
    let err = node
        .run(MessagesState::from_user("hi"), &RunContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::MaxIterationsExceeded(3)));
    assert_eq!(llm.calls(), 3);
}

#[tokio::test]
async fn unknown_tool_becomes_fallback_text() {
    let node = ToolsNode::new(Arc::new(ToolRegistry::demo().unwrap()));
    let state = with_tool_calls(vec![ToolCall::new("c1", "nope", json!({}))]);
    let (out, _) = node.run(state, &RunContext::default()).await.unwrap();
    match out.last() {
        Some(Message::Tool(t)) => {
            assert_eq!(t.call_id, "c1");
            assert!(t.is_error);
            assert_eq!(
                t.content,
                "An error occurred while using the tool: tool not found: nope"
            );
        }
        other => panic!("expected tool message, got {:?}", other),
    }
}

#[tokio::test]
async fn every_call_gets_exactly_one_result_in_order() {
    let node = ToolsNode::new(Arc::new(ToolRegistry::demo().unwrap()));
    let state = with_tool_calls(vec![
        ToolCall::new("a", "get_current_weather", json!({"location": "Oslo"})),
        ToolCall::new("b", "fetch_stock_price", json!({})),
        ToolCall::new("c", "fetch_stock_price", Value::String("{bad json".into())),
    ]);
    let (out, _) = node.run(state, &RunContext::default()).await.unwrap();
    let results: Vec<(&str, bool)> = out.messages[2..]
        .iter()
        .map(|m| match m {
            Message::Tool(t) => (t.call_id.as_str(), t.is_error),
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(results, vec![("a", false), ("b", true), ("c", true)]);
    assert!(out.messages[2].text().starts_with("Current weather in Oslo:"));
}

#[tokio::test]
async fn tools_node_without_pending_calls_fails() {
    let node = ToolsNode::new(Arc::new(ToolRegistry::demo().unwrap()));
    let err = node
        .run(MessagesState::from_user("hi"), &RunContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::ExecutionFailed(_)));
}

struct Slow;

#[async_trait]
impl Tool for Slow {
    fn name(&self) -> &str {
        "slow"
    }
    fn description(&self) -> &str {
        "Never finishes in time."
    }
    fn parameters_schema(&self) -> Value {
        json!({"type": "object"})
    }
    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(json!("late"))
    }
}

fn terse(error: &ToolSourceError) -> String {
    format!("failed: {}", error)
}

#[tokio::test]
async fn slow_tool_times_out_into_custom_fallback() {
    let registry = ToolRegistry::new().with_tool(Arc::new(Slow)).unwrap();
    let node = ToolsNode::new(Arc::new(registry))
        .with_timeout(Duration::from_millis(20))
        .with_error_handler(terse);
    let state = with_tool_calls(vec![ToolCall::new("s", "slow", json!({}))]);
    let (out, _) = node.run(state, &RunContext::default()).await.unwrap();
    assert!(out.messages[2].text().starts_with("failed: tool call timed out"));
    assert_eq!(
        handle_tool_error(&ToolSourceError::NotFound("x".into())),
        "An error occurred while using the tool: tool not found: x"
    );
}

#[tokio::test]
async fn agent_answers_stock_price_end_to_end() {
    let llm = Arc::new(MockLlm::first_tool_then_answer(
        ToolCall::new("call_1", "fetch_stock_price", json!({"symbol": "ABC"})),
        "ABC is trading as shown above.",
    ));
    let graph = default_agent_graph(llm.clone(), Arc::new(ToolRegistry::demo().unwrap()), None).unwrap();
    let out = graph
        .invoke(MessagesState::from_user("What is the price of ABC?"), None)
        .await
        .unwrap();

    assert_eq!(llm.calls(), 2);
    assert_eq!(out.messages.len(), 4);
    let price = Regex::new(r"^The current price of ABC is \$\d+\.\d{2}$").unwrap();
    match &out.messages[2] {
        Message::Tool(t) => {
            assert_eq!(t.call_id, "call_1");
            assert!(price.is_match(&t.content), "{}", t.content);
        }
        other => panic!("expected tool message, got {:?}", other),
    }
    assert_eq!(out.messages[3], Message::assistant("ABC is trading as shown above."));

    // The second request saw the tool result paired with its call.
    let second = &llm.requests()[1];
    assert!(matches!(second.last(), Some(Message::Tool(t)) if t.call_id == "call_1"));
}

#[tokio::test]
async fn endless_tool_loop_hits_recursion_limit() {
    let looping = Arc::new(MockLlm::scripted(vec![LlmResponse::tool_calls(vec![
        ToolCall::new("x", "fetch_stock_price", json!({"symbol": "ABC"})),
    ])]));
    let graph = default_agent_graph(looping, Arc::new(ToolRegistry::demo().unwrap()), None).unwrap();
    let err = graph
        .invoke(
            MessagesState::from_user("loop"),
            Some(RunnableConfig::default().with_recursion_limit(6)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::MaxIterationsExceeded(6)));
}

/// LLM that never answers within a test's timeout.
struct StalledLlm;

#[async_trait]
impl LlmClient for StalledLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(LlmResponse::text("too late"))
    }
}

#[tokio::test]
async fn assistant_llm_timeout_fails_step_and_keeps_state() {
    let node = AssistantNode::new(Arc::new(StalledLlm)).with_timeout(Duration::from_millis(20));
    let err = node
        .run(MessagesState::from_user("hi"), &RunContext::default())
        .await
        .unwrap_err();
    match err {
        AgentError::Timeout { what, after } => {
            assert_eq!(what, "llm call");
            assert_eq!(after, Duration::from_millis(20));
        }
        other => panic!("expected timeout, got {:?}", other),
    }

    // Through the graph: the saved thread still holds only the input.
    let saver = Arc::new(MemorySaver::<MessagesState>::new());
    let graph = build_agent_graph(
        AssistantNode::new(Arc::new(StalledLlm)).with_timeout(Duration::from_millis(20)),
        ToolsNode::new(Arc::new(ToolRegistry::demo().unwrap())),
        Some(saver.clone()),
    )
    .unwrap();
    let config = RunnableConfig::for_thread("slow");
    let err = graph
        .invoke(MessagesState::from_user("hi"), Some(config.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Timeout { .. }));
    assert_eq!(
        graph.get_state(&config).await.unwrap(),
        Some(MessagesState::from_user("hi"))
    );
}
