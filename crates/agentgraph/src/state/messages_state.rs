//! Message-list state and tool call type for the agent graph.
//!
//! `MessagesState` holds the ordered conversation; nodes only ever append to it.
//! `ToolCall` aligns with the OpenAI / MCP `tools/call` shape: id, name, JSON arguments.

use serde_json::Value;

use crate::message::Message;

/// A single tool invocation requested by the model.
///
/// Written by `AssistantNode` (inside `AssistantMessage::tool_calls`), read by
/// `ToolsNode`, which answers it with a `Message::Tool` carrying the same `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Call id used to pair the request with its result.
    pub id: String,
    /// Tool name as registered in the `ToolSource`.
    pub name: String,
    /// Argument mapping, normally a JSON object.
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Conversation state: ordered, append-only list of messages.
///
/// **Interaction**: State type of the agent graph (`AssistantNode`, `ToolsNode`);
/// checkpointed by `MemorySaver<MessagesState>`, which also exposes it as a `SessionStore`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagesState {
    pub messages: Vec<Message>,
}

impl MessagesState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// State holding a single user message.
    pub fn from_user(input: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(input)],
        }
    }

    /// Reducer used when a checkpointed thread is resumed: the new input's
    /// messages are appended after the saved ones.
    pub fn add_messages(saved: MessagesState, input: MessagesState) -> MessagesState {
        let mut messages = saved.messages;
        messages.extend(input.messages);
        MessagesState { messages }
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool calls of the last message when it is an assistant message.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.last().map(Message::tool_calls).unwrap_or(&[])
    }
}
