//! Conversation message types.
//!
//! Aligns with LangGraph/LangChain: System (usually first in the list), User,
//! Assistant (text and optional tool calls) and Tool (the result of one call).
//! Used by `MessagesState::messages`, by `LlmClient::invoke` and by the agent nodes.

use crate::state::ToolCall;

/// One block of structured (multipart) content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    /// Plain text block.
    Text { text: String },
    /// Any non-text block (image, audio, ...); only the kind is kept.
    Other { kind: String },
}

/// Message body: either plain text or an ordered list of parts.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

impl MessageContent {
    /// Text of the first block: the whole string for `Text`, the first part's
    /// text for `Parts` (`None` when there is no first part or it is not text).
    pub fn first_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s.as_str()),
            MessageContent::Parts(parts) => match parts.first() {
                Some(ContentPart::Text { text }) => Some(text.as_str()),
                _ => None,
            },
        }
    }

    /// True when there is no usable text: empty string, no parts, or an empty
    /// or non-text first part.
    pub fn is_empty(&self) -> bool {
        self.first_text().map_or(true, str::is_empty)
    }

    /// All text joined with newlines; non-text parts are skipped.
    pub fn to_text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::Other { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Text(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Text(s.to_string())
    }
}

/// Model reply: content plus zero or more tool-call requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantMessage {
    pub content: MessageContent,
    pub tool_calls: Vec<ToolCall>,
}

/// Result of one tool call, paired with its request through `call_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMessage {
    pub call_id: String,
    pub name: String,
    pub content: String,
    /// Set when `content` is the fallback text for a failed call.
    pub is_error: bool,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model reply.
    Assistant(AssistantMessage),
    /// Tool result.
    Tool(ToolMessage),
}

impl Message {
    /// Builds a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Builds a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Builds a plain-text assistant message without tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(AssistantMessage {
            content: MessageContent::Text(content.into()),
            tool_calls: Vec::new(),
        })
    }

    /// Builds a tool result message.
    pub fn tool(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::Tool(ToolMessage {
            call_id: call_id.into(),
            name: name.into(),
            content: content.into(),
            is_error: false,
        })
    }

    /// Role name as used on the wire (`system`, `user`, `assistant`, `tool`).
    pub fn role(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::User(_) => "user",
            Message::Assistant(_) => "assistant",
            Message::Tool(_) => "tool",
        }
    }

    /// Text content of the message (joined parts for structured content).
    pub fn text(&self) -> String {
        match self {
            Message::System(s) | Message::User(s) => s.clone(),
            Message::Assistant(a) => a.content.to_text(),
            Message::Tool(t) => t.content.clone(),
        }
    }

    /// Tool calls requested by this message; empty unless it is an assistant message.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant(a) => &a.tool_calls,
            _ => &[],
        }
    }

    /// Human-readable block for terminal output: a role banner, then the text,
    /// then one line per tool call.
    pub fn pretty(&self) -> String {
        let title = match self {
            Message::System(_) => "System Message".to_string(),
            Message::User(_) => "Human Message".to_string(),
            Message::Assistant(_) => "Ai Message".to_string(),
            Message::Tool(t) => format!("Tool Message ({})", t.name),
        };
        let mut out = format!("{:=^80}\n\n{}", format!(" {} ", title), self.text());
        let calls = self.tool_calls();
        if !calls.is_empty() {
            out.push_str("\nTool Calls:");
            for call in calls {
                out.push_str(&format!(
                    "\n  {} ({})\n  Args: {}",
                    call.name, call.id, call.arguments
                ));
            }
        }
        out
    }
}
