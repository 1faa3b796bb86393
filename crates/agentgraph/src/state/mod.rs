//! State types shared by graphs.
//!
//! `MessagesState` is the conversation state of the agent graph; `ToolCall`
//! is the request half of a tool round trip (the result half is `Message::Tool`).

mod messages_state;

pub use messages_state::{MessagesState, ToolCall};
