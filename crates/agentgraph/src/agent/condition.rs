use crate::graph::{Branch, END};
use crate::state::MessagesState;

use super::TOOLS_NODE;

/// Routes to `tools` when the last message is an assistant reply with tool
/// calls, otherwise to `END`.
#[derive(Debug, Default)]
pub struct ToolsCondition;

impl Branch<MessagesState> for ToolsCondition {
    fn outcomes(&self) -> Vec<String> {
        vec![TOOLS_NODE.to_string(), END.to_string()]
    }

    fn route(&self, state: &MessagesState) -> String {
        if state.pending_tool_calls().is_empty() {
            END.to_string()
        } else {
            TOOLS_NODE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{AssistantMessage, Message};
    use crate::state::ToolCall;

    #[test]
    fn routes_on_last_message_tool_calls() {
        let mut state = MessagesState::from_user("hi");
        assert_eq!(ToolsCondition.route(&state), END);
        state.messages.push(Message::Assistant(AssistantMessage {
            content: Default::default(),
            tool_calls: vec![ToolCall::new("1", "fetch_stock_price", serde_json::json!({}))],
        }));
        assert_eq!(ToolsCondition.route(&state), "tools");
        state.messages.push(Message::assistant("done"));
        assert_eq!(ToolsCondition.route(&state), END);
    }
}
