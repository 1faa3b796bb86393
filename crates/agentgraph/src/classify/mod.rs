//! Classification graph: classify an utterance, branch to a responder.
//!
//! `START -> classify_input -> {handle_greeting | handle_search} -> END`.
//! One LLM call labels the question; the router picks the handler; each
//! handler writes a fixed-format reply.

mod nodes;
mod router;

pub use nodes::{classify_input, ClassifyNode, GreetingNode, SearchNode, GREETING_REPLY};
pub use router::{route, ClassifyBranch, ClassifyStep};

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;

/// Category of an utterance. Derived per invocation, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Greeting,
    Search,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Greeting => "greeting",
            Label::Search => "search",
        }
    }

    /// Normalizes a model reply: exactly `greeting` (after trim + lowercase) is
    /// a greeting, anything else is a search.
    pub fn from_reply(reply: &str) -> Self {
        if reply.trim().to_lowercase() == "greeting" {
            Label::Greeting
        } else {
            Label::Search
        }
    }
}

/// State of the classification graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifyState {
    pub question: String,
    pub classification: Option<Label>,
    pub response: Option<String>,
}

impl ClassifyState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }
}

/// Builds and compiles the classification graph around the given LLM.
pub fn build_classification_graph(
    llm: Arc<dyn LlmClient>,
) -> Result<CompiledStateGraph<ClassifyState>, CompilationError> {
    let greeting = ClassifyStep::HandleGreeting.as_str();
    let search = ClassifyStep::HandleSearch.as_str();
    let mut graph: StateGraph<ClassifyState> = StateGraph::new();
    graph
        .add_node(ClassifyStep::ClassifyInput.as_str(), Arc::new(ClassifyNode::new(llm)))
        .add_node(greeting, Arc::new(GreetingNode))
        .add_node(search, Arc::new(SearchNode))
        .add_edge(START, ClassifyStep::ClassifyInput.as_str())
        .add_conditional_edges(
            ClassifyStep::ClassifyInput.as_str(),
            Arc::new(ClassifyBranch),
            HashMap::from([
                (greeting.to_string(), greeting.to_string()),
                (search.to_string(), search.to_string()),
            ]),
        )
        .add_edge(greeting, END)
        .add_edge(search, END);
    graph.compile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_normalization() {
        assert_eq!(Label::from_reply("greeting"), Label::Greeting);
        assert_eq!(Label::from_reply("  Greeting\n"), Label::Greeting);
        assert_eq!(Label::from_reply("GREETING"), Label::Greeting);
        assert_eq!(Label::from_reply("search"), Label::Search);
        assert_eq!(Label::from_reply("greeting!"), Label::Search);
        assert_eq!(Label::from_reply("a greeting"), Label::Search);
        assert_eq!(Label::from_reply(""), Label::Search);
    }
}
