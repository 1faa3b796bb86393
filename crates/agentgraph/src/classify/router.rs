//! Branch router: label to handler step.

use crate::classify::{ClassifyState, Label};
use crate::graph::Branch;

/// Steps of the classification graph; `as_str` is the node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyStep {
    ClassifyInput,
    HandleGreeting,
    HandleSearch,
}

impl ClassifyStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifyStep::ClassifyInput => "classify_input",
            ClassifyStep::HandleGreeting => "handle_greeting",
            ClassifyStep::HandleSearch => "handle_search",
        }
    }
}

/// Total mapping from label to the handler that answers it.
pub fn route(label: Label) -> ClassifyStep {
    match label {
        Label::Greeting => ClassifyStep::HandleGreeting,
        Label::Search => ClassifyStep::HandleSearch,
    }
}

/// Conditional edge after `classify_input`. A missing classification routes to search.
#[derive(Debug, Default)]
pub struct ClassifyBranch;

impl Branch<ClassifyState> for ClassifyBranch {
    fn outcomes(&self) -> Vec<String> {
        [ClassifyStep::HandleGreeting, ClassifyStep::HandleSearch]
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    fn route(&self, state: &ClassifyState) -> String {
        route(state.classification.unwrap_or(Label::Search))
            .as_str()
            .to_string()
    }
}
