//! State graph builder: nodes, fixed edges and conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge` / `add_conditional_edges`
//! (using the `START` / `END` sentinels), then `compile` or
//! `compile_with_checkpointer` to get a `CompiledStateGraph`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::graph::branch::Branch;
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::memory::Checkpointer;

/// Virtual entry node.
pub const START: &str = "__start__";
/// Virtual exit node.
pub const END: &str = "__end__";

/// Outgoing edge of a node.
pub(super) enum Edge<S> {
    Fixed(String),
    Conditional {
        branch: Arc<dyn Branch<S>>,
        path_map: HashMap<String, String>,
    },
}

/// Reducer applied to (saved state, input) when a checkpointed thread is resumed.
pub type InputMerge<S> = fn(S, S) -> S;

/// Applied to the state when the recursion limit stops a run; the result is
/// checkpointed before `MaxIterationsExceeded` is returned.
pub type LimitCleanup<S> = fn(S) -> S;

/// State graph builder, generic over state type `S`.
///
/// Errors (unknown endpoints, duplicates, unmapped branch outcomes) are collected
/// and reported by `compile()`.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>` and `Arc<dyn Branch<S>>`;
/// produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, Edge<S>)>,
    input_merge: Option<InputMerge<S>>,
    on_limit: Option<LimitCleanup<S>>,
    duplicate_nodes: Vec<String>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            input_merge: None,
            on_limit: None,
            duplicate_nodes: Vec::new(),
        }
    }

    /// Adds a node; ids must be unique and may not be `START` or `END`.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        let id = id.into();
        if self.nodes.insert(id.clone(), node).is_some() {
            self.duplicate_nodes.push(id);
        }
        self
    }

    /// Fixed edge `from -> to`. Use `START` for the entry edge and `END` to finish.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), Edge::Fixed(to.into())));
        self
    }

    /// Conditional edge: after `from` runs, `branch.route(state)` is looked up in
    /// `path_map` (outcome key -> node id or `END`).
    pub fn add_conditional_edges(
        &mut self,
        from: impl Into<String>,
        branch: Arc<dyn Branch<S>>,
        path_map: HashMap<String, String>,
    ) -> &mut Self {
        self.edges
            .push((from.into(), Edge::Conditional { branch, path_map }));
        self
    }

    /// Reducer used to combine the saved state with new input when resuming a thread.
    /// Without one, the input replaces the saved state.
    pub fn with_input_merge(&mut self, merge: InputMerge<S>) -> &mut Self {
        self.input_merge = Some(merge);
        self
    }

    /// Hook that leaves the state consistent when the recursion limit cuts a run
    /// short (e.g. answering tool calls that will not run).
    pub fn on_recursion_limit(&mut self, cleanup: LimitCleanup<S>) -> &mut Self {
        self.on_limit = Some(cleanup);
        self
    }

    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.build(None)
    }

    /// Like `compile`, with a checkpointer used when `config.thread_id` is set.
    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.build(Some(checkpointer))
    }

    fn build(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        if let Some(id) = self.duplicate_nodes.into_iter().next() {
            return Err(CompilationError::DuplicateNode(id));
        }
        for id in [START, END] {
            if self.nodes.contains_key(id) {
                return Err(CompilationError::ReservedNodeId(id.to_string()));
            }
        }
        let is_target = |id: &str| id == END || self.nodes.contains_key(id);

        let mut seen = HashSet::new();
        let mut entry = None;
        let mut edges = HashMap::new();
        for (from, edge) in self.edges {
            if !seen.insert(from.clone()) {
                return Err(CompilationError::DuplicateEdge(from));
            }
            if from != START && !self.nodes.contains_key(&from) {
                return Err(CompilationError::NodeNotFound(from));
            }
            match &edge {
                Edge::Fixed(to) => {
                    if !is_target(to) {
                        return Err(CompilationError::NodeNotFound(to.clone()));
                    }
                }
                Edge::Conditional { branch, path_map } => {
                    if from == START {
                        return Err(CompilationError::ConditionalEntry);
                    }
                    for outcome in branch.outcomes() {
                        if !path_map.contains_key(&outcome) {
                            return Err(CompilationError::UnmappedOutcome {
                                node: from.clone(),
                                outcome,
                            });
                        }
                    }
                    if let Some(to) = path_map.values().find(|to| !is_target(to)) {
                        return Err(CompilationError::NodeNotFound(to.clone()));
                    }
                }
            }
            if from == START {
                if let Edge::Fixed(to) = edge {
                    entry = Some(to);
                }
            } else {
                edges.insert(from, edge);
            }
        }
        let entry = entry.ok_or(CompilationError::MissingEntry)?;

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edges,
            entry,
            checkpointer,
            input_merge: self.input_merge,
            on_limit: self.on_limit,
        })
    }
}
