//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S` and the run context, returns updated `S` and `Next`.
//! Aligns with LangGraph node `(state, config) -> partial`; returns full `S` and routing.

use async_trait::async_trait;

use crate::error::AgentError;

use super::{Next, RunContext};

/// One step in a graph: state in, (state out, next step).
///
/// **Interaction**: Registered with `StateGraph::add_node`; driven by
/// `CompiledStateGraph::invoke` / `stream`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Node id (e.g. `"assistant"`, `"tools"`).
    fn id(&self) -> &str;

    /// One step. Return `Next::Continue` to follow the graph edges.
    async fn run(&self, state: S, ctx: &RunContext) -> Result<(S, Next), AgentError>;
}
