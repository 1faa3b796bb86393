//! Compiled state graph: immutable, supports invoke, stream and state inspection.
//!
//! Built by `StateGraph::compile`. Runs from the entry node; after each node the
//! returned `Next` picks the successor (Continue = outgoing edge, Node(id) = jump,
//! End = stop). With a checkpointer and `thread_id`, the saved state is loaded and
//! merged with the input, and a checkpoint is written after the input and after
//! every node.

use std::collections::HashMap;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::memory::{
    Checkpoint, CheckpointListItem, CheckpointSource, Checkpointer, RunnableConfig,
};

use super::event::GraphEvent;
use super::state_graph::{Edge, InputMerge, LimitCleanup, END, START};
use super::{Next, Node, RunContext};

/// Compiled graph: immutable structure.
///
/// **Interaction**: Built from `StateGraph`; callers use `invoke` or `stream`.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) edges: HashMap<String, Edge<S>>,
    pub(super) entry: String,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    pub(super) input_merge: Option<InputMerge<S>>,
    pub(super) on_limit: Option<LimitCleanup<S>>,
}

enum Cursor<S> {
    Input(S),
    Node { id: String, state: S, step: usize },
    Done,
}

struct Run<S> {
    config: RunnableConfig,
    cursor: Cursor<S>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Runs the graph to completion and returns the final state.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        let mut events = Box::pin(self.stream(state, config.unwrap_or_default()));
        let mut last = None;
        while let Some(event) = events.next().await {
            last = Some(event?.state);
        }
        last.ok_or_else(|| AgentError::ExecutionFailed("graph produced no state".into()))
    }

    /// Streams the full state after the input is applied and after every node.
    /// The stream ends after the first error.
    pub fn stream(
        &self,
        state: S,
        config: RunnableConfig,
    ) -> impl Stream<Item = Result<GraphEvent<S>, AgentError>> + Send + '_ {
        let run = Run {
            config,
            cursor: Cursor::Input(state),
        };
        futures::stream::unfold(run, move |mut run| async move {
            let advanced = self.advance(&mut run).await;
            match advanced {
                Ok(Some(event)) => Some((Ok(event), run)),
                Ok(None) => None,
                Err(e) => {
                    run.cursor = Cursor::Done;
                    Some((Err(e), run))
                }
            }
        })
    }

    /// Latest checkpointed state of the thread, if any.
    pub async fn get_state(&self, config: &RunnableConfig) -> Result<Option<S>, AgentError> {
        let checkpointer = self.require_checkpointer()?;
        Ok(checkpointer
            .get_tuple(config)
            .await?
            .map(|(cp, _)| cp.channel_values))
    }

    /// Checkpoints of the thread, newest first.
    pub async fn get_state_history(
        &self,
        config: &RunnableConfig,
        limit: Option<usize>,
    ) -> Result<Vec<CheckpointListItem>, AgentError> {
        let checkpointer = self.require_checkpointer()?;
        Ok(checkpointer.list(config, limit).await?)
    }

    fn require_checkpointer(&self) -> Result<&Arc<dyn Checkpointer<S>>, AgentError> {
        self.checkpointer
            .as_ref()
            .ok_or_else(|| AgentError::ExecutionFailed("graph has no checkpointer".into()))
    }

    fn thread_checkpointer(&self, config: &RunnableConfig) -> Option<&Arc<dyn Checkpointer<S>>> {
        config.thread_id.as_ref().and(self.checkpointer.as_ref())
    }

    async fn advance(&self, run: &mut Run<S>) -> Result<Option<GraphEvent<S>>, AgentError> {
        match std::mem::replace(&mut run.cursor, Cursor::Done) {
            Cursor::Done => Ok(None),
            Cursor::Input(input) => {
                let state = self.load_input(input, &run.config).await?;
                self.save(&run.config, &state, CheckpointSource::Input, 0)
                    .await?;
                if self.entry != END {
                    run.cursor = Cursor::Node {
                        id: self.entry.clone(),
                        state: state.clone(),
                        step: 0,
                    };
                }
                Ok(Some(GraphEvent {
                    node: START.to_string(),
                    step: 0,
                    state,
                }))
            }
            Cursor::Node { id, state, step } => {
                let limit = run.config.recursion_limit;
                if step >= limit {
                    warn!(limit, node = %id, "recursion limit reached");
                    if let Some(cleanup) = self.on_limit {
                        let state = cleanup(state);
                        self.save(&run.config, &state, CheckpointSource::Update, step as u64)
                            .await?;
                    }
                    return Err(AgentError::MaxIterationsExceeded(limit));
                }
                let node = self
                    .nodes
                    .get(&id)
                    .ok_or_else(|| AgentError::ExecutionFailed(format!("node not found: {id}")))?;
                let ctx = RunContext {
                    config: run.config.clone(),
                    step,
                };
                debug!(node = %id, step, "running node");
                let (state, next) = node.run(state, &ctx).await?;
                let step = step + 1;
                self.save(&run.config, &state, CheckpointSource::Loop, step as u64)
                    .await?;
                if let Some(to) = self.successor(&id, &state, next)? {
                    run.cursor = Cursor::Node {
                        id: to,
                        state: state.clone(),
                        step,
                    };
                }
                Ok(Some(GraphEvent {
                    node: id,
                    step,
                    state,
                }))
            }
        }
    }

    /// Next node id, or `None` when the run ends.
    fn successor(&self, from: &str, state: &S, next: Next) -> Result<Option<String>, AgentError> {
        let to = match next {
            Next::End => return Ok(None),
            Next::Node(id) => {
                if id != END && !self.nodes.contains_key(&id) {
                    return Err(AgentError::UnknownRoute {
                        node: from.to_string(),
                        key: id,
                    });
                }
                id
            }
            Next::Continue => match self.edges.get(from) {
                None => return Ok(None),
                Some(Edge::Fixed(to)) => to.clone(),
                Some(Edge::Conditional { branch, path_map }) => {
                    let key = branch.route(state);
                    debug!(node = %from, route = %key, "conditional edge");
                    path_map
                        .get(&key)
                        .cloned()
                        .ok_or_else(|| AgentError::UnknownRoute {
                            node: from.to_string(),
                            key,
                        })?
                }
            },
        };
        Ok((to != END).then_some(to))
    }

    async fn load_input(&self, input: S, config: &RunnableConfig) -> Result<S, AgentError> {
        let Some(checkpointer) = self.thread_checkpointer(config) else {
            return Ok(input);
        };
        let state = match checkpointer.get_tuple(config).await? {
            Some((saved, _)) => match self.input_merge {
                Some(merge) => merge(saved.channel_values, input),
                None => input,
            },
            None => input,
        };
        Ok(state)
    }

    async fn save(
        &self,
        config: &RunnableConfig,
        state: &S,
        source: CheckpointSource,
        step: u64,
    ) -> Result<(), AgentError> {
        if let Some(checkpointer) = self.thread_checkpointer(config) {
            let checkpoint = Checkpoint::from_state(state.clone(), source, step);
            checkpointer.put(config, &checkpoint).await?;
        }
        Ok(())
    }
}
