//! Invoke config: thread_id, checkpoint_id, checkpoint_ns, user_id, recursion limit.
//!
//! Aligns with LangGraph's `config["configurable"]`. Used by `CompiledStateGraph::invoke`
//! and `Checkpointer`.

/// Maximum node executions per invoke unless overridden.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Config for a single invoke. Identifies the thread and optional checkpoint.
///
/// When using a checkpointer, invoke must provide at least `thread_id`.
///
/// **Interaction**: Passed to `CompiledStateGraph::invoke(state, config)` and
/// `Checkpointer::put` / `get_tuple` / `list`; `user_id` reaches nodes through `RunContext`.
#[derive(Debug, Clone)]
pub struct RunnableConfig {
    /// Unique id for this conversation/thread. Required when using a checkpointer.
    pub thread_id: Option<String>,
    /// If set, load state from this checkpoint instead of the latest.
    pub checkpoint_id: Option<String>,
    /// Optional namespace for checkpoints. Default is empty.
    pub checkpoint_ns: String,
    /// Optional user id; rendered into the assistant's system prompt.
    pub user_id: Option<String>,
    /// Maximum node executions for one invoke.
    pub recursion_limit: usize,
}

impl Default for RunnableConfig {
    fn default() -> Self {
        Self {
            thread_id: None,
            checkpoint_id: None,
            checkpoint_ns: String::new(),
            user_id: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl RunnableConfig {
    /// Config bound to a thread.
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}
