//! Storage boundary for graph checkpoints.
//!
//! A thread is addressed by `(thread_id, checkpoint_ns)`; within a thread the
//! checkpoints form an append-only history whose last entry is the current state.

use async_trait::async_trait;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata};
use crate::memory::config::RunnableConfig;

/// Why a checkpoint could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// The config carries no `thread_id`, so there is no thread to address.
    #[error("thread_id required")]
    ThreadIdRequired,
    /// `config.checkpoint_id` names a checkpoint the thread does not have.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Checkpoint storage used by `CompiledStateGraph` when a run has a `thread_id`.
///
/// The graph writes an `Input` checkpoint before the first node and a `Loop`
/// checkpoint after each node; `MemorySaver` is the in-process backend, and
/// for `MessagesState` it also backs `SessionStore`.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Appends `checkpoint` to the thread; returns its id.
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError>;

    /// Current checkpoint of the thread, or the one pinned by `config.checkpoint_id`.
    /// `None` for a thread that has never been written.
    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError>;

    /// Thread history, newest first, at most `limit` items.
    async fn list(
        &self,
        config: &RunnableConfig,
        limit: Option<usize>,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError>;
}
