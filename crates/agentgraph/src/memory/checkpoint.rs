//! Checkpoint and metadata types.
//!
//! Aligns with LangGraph checkpoint (id, ts, channel_values, metadata).

use std::time::SystemTime;

/// Metadata for a single checkpoint (source, step, created_at).
#[derive(Debug, Clone)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    pub step: u64,
    pub created_at: Option<SystemTime>,
}

/// What wrote the checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointSource {
    /// Graph input (after merging with the saved state).
    Input,
    /// After a node ran.
    Loop,
    /// Written outside a node: `SessionStore::append`, or the recursion-limit cleanup.
    Update,
}

/// One checkpoint: state snapshot + id/ts.
///
/// Stored by a `Checkpointer` keyed by (thread_id, checkpoint_ns); `channel_values`
/// is the graph state `S`.
///
/// **Interaction**: Produced by graph execution; consumed by `Checkpointer::put`,
/// returned by `get_tuple`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub id: String,
    pub ts: String,
    pub channel_values: S,
    pub metadata: CheckpointMetadata,
}

/// Item returned by `Checkpointer::list` for history.
#[derive(Debug, Clone)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Builds a checkpoint from the current state with a fresh id and timestamp.
    pub fn from_state(state: S, source: CheckpointSource, step: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ts: chrono::Utc::now().to_rfc3339(),
            channel_values: state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(SystemTime::now()),
            },
        }
    }
}
