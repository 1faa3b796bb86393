//! In-memory checkpointer.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata};
use crate::memory::checkpointer::{CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

type ThreadKey = (String, String);

/// In-memory checkpointer. Each (thread_id, checkpoint_ns) holds an append-only
/// list of checkpoints; the last one is the current state.
///
/// Lost when the process exits. Assumes one writer per thread.
///
/// **Interaction**: Passed to `StateGraph::compile_with_checkpointer`; for
/// `MessagesState` it also serves as the `SessionStore`.
pub struct MemorySaver<S> {
    threads: RwLock<HashMap<ThreadKey, Vec<Checkpoint<S>>>>,
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
        }
    }
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        Self::default()
    }
}

fn thread_key(config: &RunnableConfig) -> Result<ThreadKey, CheckpointError> {
    let thread_id = config
        .thread_id
        .as_ref()
        .ok_or(CheckpointError::ThreadIdRequired)?;
    Ok((thread_id.clone(), config.checkpoint_ns.clone()))
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = thread_key(config)?;
        let mut threads = self.threads.write().await;
        threads.entry(key).or_default().push(checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError> {
        let key = thread_key(config)?;
        let threads = self.threads.read().await;
        let Some(list) = threads.get(&key) else {
            return Ok(None);
        };
        let found = match &config.checkpoint_id {
            Some(id) => Some(
                list.iter()
                    .find(|c| &c.id == id)
                    .ok_or_else(|| CheckpointError::NotFound(id.clone()))?,
            ),
            None => list.last(),
        };
        Ok(found.map(|c| (c.clone(), c.metadata.clone())))
    }

    async fn list(
        &self,
        config: &RunnableConfig,
        limit: Option<usize>,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let key = thread_key(config)?;
        let threads = self.threads.read().await;
        let items = threads
            .get(&key)
            .map(|list| {
                list.iter()
                    .rev()
                    .take(limit.unwrap_or(usize::MAX))
                    .map(|c| CheckpointListItem {
                        checkpoint_id: c.id.clone(),
                        metadata: c.metadata.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }
}
