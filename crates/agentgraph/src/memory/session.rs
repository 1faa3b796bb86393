//! Session checkpoint boundary: message history keyed by session id.

use async_trait::async_trait;

use crate::memory::checkpoint::{Checkpoint, CheckpointSource};
use crate::memory::checkpointer::{CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;
use crate::memory::memory_saver::MemorySaver;
use crate::message::Message;
use crate::state::MessagesState;

/// Message history per session. A session is created on first interaction;
/// history only grows.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Messages of the session in conversation order; empty when the session is new.
    async fn get(&self, session_id: &str) -> Result<Vec<Message>, CheckpointError>;

    /// Appends one message to the session.
    async fn append(&self, session_id: &str, message: Message) -> Result<(), CheckpointError>;
}

/// View over the latest checkpoint of each thread; `append` writes an `Update` checkpoint.
#[async_trait]
impl SessionStore for MemorySaver<MessagesState> {
    async fn get(&self, session_id: &str) -> Result<Vec<Message>, CheckpointError> {
        let config = RunnableConfig::for_thread(session_id);
        Ok(self
            .get_tuple(&config)
            .await?
            .map(|(cp, _)| cp.channel_values.messages)
            .unwrap_or_default())
    }

    async fn append(&self, session_id: &str, message: Message) -> Result<(), CheckpointError> {
        let config = RunnableConfig::for_thread(session_id);
        let (mut state, step) = match self.get_tuple(&config).await? {
            Some((cp, meta)) => (cp.channel_values, meta.step + 1),
            None => (MessagesState::default(), 0),
        };
        state.messages.push(message);
        let checkpoint = Checkpoint::from_state(state, CheckpointSource::Update, step);
        self.put(&config, &checkpoint).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_session_is_empty() {
        let saver: MemorySaver<MessagesState> = MemorySaver::new();
        assert!(saver.get("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_grows_history_in_order() {
        let saver: MemorySaver<MessagesState> = MemorySaver::new();
        saver.append("s1", Message::user("hi")).await.unwrap();
        saver.append("s1", Message::assistant("hello")).await.unwrap();
        let history = saver.get("s1").await.unwrap();
        assert_eq!(history, vec![Message::user("hi"), Message::assistant("hello")]);
        assert!(saver.get("s2").await.unwrap().is_empty());

        let list = saver
            .list(&RunnableConfig::for_thread("s1"), None)
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].metadata.step, 1);
        assert_eq!(list[0].metadata.source, CheckpointSource::Update);
    }
}
