//! Memory: invoke config, checkpoints, checkpointer, session store.
//!
//! Aligns with LangGraph's Checkpointer. The only backend is `MemorySaver`,
//! an in-memory map keyed by thread id; nothing is persisted across processes.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;
mod session;

pub use checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::{RunnableConfig, DEFAULT_RECURSION_LIMIT};
pub use memory_saver::MemorySaver;
pub use session::SessionStore;
