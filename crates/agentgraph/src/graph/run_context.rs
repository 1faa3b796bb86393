use crate::memory::RunnableConfig;

/// Per-run data handed to every node: the invoke config and the current step.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub config: RunnableConfig,
    /// Node executions completed before this one.
    pub step: usize,
}

impl RunContext {
    pub fn new(config: RunnableConfig) -> Self {
        Self { config, step: 0 }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.config.user_id.as_deref()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.config.thread_id.as_deref()
    }
}
