//! Conditional edge router.

/// Router for a conditional edge: maps state to one of a finite set of keys.
///
/// `outcomes` declares every key `route` can return; `StateGraph::compile`
/// rejects a path map that leaves any of them unmapped.
///
/// **Interaction**: Passed to `StateGraph::add_conditional_edges` with a path map
/// from key to node id (or `END`).
pub trait Branch<S>: Send + Sync {
    /// Every key `route` may return.
    fn outcomes(&self) -> Vec<String>;

    /// Picks the key for the given state.
    fn route(&self, state: &S) -> String;
}
