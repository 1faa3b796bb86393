/// One streamed value: the full state after the input was applied (`node == START`)
/// or after a node ran.
#[derive(Debug, Clone)]
pub struct GraphEvent<S> {
    pub node: String,
    /// Node executions so far (0 for the input event).
    pub step: usize,
    pub state: S,
}
