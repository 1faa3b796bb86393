//! State graph: nodes, fixed and conditional edges, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: add nodes and edges (with `START`/`END`
//! sentinels), compile, then invoke or stream with state.

mod branch;
mod compile_error;
mod compiled;
mod event;
mod next;
mod node;
mod run_context;
mod state_graph;

pub use branch::Branch;
pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use event::GraphEvent;
pub use next::Next;
pub use node::Node;
pub use run_context::RunContext;
pub use state_graph::{StateGraph, END, START};
