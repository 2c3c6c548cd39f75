//! Handle graph model: handles, capability traits and a plain in-memory graph

mod handle;
mod hash_graph;
mod traits;

pub use handle::{Edge, Handle, NodeId, PathHandle, StepHandle};
pub use hash_graph::{GraphError, GraphResult, HashGraph};
pub use traits::{
    HandleGraph, PathHandleGraph, PathPositionHandleGraph, StepPosition, VectorizableHandleGraph,
};
