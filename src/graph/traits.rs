//! Capability traits for handle graphs
//!
//! Each trait describes one capability a graph may support. Richer
//! capabilities extend poorer ones, so a `dyn PathPositionHandleGraph` is
//! also usable wherever a `dyn PathHandleGraph` or `dyn HandleGraph` is
//! expected.
//!
//! Whether a particular graph supports a richer capability than its static
//! type promises is answered by the `as_*` probe methods on [`HandleGraph`].
//! They return `None` unless the concrete type overrides them.

use super::handle::{Edge, Handle, NodeId, PathHandle, StepHandle};
use std::collections::BTreeSet;

/// Minimal capability: oriented nodes with sequences and bidirected edges.
pub trait HandleGraph {
    fn has_node(&self, id: NodeId) -> bool;

    /// Length of the node's sequence
    fn get_length(&self, handle: Handle) -> usize;

    /// Sequence of the node, reverse-complemented for reverse handles
    fn get_sequence(&self, handle: Handle) -> String;

    /// Handles reached by leaving `handle` on its right side, or on its left
    /// side when `go_left` is set.
    fn follow_edges(&self, handle: Handle, go_left: bool) -> Vec<Handle>;

    /// All nodes in forward orientation, in ascending id order
    fn handles(&self) -> Box<dyn Iterator<Item = Handle> + '_>;

    fn node_count(&self) -> usize;

    fn min_node_id(&self) -> Option<NodeId>;

    fn max_node_id(&self) -> Option<NodeId>;

    fn get_degree(&self, handle: Handle, go_left: bool) -> usize {
        self.follow_edges(handle, go_left).len()
    }

    /// Every edge once, in canonical form and sorted order
    fn edges(&self) -> Vec<Edge> {
        let mut seen = BTreeSet::new();
        for handle in self.handles() {
            for next in self.follow_edges(handle, false) {
                seen.insert(Edge::new(handle, next).canonical());
            }
            for prev in self.follow_edges(handle, true) {
                seen.insert(Edge::new(prev, handle).canonical());
            }
        }
        seen.into_iter().collect()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Probe: this graph viewed as a [`PathHandleGraph`], if its type is one
    fn as_path_graph(&self) -> Option<&dyn PathHandleGraph> {
        None
    }

    /// Probe: this graph viewed as a [`PathPositionHandleGraph`], if its type is one
    fn as_path_position_graph(&self) -> Option<&dyn PathPositionHandleGraph> {
        None
    }

    /// Probe: this graph viewed as a [`VectorizableHandleGraph`], if its type is one
    fn as_vectorizable_graph(&self) -> Option<&dyn VectorizableHandleGraph> {
        None
    }
}

/// Embedded paths: named walks through oriented handles.
pub trait PathHandleGraph: HandleGraph {
    fn path_count(&self) -> usize;

    fn get_path_handle(&self, name: &str) -> Option<PathHandle>;

    fn get_path_name(&self, path: PathHandle) -> &str;

    fn get_step_count(&self, path: PathHandle) -> usize;

    /// All paths, in creation order
    fn path_handles(&self) -> Box<dyn Iterator<Item = PathHandle> + '_>;

    /// The oriented handle a step visits.
    ///
    /// # Panics
    ///
    /// If `step` does not name a step of a path in this graph. Step handles
    /// come from the graph's own path queries, so this only happens when a
    /// handle from another graph is passed in.
    fn get_handle_of_step(&self, step: StepHandle) -> Handle;

    /// Every step on any path that visits the node of `handle`, in either orientation
    fn steps_of_handle(&self, handle: Handle) -> Vec<StepHandle>;

    fn has_path(&self, name: &str) -> bool {
        self.get_path_handle(name).is_some()
    }

    fn path_begin(&self, path: PathHandle) -> Option<StepHandle> {
        (self.get_step_count(path) > 0).then(|| StepHandle::new(path, 0))
    }

    fn path_back(&self, path: PathHandle) -> Option<StepHandle> {
        self.get_step_count(path)
            .checked_sub(1)
            .map(|rank| StepHandle::new(path, rank))
    }

    fn get_next_step(&self, step: StepHandle) -> Option<StepHandle> {
        let next = step.rank + 1;
        (next < self.get_step_count(step.path)).then(|| StepHandle::new(step.path, next))
    }

    fn get_previous_step(&self, step: StepHandle) -> Option<StepHandle> {
        step.rank
            .checked_sub(1)
            .map(|rank| StepHandle::new(step.path, rank))
    }

    fn path_steps(&self, path: PathHandle) -> Vec<StepHandle> {
        let mut steps = Vec::with_capacity(self.get_step_count(path));
        let mut current = self.path_begin(path);
        while let Some(step) = current {
            steps.push(step);
            current = self.get_next_step(step);
        }
        steps
    }
}

/// A step together with where it sits on its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub step: StepHandle,
    /// Whether the path traverses the node opposite to the queried handle
    pub is_reverse: bool,
    /// Offset of the step's first base along the path
    pub position: usize,
}

/// Base-pair coordinates along embedded paths.
pub trait PathPositionHandleGraph: PathHandleGraph {
    /// Total sequence length of the path
    fn get_path_length(&self, path: PathHandle) -> usize;

    /// Offset of the step's first base along its path
    fn get_position_of_step(&self, step: StepHandle) -> usize;

    /// The step covering `position`, or `None` when the position is past the end of the path
    fn get_step_at_position(&self, path: PathHandle, position: usize) -> Option<StepHandle>;

    fn step_positions_on_handle(&self, handle: Handle) -> Vec<StepPosition> {
        self.steps_of_handle(handle)
            .into_iter()
            .map(|step| StepPosition {
                step,
                is_reverse: self.get_handle_of_step(step).is_reverse != handle.is_reverse,
                position: self.get_position_of_step(step),
            })
            .collect()
    }
}

/// A linear layout of the graph: every node gets a rank and an offset in a
/// single concatenated sequence coordinate space.
pub trait VectorizableHandleGraph: HandleGraph {
    /// 0-based offset of the node's first base in the layout
    fn node_vector_offset(&self, id: NodeId) -> Option<usize>;

    /// The node covering the 0-based layout offset
    fn node_at_vector_offset(&self, offset: usize) -> Option<NodeId>;

    /// Index of the edge in the layout's edge enumeration, in either spelling
    fn edge_index(&self, edge: &Edge) -> Option<usize>;

    /// 1-based rank of the node in the layout
    fn id_to_rank(&self, id: NodeId) -> Option<usize>;

    fn rank_to_id(&self, rank: usize) -> Option<NodeId>;
}
