//! HashGraph: a plain mutable in-memory graph with embedded paths
//!
//! Supports `HandleGraph` and `PathHandleGraph` only. Path positions and
//! vector layouts have to be supplied by an overlay.

use super::handle::{Handle, NodeId, PathHandle, StepHandle};
use super::traits::{HandleGraph, PathHandleGraph};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors raised while building or querying a graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node already exists: {0}")]
    DuplicateNode(NodeId),

    #[error("Node {0} has an empty sequence")]
    EmptySequence(NodeId),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Path already exists: {0}")]
    DuplicatePath(String),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Clone, Default)]
struct NodeRecord {
    sequence: String,
    /// Handles reached going right from the forward handle
    right: Vec<Handle>,
    /// Handles reached going left from the forward handle
    left: Vec<Handle>,
    occurrences: Vec<StepHandle>,
}

#[derive(Debug, Clone)]
struct PathRecord {
    name: String,
    steps: Vec<Handle>,
}

/// In-memory graph keyed by node id
#[derive(Debug, Clone, Default)]
pub struct HashGraph {
    nodes: BTreeMap<NodeId, NodeRecord>,
    paths: Vec<PathRecord>,
    path_names: HashMap<String, PathHandle>,
}

impl HashGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given sequence, returning its forward handle
    pub fn create_handle(&mut self, id: impl Into<NodeId>, sequence: impl Into<String>) -> GraphResult<Handle> {
        let id = id.into();
        let sequence = sequence.into();
        if sequence.is_empty() {
            return Err(GraphError::EmptySequence(id));
        }
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.insert(
            id,
            NodeRecord {
                sequence,
                ..Default::default()
            },
        );
        Ok(Handle::forward(id))
    }

    /// Connect the end of `left` to the start of `right`.
    ///
    /// Creating an edge that already exists (in either spelling) is a no-op.
    pub fn create_edge(&mut self, left: Handle, right: Handle) -> GraphResult<()> {
        for id in [left.id, right.id] {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::NodeNotFound(id));
            }
        }

        if let Some(record) = self.nodes.get_mut(&left.id) {
            if left.is_reverse {
                push_unique(&mut record.left, right.flip());
            } else {
                push_unique(&mut record.right, right);
            }
        }
        if let Some(record) = self.nodes.get_mut(&right.id) {
            if right.is_reverse {
                push_unique(&mut record.right, left.flip());
            } else {
                push_unique(&mut record.left, left);
            }
        }
        Ok(())
    }

    pub fn has_edge(&self, left: Handle, right: Handle) -> bool {
        self.has_node(left.id) && self.follow_edges(left, false).contains(&right)
    }

    pub fn create_path(&mut self, name: impl Into<String>) -> GraphResult<PathHandle> {
        let name = name.into();
        if self.path_names.contains_key(&name) {
            return Err(GraphError::DuplicatePath(name));
        }
        let path = PathHandle::new(self.paths.len());
        self.path_names.insert(name.clone(), path);
        self.paths.push(PathRecord {
            name,
            steps: Vec::new(),
        });
        Ok(path)
    }

    /// Extend a path by one step through `handle`
    pub fn append_step(&mut self, path: PathHandle, handle: Handle) -> GraphResult<StepHandle> {
        let record = self
            .paths
            .get_mut(path.index())
            .ok_or_else(|| GraphError::PathNotFound(format!("#{}", path.index())))?;
        let node = self
            .nodes
            .get_mut(&handle.id)
            .ok_or(GraphError::NodeNotFound(handle.id))?;

        let step = StepHandle::new(path, record.steps.len());
        record.steps.push(handle);
        node.occurrences.push(step);
        Ok(step)
    }
}

fn push_unique(handles: &mut Vec<Handle>, handle: Handle) {
    if !handles.contains(&handle) {
        handles.push(handle);
    }
}

/// Reverse complement of a nucleotide sequence; unknown characters are kept as-is
fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            'a' => 't',
            't' => 'a',
            'c' => 'g',
            'g' => 'c',
            other => other,
        })
        .collect()
}

impl HandleGraph for HashGraph {
    fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn get_length(&self, handle: Handle) -> usize {
        self.nodes.get(&handle.id).map_or(0, |n| n.sequence.len())
    }

    fn get_sequence(&self, handle: Handle) -> String {
        match self.nodes.get(&handle.id) {
            Some(node) if handle.is_reverse => reverse_complement(&node.sequence),
            Some(node) => node.sequence.clone(),
            None => String::new(),
        }
    }

    fn follow_edges(&self, handle: Handle, go_left: bool) -> Vec<Handle> {
        let Some(node) = self.nodes.get(&handle.id) else {
            return Vec::new();
        };
        // A reverse handle's right side is the forward handle's left side.
        let side = if go_left != handle.is_reverse {
            &node.left
        } else {
            &node.right
        };
        if handle.is_reverse {
            side.iter().map(|h| h.flip()).collect()
        } else {
            side.clone()
        }
    }

    fn handles(&self) -> Box<dyn Iterator<Item = Handle> + '_> {
        Box::new(self.nodes.keys().map(|&id| Handle::forward(id)))
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn min_node_id(&self) -> Option<NodeId> {
        self.nodes.keys().next().copied()
    }

    fn max_node_id(&self) -> Option<NodeId> {
        self.nodes.keys().next_back().copied()
    }

    fn as_path_graph(&self) -> Option<&dyn PathHandleGraph> {
        Some(self)
    }
}

impl PathHandleGraph for HashGraph {
    fn path_count(&self) -> usize {
        self.paths.len()
    }

    fn get_path_handle(&self, name: &str) -> Option<PathHandle> {
        self.path_names.get(name).copied()
    }

    fn get_path_name(&self, path: PathHandle) -> &str {
        self.paths.get(path.index()).map_or("", |p| p.name.as_str())
    }

    fn get_step_count(&self, path: PathHandle) -> usize {
        self.paths.get(path.index()).map_or(0, |p| p.steps.len())
    }

    fn path_handles(&self) -> Box<dyn Iterator<Item = PathHandle> + '_> {
        Box::new((0..self.paths.len()).map(PathHandle::new))
    }

    fn get_handle_of_step(&self, step: StepHandle) -> Handle {
        self.paths[step.path.index()].steps[step.rank]
    }

    fn steps_of_handle(&self, handle: Handle) -> Vec<StepHandle> {
        self.nodes
            .get(&handle.id)
            .map(|n| n.occurrences.clone())
            .unwrap_or_default()
    }
}
