//! Path position overlay
//!
//! Adds base-pair coordinates to any graph with embedded paths by indexing
//! the cumulative step lengths of every path once, up front.

use super::helper::Overlay;
use crate::graph::{PathHandle, PathHandleGraph, PathPositionHandleGraph, StepHandle};
use std::collections::HashMap;
use tracing::debug;

/// `PathPositionHandleGraph` over a borrowed `PathHandleGraph`
pub struct PackedPositionOverlay<'g> {
    graph: &'g (dyn PathHandleGraph + 'g),
    /// For each path, the offset of every step followed by the path length
    offsets: HashMap<PathHandle, Vec<usize>>,
}

impl<'g> PackedPositionOverlay<'g> {
    pub fn new(graph: &'g (dyn PathHandleGraph + 'g)) -> Self {
        let mut offsets = HashMap::with_capacity(graph.path_count());
        for path in graph.path_handles() {
            let mut path_offsets = Vec::with_capacity(graph.get_step_count(path) + 1);
            let mut position = 0;
            for step in graph.path_steps(path) {
                path_offsets.push(position);
                position += graph.get_length(graph.get_handle_of_step(step));
            }
            path_offsets.push(position);
            offsets.insert(path, path_offsets);
        }
        debug!(paths = offsets.len(), "indexed path positions");
        Self { graph, offsets }
    }

    fn path_offsets(&self, path: PathHandle) -> &[usize] {
        self.offsets.get(&path).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<'g> Overlay<'g, dyn PathHandleGraph + 'g, dyn PathPositionHandleGraph + 'g>
    for PackedPositionOverlay<'g>
{
    fn overlay(base: &'g (dyn PathHandleGraph + 'g)) -> Self {
        Self::new(base)
    }

    fn capability(&self) -> &(dyn PathPositionHandleGraph + 'g) {
        self
    }
}

forward_handle_graph!(
    PackedPositionOverlay,
    as_path_graph => PathHandleGraph,
    as_path_position_graph => PathPositionHandleGraph,
);
forward_path_graph!(PackedPositionOverlay);

impl PathPositionHandleGraph for PackedPositionOverlay<'_> {
    fn get_path_length(&self, path: PathHandle) -> usize {
        self.path_offsets(path).last().copied().unwrap_or(0)
    }

    fn get_position_of_step(&self, step: StepHandle) -> usize {
        self.path_offsets(step.path)
            .get(step.rank)
            .copied()
            .unwrap_or(0)
    }

    fn get_step_at_position(&self, path: PathHandle, position: usize) -> Option<StepHandle> {
        if position >= self.get_path_length(path) {
            return None;
        }
        let offsets = self.path_offsets(path);
        // Last step starting at or before `position`; the trailing length never qualifies.
        let rank = offsets.partition_point(|&offset| offset <= position) - 1;
        Some(StepHandle::new(path, rank))
    }
}
