//! Vectorizable overlays
//!
//! A layout places every node of the graph in one linear coordinate space:
//! nodes get consecutive 1-based ranks, and each node's sequence occupies
//! the offsets right after the previous node's. Edges are numbered in the
//! order they are first met walking the layout.

use super::helper::Overlay;
use crate::graph::{
    Edge, Handle, HandleGraph, NodeId, PathHandle, PathHandleGraph, PathPositionHandleGraph,
    StepHandle, VectorizableHandleGraph,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct Layout {
    /// Node at each rank, 0-based
    order: Vec<NodeId>,
    ranks: HashMap<NodeId, usize>,
    /// Start offset of each node in rank order, followed by the total length
    offsets: Vec<usize>,
    edges: HashMap<Edge, usize>,
}

impl Layout {
    fn build(graph: &dyn HandleGraph, order: Vec<NodeId>) -> Self {
        let mut ranks = HashMap::with_capacity(order.len());
        let mut offsets = Vec::with_capacity(order.len() + 1);
        let mut edges = HashMap::new();
        let mut position = 0;

        for (index, &id) in order.iter().enumerate() {
            ranks.insert(id, index + 1);
            offsets.push(position);
            let handle = Handle::forward(id);
            position += graph.get_length(handle);

            let right = graph
                .follow_edges(handle, false)
                .into_iter()
                .map(|next| Edge::new(handle, next));
            let left = graph
                .follow_edges(handle, true)
                .into_iter()
                .map(|prev| Edge::new(prev, handle));
            for edge in right.chain(left) {
                let next_index = edges.len();
                edges.entry(edge.canonical()).or_insert(next_index);
            }
        }
        offsets.push(position);

        debug!(nodes = order.len(), edges = edges.len(), length = position, "built layout");
        Self {
            order,
            ranks,
            offsets,
            edges,
        }
    }

    fn node_vector_offset(&self, id: NodeId) -> Option<usize> {
        self.ranks.get(&id).map(|&rank| self.offsets[rank - 1])
    }

    fn node_at_vector_offset(&self, offset: usize) -> Option<NodeId> {
        if offset >= self.offsets.last().copied().unwrap_or(0) {
            return None;
        }
        let index = self.offsets.partition_point(|&start| start <= offset) - 1;
        self.order.get(index).copied()
    }

    fn edge_index(&self, edge: &Edge) -> Option<usize> {
        self.edges.get(&edge.canonical()).copied()
    }

    fn id_to_rank(&self, id: NodeId) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    fn rank_to_id(&self, rank: usize) -> Option<NodeId> {
        rank.checked_sub(1).and_then(|index| self.order.get(index).copied())
    }
}

/// Nodes in ascending id order
fn id_order(graph: &dyn HandleGraph) -> Vec<NodeId> {
    let mut order: Vec<NodeId> = graph.handles().map(|handle| handle.id).collect();
    order.sort_unstable();
    order
}

/// Nodes in order of first visit along the paths, paths taken by name;
/// nodes no path visits follow in ascending id order.
fn path_order(graph: &dyn PathHandleGraph) -> Vec<NodeId> {
    let mut paths: Vec<PathHandle> = graph.path_handles().collect();
    paths.sort_by(|a, b| graph.get_path_name(*a).cmp(graph.get_path_name(*b)));

    let mut seen = HashSet::with_capacity(graph.node_count());
    let mut order = Vec::with_capacity(graph.node_count());
    let visited = paths
        .into_iter()
        .flat_map(|path| graph.path_steps(path))
        .map(|step| graph.get_handle_of_step(step).id);
    for id in visited.chain(id_order(graph)) {
        if seen.insert(id) {
            order.push(id);
        }
    }
    order
}

macro_rules! forward_layout {
    ($overlay:ident) => {
        impl VectorizableHandleGraph for $overlay<'_> {
            fn node_vector_offset(&self, id: NodeId) -> Option<usize> {
                self.layout.node_vector_offset(id)
            }

            fn node_at_vector_offset(&self, offset: usize) -> Option<NodeId> {
                self.layout.node_at_vector_offset(offset)
            }

            fn edge_index(&self, edge: &Edge) -> Option<usize> {
                self.layout.edge_index(edge)
            }

            fn id_to_rank(&self, id: NodeId) -> Option<usize> {
                self.layout.id_to_rank(id)
            }

            fn rank_to_id(&self, rank: usize) -> Option<NodeId> {
                self.layout.rank_to_id(rank)
            }
        }
    };
}

/// `VectorizableHandleGraph` over any `HandleGraph`, laid out by node id
pub struct VectorizableOverlay<'g> {
    graph: &'g (dyn HandleGraph + 'g),
    layout: Layout,
}

impl<'g> VectorizableOverlay<'g> {
    pub fn new(graph: &'g (dyn HandleGraph + 'g)) -> Self {
        Self {
            graph,
            layout: Layout::build(graph, id_order(graph)),
        }
    }
}

impl<'g> Overlay<'g, dyn HandleGraph + 'g, dyn VectorizableHandleGraph + 'g>
    for VectorizableOverlay<'g>
{
    fn overlay(base: &'g (dyn HandleGraph + 'g)) -> Self {
        Self::new(base)
    }

    fn capability(&self) -> &(dyn VectorizableHandleGraph + 'g) {
        self
    }
}

forward_handle_graph!(VectorizableOverlay, as_vectorizable_graph => VectorizableHandleGraph);
forward_layout!(VectorizableOverlay);

/// `VectorizableHandleGraph` over a `PathHandleGraph`, laid out along its paths
pub struct PathVectorizableOverlay<'g> {
    graph: &'g (dyn PathHandleGraph + 'g),
    layout: Layout,
}

impl<'g> PathVectorizableOverlay<'g> {
    pub fn new(graph: &'g (dyn PathHandleGraph + 'g)) -> Self {
        Self {
            graph,
            layout: Layout::build(graph, path_order(graph)),
        }
    }
}

impl<'g> Overlay<'g, dyn PathHandleGraph + 'g, dyn VectorizableHandleGraph + 'g>
    for PathVectorizableOverlay<'g>
{
    fn overlay(base: &'g (dyn PathHandleGraph + 'g)) -> Self {
        Self::new(base)
    }

    fn capability(&self) -> &(dyn VectorizableHandleGraph + 'g) {
        self
    }
}

forward_handle_graph!(
    PathVectorizableOverlay,
    as_path_graph => PathHandleGraph,
    as_vectorizable_graph => VectorizableHandleGraph,
);
forward_path_graph!(PathVectorizableOverlay);
forward_layout!(PathVectorizableOverlay);

/// `VectorizableHandleGraph` over a `PathPositionHandleGraph`, laid out along
/// its paths and keeping the path positions visible
pub struct PathPositionVectorizableOverlay<'g> {
    graph: &'g (dyn PathPositionHandleGraph + 'g),
    layout: Layout,
}

impl<'g> PathPositionVectorizableOverlay<'g> {
    pub fn new(graph: &'g (dyn PathPositionHandleGraph + 'g)) -> Self {
        Self {
            graph,
            layout: Layout::build(graph, path_order(graph)),
        }
    }
}

impl<'g> Overlay<'g, dyn PathPositionHandleGraph + 'g, dyn VectorizableHandleGraph + 'g>
    for PathPositionVectorizableOverlay<'g>
{
    fn overlay(base: &'g (dyn PathPositionHandleGraph + 'g)) -> Self {
        Self::new(base)
    }

    fn capability(&self) -> &(dyn VectorizableHandleGraph + 'g) {
        self
    }
}

forward_handle_graph!(
    PathPositionVectorizableOverlay,
    as_path_graph => PathHandleGraph,
    as_path_position_graph => PathPositionHandleGraph,
    as_vectorizable_graph => VectorizableHandleGraph,
);
forward_path_graph!(PathPositionVectorizableOverlay);
forward_layout!(PathPositionVectorizableOverlay);

impl PathPositionHandleGraph for PathPositionVectorizableOverlay<'_> {
    fn get_path_length(&self, path: PathHandle) -> usize {
        self.graph.get_path_length(path)
    }

    fn get_position_of_step(&self, step: StepHandle) -> usize {
        self.graph.get_position_of_step(step)
    }

    fn get_step_at_position(&self, path: PathHandle, position: usize) -> Option<StepHandle> {
        self.graph.get_step_at_position(path, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::HashGraph;
    use crate::overlay::PackedPositionOverlay;

    /// Nodes 1(AA) 2(C) 3(GGG) 4(T); path "b" walks 3 then 1, path "a" walks 2 then 3
    fn layout_graph() -> HashGraph {
        let mut graph = HashGraph::new();
        let n1 = graph.create_handle(1, "AA").unwrap();
        let n2 = graph.create_handle(2, "C").unwrap();
        let n3 = graph.create_handle(3, "GGG").unwrap();
        graph.create_handle(4, "T").unwrap();
        graph.create_edge(n1, n2).unwrap();
        graph.create_edge(n2, n3).unwrap();
        graph.create_edge(n3, n1).unwrap();

        let b = graph.create_path("b").unwrap();
        graph.append_step(b, n3).unwrap();
        graph.append_step(b, n1).unwrap();
        let a = graph.create_path("a").unwrap();
        graph.append_step(a, n2).unwrap();
        graph.append_step(a, n3).unwrap();
        graph
    }

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_id_layout_offsets_and_ranks() {
        let graph = layout_graph();
        let overlay = VectorizableOverlay::new(&graph);

        let offsets: Vec<Option<usize>> = ids(&[1, 2, 3, 4])
            .into_iter()
            .map(|id| overlay.node_vector_offset(id))
            .collect();
        assert_eq!(offsets, vec![Some(0), Some(2), Some(3), Some(6)]);
        assert_eq!(overlay.id_to_rank(NodeId::new(3)), Some(3));
        assert_eq!(overlay.rank_to_id(1), Some(NodeId::new(1)));
        assert_eq!(overlay.rank_to_id(0), None);
        assert_eq!(overlay.node_vector_offset(NodeId::new(9)), None);
    }

    /// Lists its nodes highest id first
    struct Descending<'a>(&'a HashGraph);

    impl HandleGraph for Descending<'_> {
        fn has_node(&self, id: NodeId) -> bool {
            self.0.has_node(id)
        }

        fn get_length(&self, handle: Handle) -> usize {
            self.0.get_length(handle)
        }

        fn get_sequence(&self, handle: Handle) -> String {
            self.0.get_sequence(handle)
        }

        fn follow_edges(&self, handle: Handle, go_left: bool) -> Vec<Handle> {
            self.0.follow_edges(handle, go_left)
        }

        fn handles(&self) -> Box<dyn Iterator<Item = Handle> + '_> {
            let mut handles: Vec<Handle> = self.0.handles().collect();
            handles.reverse();
            Box::new(handles.into_iter())
        }

        fn node_count(&self) -> usize {
            self.0.node_count()
        }

        fn min_node_id(&self) -> Option<NodeId> {
            self.0.min_node_id()
        }

        fn max_node_id(&self) -> Option<NodeId> {
            self.0.max_node_id()
        }
    }

    #[test]
    fn test_id_layout_sorts_unordered_handles() {
        let graph = layout_graph();
        let descending = Descending(&graph);
        let overlay = VectorizableOverlay::new(&descending);

        let order: Vec<NodeId> = (1..=4).filter_map(|rank| overlay.rank_to_id(rank)).collect();
        assert_eq!(order, ids(&[1, 2, 3, 4]));
        assert_eq!(overlay.node_vector_offset(NodeId::new(4)), Some(6));
    }

    #[test]
    fn test_node_at_vector_offset() {
        let graph = layout_graph();
        let overlay = VectorizableOverlay::new(&graph);

        assert_eq!(overlay.node_at_vector_offset(0), Some(NodeId::new(1)));
        assert_eq!(overlay.node_at_vector_offset(1), Some(NodeId::new(1)));
        assert_eq!(overlay.node_at_vector_offset(5), Some(NodeId::new(3)));
        assert_eq!(overlay.node_at_vector_offset(6), Some(NodeId::new(4)));
        assert_eq!(overlay.node_at_vector_offset(7), None);
    }

    #[test]
    fn test_edge_indexes_cover_every_edge_once() {
        let graph = layout_graph();
        let overlay = VectorizableOverlay::new(&graph);

        let mut indexes: Vec<usize> = graph
            .edges()
            .iter()
            .map(|edge| overlay.edge_index(edge).unwrap())
            .collect();
        indexes.sort_unstable();
        assert_eq!(indexes, vec![0, 1, 2]);

        let n1 = Handle::forward(NodeId::new(1));
        let n2 = Handle::forward(NodeId::new(2));
        assert_eq!(overlay.edge_index(&Edge::new(n1, n2)), Some(0));
        assert_eq!(overlay.edge_index(&Edge::new(n2.flip(), n1.flip())), Some(0));
        assert_eq!(overlay.edge_index(&Edge::new(n2, n1)), None);
    }

    #[test]
    fn test_path_layout_follows_paths_by_name() {
        let graph = layout_graph();
        let overlay = PathVectorizableOverlay::new(&graph);

        let order: Vec<NodeId> = (1..=4).filter_map(|rank| overlay.rank_to_id(rank)).collect();
        assert_eq!(order, ids(&[2, 3, 1, 4]));
        assert_eq!(overlay.node_vector_offset(NodeId::new(1)), Some(4));
        assert!(overlay.as_path_graph().is_some());
        assert!(overlay.as_path_position_graph().is_none());
    }

    #[test]
    fn test_path_position_layout_keeps_positions() {
        let graph = layout_graph();
        let positioned = PackedPositionOverlay::new(&graph);
        let overlay = PathPositionVectorizableOverlay::new(&positioned);
        let b = overlay.get_path_handle("b").unwrap();

        assert_eq!(overlay.get_path_length(b), 5);
        assert_eq!(overlay.get_step_at_position(b, 3), Some(StepHandle::new(b, 1)));
        assert_eq!(overlay.id_to_rank(NodeId::new(2)), Some(1));
        assert!(overlay.as_path_position_graph().is_some());
        assert!(overlay.as_vectorizable_graph().is_some());
    }
}
