//! Serializable summaries of a graph, computed through the overlay helpers

use crate::graph::{
    GraphError, GraphResult, Handle, HandleGraph, NodeId, PathHandle, PathHandleGraph,
    PathPositionHandleGraph, VectorizableHandleGraph,
};
use crate::overlay::{
    PathPositionOverlayHelper, PathPositionVectorizableOverlayHelper, Upcast,
    VectorizableOverlayHelper,
};
use serde::Serialize;

/// Size of a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub paths: usize,
    /// Total sequence length over all nodes
    pub length: usize,
    pub min_node_id: Option<NodeId>,
    pub max_node_id: Option<NodeId>,
}

/// Where one path step lands in path coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub rank: usize,
    pub handle: Handle,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPositions {
    pub path: String,
    pub length: usize,
    pub steps: Vec<StepRecord>,
}

/// One node's slot in a linear layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEntry {
    pub rank: usize,
    pub node: NodeId,
    pub offset: usize,
    pub length: usize,
}

pub fn graph_stats(graph: &dyn HandleGraph) -> GraphStats {
    GraphStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        paths: graph.as_path_graph().map_or(0, |paths| paths.path_count()),
        length: graph.handles().map(|handle| graph.get_length(handle)).sum(),
        min_node_id: graph.min_node_id(),
        max_node_id: graph.max_node_id(),
    }
}

/// Step positions for one named path, or for every path when `name` is `None`
pub fn path_positions(graph: &dyn PathHandleGraph, name: Option<&str>) -> GraphResult<Vec<PathPositions>> {
    let helper = PathPositionOverlayHelper::new();
    let positioned = helper.apply(graph);

    let paths: Vec<PathHandle> = match name {
        Some(name) => vec![positioned
            .get_path_handle(name)
            .ok_or_else(|| GraphError::PathNotFound(name.to_string()))?],
        None => positioned.path_handles().collect(),
    };

    Ok(paths
        .into_iter()
        .map(|path| describe_path(positioned, path))
        .collect())
}

fn describe_path(graph: &dyn PathPositionHandleGraph, path: PathHandle) -> PathPositions {
    PathPositions {
        path: graph.get_path_name(path).to_string(),
        length: graph.get_path_length(path),
        steps: graph
            .path_steps(path)
            .into_iter()
            .map(|step| StepRecord {
                rank: step.rank,
                handle: graph.get_handle_of_step(step),
                position: graph.get_position_of_step(step),
            })
            .collect(),
    }
}

/// Node layout, ordered along the paths when `by_path` is set and by id otherwise
pub fn layout(graph: &dyn PathHandleGraph, by_path: bool) -> Vec<LayoutEntry> {
    if by_path {
        let helper = PathPositionVectorizableOverlayHelper::new();
        describe_layout(helper.apply(graph))
    } else {
        let helper = VectorizableOverlayHelper::new();
        describe_layout(helper.apply(Upcast::<dyn HandleGraph + '_>::upcast(graph)))
    }
}

fn describe_layout(layout: &dyn VectorizableHandleGraph) -> Vec<LayoutEntry> {
    (1..=layout.node_count())
        .filter_map(|rank| {
            let node = layout.rank_to_id(rank)?;
            Some(LayoutEntry {
                rank,
                node,
                offset: layout.node_vector_offset(node)?,
                length: layout.get_length(Handle::forward(node)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfa::read_gfa;

    const GFA: &str = "S\t1\tACGT\nS\t2\tGG\nS\t3\tT\n\
        L\t1\t+\t2\t+\t0M\nL\t2\t+\t3\t+\t0M\nL\t1\t+\t3\t+\t0M\n\
        P\talt\t3+,1-\t*\nP\tref\t1+,2+,3+\t*\n";

    #[test]
    fn test_stats() {
        let graph = read_gfa(GFA.as_bytes()).unwrap();
        let stats = graph_stats(&graph);

        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 3);
        assert_eq!(stats.paths, 2);
        assert_eq!(stats.length, 7);
        assert_eq!(stats.min_node_id, Some(NodeId::new(1)));
    }

    #[test]
    fn test_positions_for_one_path() {
        let graph = read_gfa(GFA.as_bytes()).unwrap();
        let positions = path_positions(&graph, Some("alt")).unwrap();

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].length, 5);
        let offsets: Vec<usize> = positions[0].steps.iter().map(|s| s.position).collect();
        assert_eq!(offsets, vec![0, 1]);
        assert!(positions[0].steps[1].handle.is_reverse);
    }

    #[test]
    fn test_positions_for_missing_path() {
        let graph = read_gfa(GFA.as_bytes()).unwrap();
        assert_eq!(
            path_positions(&graph, Some("nope")),
            Err(GraphError::PathNotFound("nope".into()))
        );
    }

    #[test]
    fn test_layout_orders() {
        let graph = read_gfa(GFA.as_bytes()).unwrap();

        let by_id: Vec<u64> = layout(&graph, false).iter().map(|e| e.node.get()).collect();
        assert_eq!(by_id, vec![1, 2, 3]);

        let by_path = layout(&graph, true);
        let order: Vec<u64> = by_path.iter().map(|e| e.node.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(by_path[2].offset, 5);
    }

    #[test]
    fn test_reports_serialize() {
        let graph = read_gfa(GFA.as_bytes()).unwrap();
        let json = serde_json::to_value(graph_stats(&graph)).unwrap();
        assert_eq!(json["nodes"], 3);
        assert_eq!(json["min_node_id"], 1);
    }
}
