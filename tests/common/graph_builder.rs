//! Random graph construction

use handle_overlays::{Handle, HashGraph, NodeId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Configuration for a random test graph
#[derive(Debug, Clone)]
pub struct RandomGraphConfig {
    pub nodes: usize,
    /// Extra random edges on top of the backbone chain
    pub extra_edges: usize,
    pub paths: usize,
    pub max_path_steps: usize,
    pub max_sequence_length: usize,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            nodes: 20,
            extra_edges: 10,
            paths: 3,
            max_path_steps: 15,
            max_sequence_length: 8,
        }
    }
}

/// Build a graph from `seed`: a chain of nodes with sparse ids, extra random
/// edges, and random walks as paths.
pub fn random_graph(seed: u64, config: &RandomGraphConfig) -> HashGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = HashGraph::new();

    let mut handles = Vec::with_capacity(config.nodes);
    let mut next_id = 1u64;
    for _ in 0..config.nodes {
        let length = rng.gen_range(1..=config.max_sequence_length);
        let sequence: String = (0..length)
            .map(|_| *BASES.choose(&mut rng).unwrap())
            .collect();
        handles.push(graph.create_handle(NodeId::new(next_id), sequence).unwrap());
        next_id += rng.gen_range(1..=3);
    }

    for pair in handles.windows(2) {
        graph.create_edge(pair[0], pair[1]).unwrap();
    }
    for _ in 0..config.extra_edges {
        let left = *handles.choose(&mut rng).unwrap();
        let left = random_orientation(&mut rng, left);
        let right = *handles.choose(&mut rng).unwrap();
        let right = random_orientation(&mut rng, right);
        graph.create_edge(left, right).unwrap();
    }

    // Shuffled names so creation order and name order differ.
    let mut names: Vec<String> = (0..config.paths).map(|i| format!("path{}", i)).collect();
    names.shuffle(&mut rng);
    for name in names {
        let path = graph.create_path(name).unwrap();
        let steps = rng.gen_range(0..=config.max_path_steps);
        for _ in 0..steps {
            let handle = *handles.choose(&mut rng).unwrap();
            graph.append_step(path, random_orientation(&mut rng, handle)).unwrap();
        }
    }

    graph
}

fn random_orientation(rng: &mut StdRng, handle: Handle) -> Handle {
    if rng.gen_bool(0.5) {
        handle.flip()
    } else {
        handle
    }
}
