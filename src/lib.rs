//! handle-overlays: capability overlays for handle graphs
//!
//! Graph implementations differ in what they can answer. Some know where
//! every path step sits in base-pair coordinates, some can lay the whole
//! graph out in one linear coordinate space, most can do neither. Code that
//! needs one of those capabilities should not care which kind of graph it
//! was handed.
//!
//! # Core Concepts
//!
//! - **Capabilities**: the traits in [`graph`], from [`HandleGraph`] up to
//!   [`PathPositionHandleGraph`] and [`VectorizableHandleGraph`]
//! - **Probes**: the `as_*` methods a graph overrides to say it supports a
//!   richer capability natively
//! - **Overlays**: types that synthesize a capability on top of a borrowed
//!   graph that lacks it
//! - **Helpers**: [`OverlayHelper`] uses the graph directly when the probe
//!   succeeds and builds and owns an overlay when it fails;
//!   [`PairOverlayHelper`] chains two helpers
//!
//! # Example
//!
//! ```
//! use handle_overlays::{
//!     HashGraph, NodeId, PathPositionVectorizableOverlayHelper, VectorizableHandleGraph,
//! };
//!
//! let mut graph = HashGraph::new();
//! let a = graph.create_handle(1, "ACGT").unwrap();
//! let b = graph.create_handle(2, "GG").unwrap();
//! graph.create_edge(a, b).unwrap();
//!
//! let helper = PathPositionVectorizableOverlayHelper::new();
//! let layout = helper.apply(&graph);
//! assert_eq!(layout.node_vector_offset(NodeId::new(2)), Some(4));
//! ```

pub mod gfa;
pub mod graph;
pub mod overlay;
pub mod report;

pub use gfa::{read_gfa, read_gfa_file, GfaError, GfaResult};
pub use graph::{
    Edge, GraphError, GraphResult, Handle, HandleGraph, HashGraph, NodeId, PathHandle,
    PathHandleGraph, PathPositionHandleGraph, StepHandle, StepPosition, VectorizableHandleGraph,
};
pub use overlay::{
    Capability, Overlay, OverlayHelper, PackedPositionOverlay, PairOverlayHelper,
    PathPositionOverlayHelper, PathPositionVectorizableOverlay,
    PathPositionVectorizableOverlayHelper, PathVectorizableOverlay, PathVectorizableOverlayHelper,
    ResolutionState, Upcast, VectorizableOverlay, VectorizableOverlayHelper,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
