//! Capability overlays and the helpers that decide when to build them
//!
//! The aliases at the bottom of this module are the common combinations:
//! each names the capability it produces, the overlay it falls back to, and
//! the graph type it accepts.

/// Implements `HandleGraph` for an overlay by forwarding to `self.graph`,
/// answering `Some(self)` for each listed probe.
macro_rules! forward_handle_graph {
    ($overlay:ident $(, $probe:ident => $capability:ident)* $(,)?) => {
        impl crate::graph::HandleGraph for $overlay<'_> {
            fn has_node(&self, id: crate::graph::NodeId) -> bool {
                self.graph.has_node(id)
            }

            fn get_length(&self, handle: crate::graph::Handle) -> usize {
                self.graph.get_length(handle)
            }

            fn get_sequence(&self, handle: crate::graph::Handle) -> String {
                self.graph.get_sequence(handle)
            }

            fn follow_edges(
                &self,
                handle: crate::graph::Handle,
                go_left: bool,
            ) -> Vec<crate::graph::Handle> {
                self.graph.follow_edges(handle, go_left)
            }

            fn handles(&self) -> Box<dyn Iterator<Item = crate::graph::Handle> + '_> {
                self.graph.handles()
            }

            fn node_count(&self) -> usize {
                self.graph.node_count()
            }

            fn min_node_id(&self) -> Option<crate::graph::NodeId> {
                self.graph.min_node_id()
            }

            fn max_node_id(&self) -> Option<crate::graph::NodeId> {
                self.graph.max_node_id()
            }

            $(
                fn $probe(&self) -> Option<&dyn crate::graph::$capability> {
                    Some(self)
                }
            )*
        }
    };
}

/// Implements `PathHandleGraph` for an overlay by forwarding to `self.graph`.
macro_rules! forward_path_graph {
    ($overlay:ident) => {
        impl crate::graph::PathHandleGraph for $overlay<'_> {
            fn path_count(&self) -> usize {
                self.graph.path_count()
            }

            fn get_path_handle(&self, name: &str) -> Option<crate::graph::PathHandle> {
                self.graph.get_path_handle(name)
            }

            fn get_path_name(&self, path: crate::graph::PathHandle) -> &str {
                self.graph.get_path_name(path)
            }

            fn get_step_count(&self, path: crate::graph::PathHandle) -> usize {
                self.graph.get_step_count(path)
            }

            fn path_handles(&self) -> Box<dyn Iterator<Item = crate::graph::PathHandle> + '_> {
                self.graph.path_handles()
            }

            fn get_handle_of_step(&self, step: crate::graph::StepHandle) -> crate::graph::Handle {
                self.graph.get_handle_of_step(step)
            }

            fn steps_of_handle(&self, handle: crate::graph::Handle) -> Vec<crate::graph::StepHandle> {
                self.graph.steps_of_handle(handle)
            }
        }
    };
}

mod helper;
mod position;
mod probe;
mod vectorize;


pub use helper::{Capability, Overlay, OverlayHelper, PairOverlayHelper, ResolutionState, Upcast};
pub use position::PackedPositionOverlay;
pub use vectorize::{PathPositionVectorizableOverlay, PathVectorizableOverlay, VectorizableOverlay};

use crate::graph::{HandleGraph, PathHandleGraph, PathPositionHandleGraph, VectorizableHandleGraph};

/// Path positions for a graph with paths
pub type PathPositionOverlayHelper<'g> = OverlayHelper<
    'g,
    dyn PathHandleGraph + 'g,
    dyn PathPositionHandleGraph + 'g,
    PackedPositionOverlay<'g>,
>;

/// An id-ordered layout for any graph
pub type VectorizableOverlayHelper<'g> = OverlayHelper<
    'g,
    dyn HandleGraph + 'g,
    dyn VectorizableHandleGraph + 'g,
    VectorizableOverlay<'g>,
>;

/// A path-ordered layout for a graph with paths
pub type PathVectorizableOverlayHelper<'g> = OverlayHelper<
    'g,
    dyn PathHandleGraph + 'g,
    dyn VectorizableHandleGraph + 'g,
    PathVectorizableOverlay<'g>,
>;

/// Path positions, then a path-ordered layout over the positioned graph
pub type PathPositionVectorizableOverlayHelper<'g> = PairOverlayHelper<
    'g,
    dyn PathHandleGraph + 'g,
    dyn PathPositionHandleGraph + 'g,
    PackedPositionOverlay<'g>,
    dyn PathPositionHandleGraph + 'g,
    dyn VectorizableHandleGraph + 'g,
    PathPositionVectorizableOverlay<'g>,
>;
