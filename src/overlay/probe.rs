//! Capability probes and upcasts between the handle graph traits

use super::helper::{Capability, Upcast};
use crate::graph::{HandleGraph, PathHandleGraph, PathPositionHandleGraph, VectorizableHandleGraph};

macro_rules! capability {
    ($target:ident via $probe:ident from $($base:ident),+) => {
        $(
            impl<'g> Capability<'g, dyn $base + 'g> for dyn $target + 'g {
                fn probe(base: &'g (dyn $base + 'g)) -> Option<&'g Self> {
                    base.$probe()
                }
            }
        )+
    };
}

capability!(PathHandleGraph via as_path_graph from HandleGraph);
capability!(PathPositionHandleGraph via as_path_position_graph from HandleGraph, PathHandleGraph);
capability!(
    VectorizableHandleGraph via as_vectorizable_graph
    from HandleGraph, PathHandleGraph, PathPositionHandleGraph
);

macro_rules! upcast {
    ($($from:ident => $to:ident),+ $(,)?) => {
        $(
            impl<'g> Upcast<dyn $to + 'g> for dyn $from + 'g {
                fn upcast(&self) -> &(dyn $to + 'g) {
                    self
                }
            }
        )+
    };
}

upcast!(
    PathHandleGraph => HandleGraph,
    PathPositionHandleGraph => PathHandleGraph,
    PathPositionHandleGraph => HandleGraph,
    VectorizableHandleGraph => HandleGraph,
);
