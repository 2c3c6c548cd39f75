//! Handles: oriented references to nodes, paths and path steps

use serde::Serialize;

/// Identifier of a node in a handle graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node traversed in one of its two orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Handle {
    pub id: NodeId,
    pub is_reverse: bool,
}

impl Handle {
    pub fn new(id: NodeId, is_reverse: bool) -> Self {
        Self { id, is_reverse }
    }

    /// The forward-orientation handle for a node
    pub fn forward(id: NodeId) -> Self {
        Self::new(id, false)
    }

    /// The same node in the opposite orientation
    pub fn flip(self) -> Self {
        Self::new(self.id, !self.is_reverse)
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.id, if self.is_reverse { '-' } else { '+' })
    }
}

/// A bidirected edge from the end of `0` to the start of `1`.
///
/// The same edge can be written two ways: `(a, b)` and `(b.flip(), a.flip())`.
/// [`Edge::canonical`] picks one representative so edges can be compared and
/// indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge(pub Handle, pub Handle);

impl Edge {
    pub fn new(left: Handle, right: Handle) -> Self {
        Self(left, right)
    }

    pub fn canonical(self) -> Self {
        let mirrored = Self(self.1.flip(), self.0.flip());
        if mirrored < self {
            mirrored
        } else {
            self
        }
    }
}

/// Opaque reference to an embedded path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PathHandle(usize);

impl PathHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A single visit of a path to a handle, addressed by its rank along the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StepHandle {
    pub path: PathHandle,
    pub rank: usize,
}

impl StepHandle {
    pub fn new(path: PathHandle, rank: usize) -> Self {
        Self { path, rank }
    }
}
