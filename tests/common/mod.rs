//! Common test utilities for overlay integration tests
//!
//! Builds random graphs with embedded paths so properties can be checked
//! against naive recomputation.

pub mod graph_builder;

pub use graph_builder::{random_graph, RandomGraphConfig};
