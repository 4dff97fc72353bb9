//! Graph data structures.
//!
//! The module defines in-memory undirected graphs with edge lengths:
//! - [`DynamicGraph`] allows growing a graph by adding nodes or edges. It's recommended for smaller graphs and testing, since memory layout is not optimal.
//! - [`CompactGraph`] is a static graph which cannot be modified after creation. But it can store big graphs in a memory efficient way and can be serialized.
//! - [`SpatialGraph`] wraps either of them and adds a spatial index over node positions.

mod common;
mod compact_graph;
mod dynamic_graph;
mod spatial_graph;

pub use common::*;
pub use compact_graph::*;
pub use dynamic_graph::*;
pub use spatial_graph::*;
