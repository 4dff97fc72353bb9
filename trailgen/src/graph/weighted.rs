use crate::graph::GraphBase;
use std::fmt::Debug;
use std::ops::Add;

/// Trait representing an edge weight(length) in weighted graph
///
/// Weights are compared with `PartialOrd`, so floating point lengths can be used directly.
/// Implementations must never produce `NaN`: all lengths are finite and non-negative.
pub trait Weight<T = Self>: Default + Add<Output = T> + PartialOrd + Copy + Debug + Into<f64> {}
impl<T> Weight for T where T: Default + Add<Output = T> + PartialOrd + Copy + Debug + Into<f64> {}

/// Undirected weighted graph.
///
/// A pair of nodes can be connected by several parallel edges. `edge_weight` always
/// resolves them to the cheapest one and returns `None` for nodes which are not adjacent.
pub trait Weighted: GraphBase {
  type Weight: Weight;
  fn edge_weight(&self, from: Self::NodeId, to: Self::NodeId) -> Option<Self::Weight>;
}

/// Defines graph connectivity together with the edge lengths.
///
/// `edges(u)` returns one item `(v, length)` for every edge incident to `u`, so parallel
/// edges show up as several items with the same `v`.
pub trait IntoEdges: Weighted {
  type Edges: Iterator<Item = (Self::NodeId, Self::Weight)>;
  fn edges(self, node: Self::NodeId) -> Self::Edges;
}

/// Returns an iterator over all neighbors of the node. A neighbor is repeated once for
/// each parallel edge.
pub fn neighbors<G: IntoEdges>(graph: G, node: G::NodeId) -> impl Iterator<Item = G::NodeId> {
  graph.edges(node).map(|(target, _)| target)
}

impl<'a, G: Weighted> Weighted for &'a G {
  type Weight = G::Weight;

  fn edge_weight(&self, from: Self::NodeId, to: Self::NodeId) -> Option<Self::Weight> {
    (*self).edge_weight(from, to)
  }
}
