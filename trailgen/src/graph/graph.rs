use std::fmt::Debug;
use std::hash::Hash;
use std::iter::Iterator;

// ====== Basic traits =====

/// Requirements for a node identifier
pub trait Identifier: Eq + Hash + Copy + Debug {}
impl<T> Identifier for T where T: Eq + Hash + Copy + Debug {}

/// Defines type of the identifier for the graph
pub trait GraphBase {
  type NodeId: Identifier;
}

/// Defines data associated with each node, e.g. its position.
pub trait GraphData: GraphBase {
  type Data;
  fn data(&self, node: Self::NodeId) -> &Self::Data;
}

/// Size and membership queries.
///
/// `contains_node` must be cheap: every entry point of the route generator checks the
/// requested nodes with it before touching the graph.
pub trait NodeCollection: GraphBase {
  fn contains_node(&self, node: Self::NodeId) -> bool;
  fn number_of_nodes(&self) -> usize;
  /// Number of undirected edges, parallel edges counted separately.
  fn number_of_edges(&self) -> usize;
}

/// Iteration over all node identifiers of the graph.
///
/// Implementations must yield the nodes in a fixed order, so that algorithms which scan
/// the graph produce the same result for the same graph.
pub trait IntoNodes: GraphBase {
  type Nodes: Iterator<Item = Self::NodeId>;
  fn nodes(self) -> Self::Nodes;
}

// ====== Blanket implementations =====

impl<'a, G: GraphBase> GraphBase for &'a G {
  type NodeId = G::NodeId;
}

impl<'a, G: GraphData> GraphData for &'a G {
  type Data = G::Data;

  fn data(&self, node: Self::NodeId) -> &Self::Data {
    (*self).data(node)
  }
}

impl<'a, G: NodeCollection> NodeCollection for &'a G {
  fn contains_node(&self, node: Self::NodeId) -> bool {
    (*self).contains_node(node)
  }

  fn number_of_nodes(&self) -> usize {
    (*self).number_of_nodes()
  }

  fn number_of_edges(&self) -> usize {
    (*self).number_of_edges()
  }
}
