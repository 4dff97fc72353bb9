use crate::graph::GraphBase;
use crate::spatial::{BoundingBox, Position};

/// Node data which has a location on the map.
pub trait HasPosition {
  fn position(&self) -> Position;
}

impl HasPosition for Position {
  fn position(&self) -> Position {
    *self
  }
}

/// Defines a spatial index for graph nodes
pub trait Spatial: GraphBase {
  type Nodes: IntoIterator<Item = Self::NodeId>;
  fn find_nodes(&self, bbox: &BoundingBox) -> Self::Nodes;
}

impl<'a, G: Spatial> Spatial for &'a G {
  type Nodes = G::Nodes;

  fn find_nodes(&self, bbox: &BoundingBox) -> Self::Nodes {
    (*self).find_nodes(bbox)
  }
}
