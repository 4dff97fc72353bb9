use super::common::*;
use crate::graph::*;
use crate::spatial::BoundingBox;
use rstar::{RTree, RTreeObject, AABB};

#[derive(Debug)]
struct Entry {
  id: Idx,
  point: [f64; 2],
}

fn to_aabb(bbox: &BoundingBox) -> AABB<[f64; 2]> {
  let min = bbox.min().x_y();
  let max = bbox.max().x_y();
  AABB::from_corners([min.0, min.1], [max.0, max.1])
}

impl RTreeObject for Entry {
  type Envelope = AABB<[f64; 2]>;
  fn envelope(&self) -> Self::Envelope {
    AABB::from_point(self.point)
  }
}

/// Wraps a graph and indexes positions of its nodes in an R-tree.
///
/// All graph traits are forwarded to the wrapped graph, the wrapper adds [`Spatial`].
pub struct SpatialGraph<G> {
  graph: G,
  rtree: RTree<Entry>,
}

impl<G> SpatialGraph<G>
where
  G: GraphData<NodeId = Idx> + NodeCollection,
  G::Data: HasPosition,
{
  pub fn new(graph: G) -> Self {
    // Graphs with `Idx` identifiers number their nodes densely from zero
    let entries = (0..graph.number_of_nodes() as Idx)
      .map(|id| {
        let p = graph.data(id).position();
        Entry { id, point: [p.x, p.y] }
      })
      .collect();
    Self {
      rtree: RTree::bulk_load(entries),
      graph,
    }
  }
}

impl<G> SpatialGraph<G> {
  pub fn inner(&self) -> &G {
    &self.graph
  }
}

impl<G: GraphBase> GraphBase for SpatialGraph<G> {
  type NodeId = G::NodeId;
}

impl<G: GraphBase<NodeId = Idx>> Spatial for SpatialGraph<G> {
  type Nodes = Vec<Idx>;

  fn find_nodes(&self, bbox: &BoundingBox) -> Self::Nodes {
    let envelope = to_aabb(bbox);
    let results_iter = self.rtree.locate_in_envelope_intersecting(&envelope);
    results_iter.map(|entry| entry.id).collect()
  }
}

impl<G: GraphData> GraphData for SpatialGraph<G> {
  type Data = G::Data;

  fn data(&self, node_id: Self::NodeId) -> &Self::Data {
    self.graph.data(node_id)
  }
}

impl<G: NodeCollection> NodeCollection for SpatialGraph<G> {
  fn contains_node(&self, node_id: Self::NodeId) -> bool {
    self.graph.contains_node(node_id)
  }

  fn number_of_nodes(&self) -> usize {
    self.graph.number_of_nodes()
  }

  fn number_of_edges(&self) -> usize {
    self.graph.number_of_edges()
  }
}

impl<G: Weighted> Weighted for SpatialGraph<G> {
  type Weight = G::Weight;

  fn edge_weight(&self, from: Self::NodeId, to: Self::NodeId) -> Option<Self::Weight> {
    self.graph.edge_weight(from, to)
  }
}

impl<'a, G> IntoEdges for &'a SpatialGraph<G>
where
  G: Weighted,
  &'a G: IntoEdges<NodeId = G::NodeId, Weight = G::Weight>,
{
  type Edges = <&'a G as IntoEdges>::Edges;

  fn edges(self, node_id: Self::NodeId) -> Self::Edges {
    (&self.graph).edges(node_id)
  }
}

impl<'a, G> IntoNodes for &'a SpatialGraph<G>
where
  G: GraphBase,
  &'a G: IntoNodes<NodeId = G::NodeId>,
{
  type Nodes = <&'a G as IntoNodes>::Nodes;

  fn nodes(self) -> Self::Nodes {
    (&self.graph).nodes()
  }
}
