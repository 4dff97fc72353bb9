//! Waypoint matching.

use crate::graph::*;
use crate::spatial::*;
use std::fmt;

/// Graph node closest to a waypoint and its great-circle distance to the waypoint in meters.
#[derive(Copy, Clone, PartialEq)]
pub struct SnappedNode<N: Identifier> {
  pub id: N,
  pub distance: f64,
}

/// Finds the node closest to `waypoint` by scanning all nodes of the graph.
///
/// Returns `None` only for a graph without nodes.
pub fn nearest_node<G>(graph: G, waypoint: &Position) -> Option<SnappedNode<G::NodeId>>
where
  G: Copy + IntoNodes + GraphData,
  G::Data: HasPosition,
{
  closest(graph, graph.nodes(), waypoint)
}

/// Finds the node closest to `waypoint` using the spatial index of the graph.
///
/// Only nodes inside the envelope of `radius_m` meters are considered first. When none of
/// them is within `radius_m`, the closest node is searched among all nodes.
pub fn match_waypoint<G>(graph: G, waypoint: &Position, radius_m: f64) -> Option<SnappedNode<G::NodeId>>
where
  G: Copy + IntoNodes + GraphData + Spatial,
  G::Data: HasPosition,
{
  let elements_nearby = graph.find_nodes(&envelope(waypoint, radius_m));

  match closest(graph, elements_nearby.into_iter(), waypoint) {
    Some(snapped) if snapped.distance <= radius_m => Some(snapped),
    _ => nearest_node(graph, waypoint),
  }
}

fn closest<G, I>(graph: G, candidates: I, waypoint: &Position) -> Option<SnappedNode<G::NodeId>>
where
  G: Copy + GraphData,
  G::Data: HasPosition,
  I: Iterator<Item = G::NodeId>,
{
  let mut best: Option<SnappedNode<G::NodeId>> = None;
  for id in candidates {
    let distance = haversine_distance(waypoint, &graph.data(id).position());
    if best.map_or(true, |b| distance < b.distance) {
      best = Some(SnappedNode { id, distance });
    }
  }
  best
}

impl<N: Identifier> fmt::Debug for SnappedNode<N> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{id = {:?}, d = {:.1}}}", self.id, self.distance)
  }
}
