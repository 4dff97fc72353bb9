//! Shortest routes and route bookkeeping.

use crate::graph::*;
use crate::search_space::*;
use crate::spatial::*;

/// A walk through the graph: `ids` lists the visited nodes in traveling order and `cost`
/// is the total length of the walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Route<W: Weight, N: Identifier> {
  pub cost: W,
  pub ids: Vec<N>,
}

impl<W: Weight, N: Identifier> Route<W, N> {
  pub fn first(&self) -> Option<N> {
    self.ids.first().cloned()
  }

  pub fn last(&self) -> Option<N> {
    self.ids.last().cloned()
  }

  /// Total length in meters.
  pub fn length(&self) -> f64 {
    self.cost.into()
  }
}

/// Finds the shortest route between two nodes. The search stops as soon as `to` is settled.
///
/// Returns `None` when either node is missing or `to` cannot be reached from `from`.
pub fn route<G>(graph: G, from: G::NodeId, to: G::NodeId) -> Option<Route<G::Weight, G::NodeId>>
where
  G: Copy + IntoEdges + NodeCollection,
{
  if !graph.contains_node(from) || !graph.contains_node(to) {
    return None;
  }

  let mut forward_search: SearchSpace<G::Weight, G::NodeId> = SearchSpace::new();
  forward_search.init(from);

  while let Some((id, cost)) = forward_search.update(graph) {
    if id == to {
      return Some(Route {
        cost,
        ids: forward_search.path(id),
      });
    }
  }
  None
}

/// Sums edge lengths along the walk, resolving parallel edges to the cheapest one.
///
/// Returns `None` if two consecutive nodes are not adjacent.
pub fn route_length<G: Weighted>(graph: &G, ids: &[G::NodeId]) -> Option<G::Weight> {
  let mut total = G::Weight::default();
  for pair in ids.windows(2) {
    total = total + graph.edge_weight(pair[0], pair[1])?;
  }
  Some(total)
}

/// Positions of the route nodes in traveling order.
pub fn collect_route_geometry<G>(graph: &G, ids: &[G::NodeId]) -> Vec<Position>
where
  G: GraphData,
  G::Data: HasPosition,
{
  ids.iter().map(|id| graph.data(*id).position()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  #[test]
  fn test_route_on_chain() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);

    let found = route(&graph, 0, 3).unwrap();
    assert_eq!(found.ids, vec![0, 1, 2, 3]);
    assert_eq!(found.cost, 300.0);
    assert_eq!(found.first(), Some(0));
    assert_eq!(found.last(), Some(3));

    let back = route(&graph, 3, 1).unwrap();
    assert_eq!(back.ids, vec![3, 2, 1]);
    assert_eq!(back.length(), 200.0);
  }

  #[test]
  fn test_route_to_itself() {
    let graph = cycle_graph(4, 10.0);
    let found = route(&graph, 2, 2).unwrap();
    assert_eq!(found.ids, vec![2]);
    assert_eq!(found.cost, 0.0);
  }

  #[test]
  fn test_no_route() {
    let graph = graph_from_data_and_edges(vec![(); 4], vec![(0, 1, 1.0), (2, 3, 1.0)]);
    assert!(route(&graph, 0, 3).is_none());
    assert!(route(&graph, 0, 17).is_none());
    assert!(route(&graph, 17, 0).is_none());
  }

  #[test]
  fn test_route_length() {
    let graph = graph_from_data_and_edges(
      vec![(); 3],
      vec![(0, 1, 100.0), (0, 1, 60.0), (1, 2, 40.0)],
    );

    assert_eq!(route_length(&graph, &[0, 1, 2]), Some(100.0));
    assert_eq!(route_length(&graph, &[2, 1, 0, 1]), Some(160.0));
    assert_eq!(route_length(&graph, &[0, 2]), None);
    assert_eq!(route_length(&graph, &[1]), Some(0.0));
  }

  #[test]
  fn test_collect_route_geometry() {
    let graph = grid_graph(2, 2, 100.0);
    let geometry = collect_route_geometry(&graph, &[0, 1, 3]);
    assert_eq!(geometry.len(), 3);
    assert_eq!(geometry[0], *graph.data(0));
    assert_eq!(geometry[2], *graph.data(3));
  }
}
