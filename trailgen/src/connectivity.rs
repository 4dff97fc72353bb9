//! Connected components of undirected graphs.

use crate::graph::*;
use std::collections::{HashSet, VecDeque};

/// Splits the graph into connected components.
///
/// Components are listed in the order of their first node in `graph.nodes()`, nodes of a
/// component in breadth-first order.
pub fn connected_components<G>(graph: G) -> Vec<Vec<G::NodeId>>
where
  G: Copy + IntoEdges + IntoNodes,
{
  let mut visited: HashSet<G::NodeId> = HashSet::new();
  let mut components = Vec::new();

  for root in graph.nodes() {
    if !visited.insert(root) {
      continue;
    }

    let mut component = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(root);
    while let Some(node) = queue.pop_front() {
      component.push(node);
      for neighbor in neighbors(graph, node) {
        if visited.insert(neighbor) {
          queue.push_back(neighbor);
        }
      }
    }
    components.push(component);
  }
  components
}

/// Nodes of the largest connected component, the first one found when several have the
/// same size. Empty for an empty graph.
pub fn largest_component<G>(graph: G) -> Vec<G::NodeId>
where
  G: Copy + IntoEdges + IntoNodes,
{
  connected_components(graph)
    .into_iter()
    .fold(Vec::new(), |largest, component| {
      if component.len() > largest.len() {
        component
      } else {
        largest
      }
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graph_impl::DynamicGraph;
  use crate::test_utils::*;

  #[test]
  fn test_connected_components() {
    let graph = graph_from_data_and_edges(
      vec![(); 7],
      vec![(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0), (5, 5, 1.0), (4, 3, 2.0)],
    );

    let components = connected_components(&graph);
    assert_eq!(components, vec![vec![0, 1, 2], vec![3, 4], vec![5], vec![6]]);
  }

  #[test]
  fn test_largest_component() {
    let graph = graph_from_data_and_edges(
      vec![(); 7],
      vec![(0, 1, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 2, 1.0), (5, 6, 1.0)],
    );

    let mut largest = largest_component(&graph);
    largest.sort();
    assert_eq!(largest, vec![2, 3, 4]);
  }

  #[test]
  fn test_largest_component_ties_and_empty() {
    let graph = graph_from_data_and_edges(vec![(); 4], vec![(2, 3, 1.0), (0, 1, 1.0)]);
    assert_eq!(largest_component(&graph), vec![0, 1]);

    let empty: DynamicGraph<()> = DynamicGraph::new();
    assert!(largest_component(&empty).is_empty());
  }
}
