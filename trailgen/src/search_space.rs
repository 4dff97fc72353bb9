use crate::graph::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Copy, Clone, PartialEq)]
struct State<W: Weight, N: Identifier> {
  cost: W,
  id: N,
}

impl<W: Weight, N: Identifier> Eq for State<W, N> {}

impl<W: Weight, N: Identifier> Ord for State<W, N> {
  fn cmp(&self, other: &Self) -> Ordering {
    // Sorted desc. Lengths are never NaN, so `partial_cmp` always succeeds
    other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
  }
}

// `PartialOrd` needs to be implemented as well.
impl<W: Weight, N: Identifier> PartialOrd for State<W, N> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// Incremental Dijkstra search from a single root.
///
/// `resolved` keeps the best known cost and the parent of every reached node. A node is
/// settled when it is popped from the queue with its final cost, `settled` keeps the
/// order in which that happened.
pub struct SearchSpace<W: Weight, N: Identifier> {
  pq: BinaryHeap<State<W, N>>,
  resolved: HashMap<N, State<W, N>>,
  settled: Vec<N>,
  settled_set: HashSet<N>,
}

impl<W: Weight, N: Identifier> SearchSpace<W, N> {
  pub fn new() -> Self {
    SearchSpace {
      pq: BinaryHeap::new(),
      resolved: HashMap::new(),
      settled: Vec::new(),
      settled_set: HashSet::new(),
    }
  }

  pub fn init(&mut self, node: N) {
    self.resolve(node, node, Default::default());
  }

  /// Best known cost of the node. Final once the node is settled.
  pub fn cost(&self, node: N) -> Option<W> {
    self.resolved.get(&node).map(|state| state.cost)
  }

  /// Nodes in the order they were settled, i.e. by ascending cost.
  pub fn settled(&self) -> &[N] {
    &self.settled
  }

  /// Whether the final cost of the node is known.
  pub fn is_settled(&self, node: N) -> bool {
    self.settled_set.contains(&node)
  }

  /// Returns the path from `node` back to the root, both included.
  pub fn unwind(&self, node: N) -> Vec<N> {
    let mut result: Vec<N> = Vec::new();

    let mut current_node = node;
    while let Some(state) = self.resolved.get(&current_node) {
      result.push(current_node);
      if current_node == state.id {
        break;
      }
      current_node = state.id;
    }
    result
  }

  /// Returns the path from the root to `node` in traveling order.
  pub fn path(&self, node: N) -> Vec<N> {
    let mut path = self.unwind(node);
    path.reverse();
    path
  }

  /// Settles the next node and returns it with its final cost, or `None` when every node
  /// reachable from the root has been settled.
  pub fn update<G>(&mut self, graph: G) -> Option<(N, W)>
  where
    G: Copy + IntoEdges<Weight = W, NodeId = N>,
  {
    while let Some(State { cost, id }) = self.pq.pop() {
      if self.is_settled(id) {
        // Stale entry, the node was reached again with a lower cost
        continue;
      }

      for (target_id, length) in graph.edges(id) {
        let path_cost: W = cost + length;
        if let Some(target_state) = self.resolved.get(&target_id) {
          if path_cost >= target_state.cost {
            continue;
          }
        }
        self.resolve(target_id, id, path_cost);
      }

      self.settled.push(id);
      self.settled_set.insert(id);
      return Some((id, cost));
    }
    None
  }

  fn resolve(&mut self, node: N, parent_node: N, path_cost: W) {
    self.resolved.insert(
      node,
      State {
        cost: path_cost,
        id: parent_node,
      },
    );
    self.pq.push(State {
      cost: path_cost,
      id: node,
    });
  }
}

/// Runs Dijkstra from `root` until every reachable node is settled.
pub fn shortest_path_tree<G>(graph: G, root: G::NodeId) -> SearchSpace<G::Weight, G::NodeId>
where
  G: Copy + IntoEdges,
{
  let mut search_space = SearchSpace::new();
  search_space.init(root);
  while search_space.update(graph).is_some() {}
  search_space
}

#[cfg(test)]
mod tests {
  use super::super::test_utils::graph_from_data_and_edges;
  use super::*;

  #[test]
  fn test_forward_update() {
    let graph = graph_from_data_and_edges(
      vec![1, 2, 3, 4, 5],
      vec![(0, 1, 2.0), (1, 2, 2.0), (2, 3, 2.0), (3, 4, 2.0), (3, 1, 1.0), (2, 4, 5.0)],
    );

    let mut search_space = SearchSpace::<f64, u32>::new();

    search_space.init(0);

    assert_eq!(search_space.update(&graph), Some((0, 0.0)));
    assert_eq!(search_space.update(&graph), Some((1, 2.0)));
    assert!(search_space.is_settled(1));
    assert!(!search_space.is_settled(3));
    assert_eq!(search_space.update(&graph), Some((3, 3.0)));
    assert!(search_space.is_settled(3));
    assert_eq!(search_space.update(&graph), Some((2, 4.0)));
    assert_eq!(search_space.update(&graph), Some((4, 5.0)));

    assert_eq!(search_space.update(&graph), None);
    assert_eq!(search_space.settled(), &[0, 1, 3, 2, 4]);
  }

  #[test]
  fn test_shortest_path_tree() {
    let graph = graph_from_data_and_edges(
      vec![(); 6],
      vec![(0, 1, 2.0), (1, 2, 2.0), (2, 3, 2.0), (3, 4, 2.0), (3, 1, 1.0), (2, 4, 5.0)],
    );

    let tree = shortest_path_tree(&graph, 0);

    assert_eq!(tree.cost(4), Some(5.0));
    assert_eq!(tree.path(4), vec![0, 1, 3, 4]);
    assert_eq!(tree.unwind(4), vec![4, 3, 1, 0]);
    assert_eq!(tree.path(0), vec![0]);

    // node 5 is isolated
    assert_eq!(tree.cost(5), None);
    assert!(!tree.is_settled(5));
    assert!(tree.path(5).is_empty());
    assert_eq!(tree.settled().len(), 5);
  }

  #[test]
  fn test_parallel_edges_use_cheapest() {
    let graph = graph_from_data_and_edges(vec![(); 3], vec![(0, 1, 9.0), (1, 0, 4.0), (1, 2, 1.0)]);

    let tree = shortest_path_tree(&graph, 2);
    assert_eq!(tree.cost(0), Some(5.0));
    assert_eq!(tree.path(0), vec![2, 1, 0]);
  }
}
