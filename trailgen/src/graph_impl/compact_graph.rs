use super::common::*;
use crate::graph::*;
use serde::{Deserialize, Serialize};

/// Undirected graph which uses a compact memory layout for it's data. The graph is immutable.
///
/// Every undirected edge is stored twice, once for each endpoint. Lengths are kept as `f32`,
/// which is precise to a few millimeters for edges of a walking network.
#[derive(Serialize, Deserialize)]
pub struct CompactGraph<NodeData> {
  data: Vec<NodeData>,
  // Offset in the `targets` array to iterate over incident edges. Has a sentinel at the end.
  offsets: Vec<Idx>,
  // All target node ids are stored in this big array, `lengths` is parallel to it.
  targets: Vec<Idx>,
  lengths: Vec<f32>,
  number_of_edges: usize,
}

impl<NodeData> GraphBase for CompactGraph<NodeData> {
  type NodeId = Idx;
}

impl<'a, NodeData> IntoEdges for &'a CompactGraph<NodeData> {
  type Edges = EdgeIterator<'a>;

  fn edges(self, node_id: Idx) -> Self::Edges {
    let start = self.offsets[node_id as usize];
    let end = self.offsets[node_id as usize + 1]; // Safe to do +1 since we added a sentinel
    EdgeIterator::new(&self.targets, &self.lengths, start, end)
  }
}

impl<NodeData> Weighted for CompactGraph<NodeData> {
  type Weight = Length;

  fn edge_weight(&self, from: Idx, to: Idx) -> Option<Length> {
    if !self.contains_node(from) {
      return None;
    }
    min_length(self.edges(from), to)
  }
}

impl<'a, NodeData> IntoNodes for &'a CompactGraph<NodeData> {
  type Nodes = std::ops::Range<Idx>;

  fn nodes(self) -> Self::Nodes {
    0..self.data.len() as Idx
  }
}

impl<NodeData> NodeCollection for CompactGraph<NodeData> {
  fn contains_node(&self, node_id: Idx) -> bool {
    (node_id as usize) < self.data.len()
  }

  fn number_of_nodes(&self) -> usize {
    self.data.len()
  }

  fn number_of_edges(&self) -> usize {
    self.number_of_edges
  }
}

impl<NodeData> GraphData for CompactGraph<NodeData> {
  type Data = NodeData;

  fn data(&self, node_id: Idx) -> &Self::Data {
    &self.data[node_id as usize]
  }
}

impl<NodeData> CompactGraph<NodeData> {
  /// Builds the graph from node data and a list of undirected `(from, to, length)` edges.
  ///
  /// Edges referring to unknown nodes are ignored.
  pub fn from_edges(data: Vec<NodeData>, edges: &[(Idx, Idx, f32)]) -> Self {
    let num_nodes = data.len();
    let valid = |e: &&(Idx, Idx, f32)| (e.0 as usize) < num_nodes && (e.1 as usize) < num_nodes;

    // 1. Count incident edges per node in `offsets[n + 1]`
    let mut offsets: Vec<Idx> = vec![0; num_nodes + 1];
    let mut number_of_edges = 0;
    for (from, to, _) in edges.iter().filter(valid) {
      offsets[*from as usize + 1] += 1;
      if from != to {
        offsets[*to as usize + 1] += 1;
      }
      number_of_edges += 1;
    }

    // 2. Convert counts into global offsets
    for n in 0..num_nodes {
      offsets[n + 1] += offsets[n];
    }

    // 3. Place edges, `cursor` tracks the next free slot of each node
    let total = offsets[num_nodes] as usize;
    let mut targets: Vec<Idx> = vec![0; total];
    let mut lengths: Vec<f32> = vec![0.0; total];
    let mut cursor: Vec<Idx> = offsets[..num_nodes].to_vec();
    let mut place = |from: Idx, to: Idx, length: f32| {
      let slot = cursor[from as usize] as usize;
      targets[slot] = to;
      lengths[slot] = length;
      cursor[from as usize] += 1;
    };
    for (from, to, length) in edges.iter().filter(valid) {
      place(*from, *to, *length);
      if from != to {
        place(*to, *from, *length);
      }
    }

    CompactGraph {
      data,
      offsets,
      targets,
      lengths,
      number_of_edges,
    }
  }

  pub fn number_of_nodes(&self) -> usize {
    self.data.len()
  }

  pub fn number_of_edges(&self) -> usize {
    self.number_of_edges
  }

  pub fn log_stats(&self) {
    log_vector_size("self.data", &self.data);
    log_vector_size("self.offsets", &self.offsets);
    log_vector_size("self.targets", &self.targets);
    log_vector_size("self.lengths", &self.lengths);
  }

  pub fn shrink(&mut self) {
    self.data.shrink_to_fit();
    self.offsets.shrink_to_fit();
    self.targets.shrink_to_fit();
    self.lengths.shrink_to_fit();
  }
}
