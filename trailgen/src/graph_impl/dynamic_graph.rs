use super::common::*;
use crate::graph::*;

#[derive(Default, Clone)]
struct Node {
  edges: Vec<(Idx, Length)>,
}

/// Simple undirected graph which stores incident edges as a vector in each node. Not memory
/// efficient. But allows adding nodes and edges dynamically - useful for building and testing.
pub struct DynamicGraph<NodeData> {
  nodes: Vec<Node>,
  data: Vec<NodeData>,
  number_of_edges: usize,
}

impl<NodeData> DynamicGraph<NodeData> {
  pub fn new() -> Self {
    Self {
      nodes: Vec::new(),
      data: Vec::new(),
      number_of_edges: 0,
    }
  }

  pub fn new_with_data(data: Vec<NodeData>) -> Self {
    Self {
      nodes: vec![Default::default(); data.len()],
      data,
      number_of_edges: 0,
    }
  }

  pub fn add_node(&mut self, data: NodeData) -> Idx {
    let size = self.data.len();
    self.nodes.push(Default::default());
    self.data.push(data);
    size as Idx
  }

  /// Adds an undirected edge. Adding the same pair twice creates a parallel edge.
  pub fn add_edge(&mut self, from: Idx, to: Idx, length: Length) -> &mut Self {
    self.nodes[from as usize].edges.push((to, length));
    if from != to {
      self.nodes[to as usize].edges.push((from, length));
    }
    self.number_of_edges += 1;
    self
  }

  pub fn number_of_nodes(&self) -> usize {
    self.nodes.len()
  }

  pub fn number_of_edges(&self) -> usize {
    self.number_of_edges
  }
}

impl<NodeData> Default for DynamicGraph<NodeData> {
  fn default() -> Self {
    Self::new()
  }
}

impl<NodeData> GraphBase for DynamicGraph<NodeData> {
  type NodeId = Idx;
}

impl<NodeData> Weighted for DynamicGraph<NodeData> {
  type Weight = Length;

  fn edge_weight(&self, from: Idx, to: Idx) -> Option<Length> {
    if !self.contains_node(from) {
      return None;
    }
    min_length(self.nodes[from as usize].edges.iter().cloned(), to)
  }
}

impl<'a, NodeData> IntoEdges for &'a DynamicGraph<NodeData> {
  type Edges = std::iter::Cloned<std::slice::Iter<'a, (Idx, Length)>>;

  fn edges(self, node_id: Idx) -> Self::Edges {
    self.nodes[node_id as usize].edges.iter().cloned()
  }
}

impl<'a, NodeData> IntoNodes for &'a DynamicGraph<NodeData> {
  type Nodes = std::ops::Range<Idx>;

  fn nodes(self) -> Self::Nodes {
    0..self.nodes.len() as Idx
  }
}

impl<NodeData> NodeCollection for DynamicGraph<NodeData> {
  fn contains_node(&self, node_id: Idx) -> bool {
    (node_id as usize) < self.nodes.len()
  }

  fn number_of_nodes(&self) -> usize {
    self.nodes.len()
  }

  fn number_of_edges(&self) -> usize {
    self.number_of_edges
  }
}

impl<NodeData> GraphData for DynamicGraph<NodeData> {
  type Data = NodeData;

  fn data(&self, node_id: Idx) -> &Self::Data {
    &self.data[node_id as usize]
  }
}
