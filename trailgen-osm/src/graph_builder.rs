use crate::error::ImportError;
use crate::osm::{read_edges, Edge as OsmEdge, WayFilter};
use log::info;
use osmpbfreader::objects::NodeId;
use std::collections::HashMap;
use trailgen::connectivity::largest_component;
use trailgen::graph::*;
use trailgen::graph_impl::{CompactGraph, DynamicGraph, Idx};
use trailgen::spatial::{haversine_distance, Position};

/// Walking network: node data is the position of the node, edge weights are lengths in meters.
pub type WalkGraph = CompactGraph<Position>;

/// Circular area around a point, used to clip the network.
#[derive(Clone, Copy, Debug)]
pub struct Area {
  pub center: Position,
  pub radius_m: f64,
}

impl Area {
  pub fn contains(&self, p: &Position) -> bool {
    haversine_distance(&self.center, p) <= self.radius_m
  }
}

#[derive(Clone, Copy, Debug)]
pub struct ImportOptions {
  pub filter: WayFilter,
  pub area: Option<Area>,
}

impl Default for ImportOptions {
  fn default() -> Self {
    ImportOptions {
      filter: WayFilter::Walkable,
      area: None,
    }
  }
}

pub fn import_osm_pbf(pbf_path: &str, options: &ImportOptions) -> Result<WalkGraph, ImportError> {
  let edges = read_edges(pbf_path, options.filter)?;

  let graph = build_walk_graph(&edges, options.area.as_ref());
  if graph.number_of_edges() == 0 {
    return Err(ImportError::EmptyGraph);
  }
  Ok(graph)
}

/// Builds the walking network from OSM edges.
///
/// Edges with an endpoint outside of `area` and self-loops are dropped. Only the largest
/// connected component is kept, so that every node can reach every other node.
pub fn build_walk_graph(osm_edges: &[OsmEdge], area: Option<&Area>) -> WalkGraph {
  let mut ids: HashMap<NodeId, Idx> = HashMap::new();
  let mut graph: DynamicGraph<Position> = DynamicGraph::new();

  for record in osm_edges {
    // A loop back to the same node never makes a route shorter
    if record.source == record.target {
      continue;
    }
    let (source_coord, target_coord) = match (record.source_coord(), record.target_coord()) {
      (Some(s), Some(t)) => (s, t),
      _ => continue,
    };
    if let Some(area) = area {
      if !area.contains(&source_coord) || !area.contains(&target_coord) {
        continue;
      }
    }

    let from = *ids
      .entry(record.source)
      .or_insert_with(|| graph.add_node(source_coord));
    let to = *ids
      .entry(record.target)
      .or_insert_with(|| graph.add_node(target_coord));
    graph.add_edge(from, to, record.length());
  }

  let walk_graph = keep_largest_component(&graph);
  info!(
    "Kept {} of {} nodes and {} of {} edges in the largest connected component",
    walk_graph.number_of_nodes(),
    graph.number_of_nodes(),
    walk_graph.number_of_edges(),
    graph.number_of_edges()
  );
  walk_graph
}

fn keep_largest_component(graph: &DynamicGraph<Position>) -> WalkGraph {
  let mut component = largest_component(graph);
  component.sort_unstable();

  let mut remap: Vec<Option<Idx>> = vec![None; graph.number_of_nodes()];
  let mut data = Vec::with_capacity(component.len());
  for (new_id, old_id) in component.iter().enumerate() {
    remap[*old_id as usize] = Some(new_id as Idx);
    data.push(*graph.data(*old_id));
  }

  let mut edges = Vec::new();
  for &from in &component {
    for (to, length) in graph.edges(from) {
      // Each undirected edge is listed at both ends, keep it once
      if from >= to {
        continue;
      }
      if let (Some(a), Some(b)) = (remap[from as usize], remap[to as usize]) {
        edges.push((a, b, length as f32));
      }
    }
  }

  let mut walk_graph = CompactGraph::from_edges(data, &edges);
  walk_graph.shrink();
  walk_graph
}
