use crate::graph_impl::*;
use crate::spatial::*;

// Roughly one meter in degrees of latitude
const METER_IN_DEGREES: f64 = 1.0 / 111_195.0;

const ORIGIN_LAT: f64 = 52.0;
const ORIGIN_LON: f64 = 5.0;

pub fn graph_from_data_and_edges<T>(data: Vec<T>, edges: Vec<(usize, usize, f64)>) -> DynamicGraph<T> {
  let mut graph = DynamicGraph::new_with_data(data);
  for (from, to, length) in edges {
    graph.add_edge(from as u32, to as u32, length);
  }
  graph
}

/// Nodes `0 - 1 - 2 - ... - n` going north, with the given edge lengths.
pub fn chain_graph(lengths: &[f64]) -> DynamicGraph<Position> {
  let mut offset = 0.0;
  let mut positions = vec![from_lat_lon(ORIGIN_LAT, ORIGIN_LON)];
  for length in lengths {
    offset += length;
    positions.push(from_lat_lon(ORIGIN_LAT + offset * METER_IN_DEGREES, ORIGIN_LON));
  }

  let edges = (0..lengths.len()).map(|i| (i, i + 1, lengths[i])).collect();
  graph_from_data_and_edges(positions, edges)
}

/// A ring `0 - 1 - ... - (n-1) - 0` where every edge has the same length.
pub fn cycle_graph(n: usize, length: f64) -> DynamicGraph<Position> {
  let radius = n as f64 * length / (2.0 * std::f64::consts::PI) * METER_IN_DEGREES;
  let positions = (0..n)
    .map(|i| {
      let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
      from_lat_lon(ORIGIN_LAT + radius * angle.cos(), ORIGIN_LON + radius * angle.sin())
    })
    .collect();

  let edges = (0..n).map(|i| (i, (i + 1) % n, length)).collect();
  graph_from_data_and_edges(positions, edges)
}

/// A `rows x cols` lattice, node `r * cols + c` is connected to its right and lower neighbors.
pub fn grid_graph(rows: usize, cols: usize, spacing: f64) -> DynamicGraph<Position> {
  let mut positions = Vec::with_capacity(rows * cols);
  let mut edges = Vec::new();
  for r in 0..rows {
    for c in 0..cols {
      positions.push(from_lat_lon(
        ORIGIN_LAT - r as f64 * spacing * METER_IN_DEGREES,
        ORIGIN_LON + c as f64 * spacing * METER_IN_DEGREES * 1.6,
      ));
      let id = r * cols + c;
      if c + 1 < cols {
        edges.push((id, id + 1, spacing));
      }
      if r + 1 < rows {
        edges.push((id, id + cols, spacing));
      }
    }
  }
  graph_from_data_and_edges(positions, edges)
}
