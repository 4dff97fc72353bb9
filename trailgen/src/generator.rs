//! Generation of routes with a given length.
//!
//! A candidate route is built from two shortest legs, `start -> mid -> end`, where `mid` is
//! some via-point of the graph. Candidates are accepted when their total length is within
//! the tolerance of the target distance. Two ways of picking via-points are available:
//!
//! - [`Strategy::ViaPoint`] visits every node reachable from the start in order of their
//!   distance from the start. The result is deterministic.
//! - [`Strategy::Sampling`] draws via-points uniformly at random until enough routes are
//!   collected or the attempt budget is spent.
//!
//! Neither strategy fails: missing nodes, disconnected graphs or unsatisfiable tolerances
//! all produce an empty (or short) list of routes.

use crate::graph::*;
use crate::route::*;
use crate::search_space::shortest_path_tree;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Number of routes requested when not specified otherwise.
pub const DEFAULT_ALTERNATIVES: usize = 3;

/// Number of via-points drawn by [`Strategy::Sampling`] before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

// Absorbs rounding differences between distance bounds and summed route lengths
const PRUNING_SLACK: f64 = 1e-6;

/// Parameters of a single route generation call. Distances are in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest<N: Identifier> {
  pub start: N,
  pub end: N,
  pub target_distance: f64,
  pub tolerance: f64,
  pub alternatives: usize,
}

impl<N: Identifier> RouteRequest<N> {
  pub fn new(start: N, end: N, target_distance: f64, tolerance: f64) -> Self {
    RouteRequest {
      start,
      end,
      target_distance,
      tolerance,
      alternatives: DEFAULT_ALTERNATIVES,
    }
  }

  /// A request for routes which return to the start.
  pub fn round_trip(start: N, target_distance: f64, tolerance: f64) -> Self {
    Self::new(start, start, target_distance, tolerance)
  }

  pub fn with_alternatives(mut self, alternatives: usize) -> Self {
    self.alternatives = alternatives;
    self
  }

  pub fn is_round_trip(&self) -> bool {
    self.start == self.end
  }

  /// The tolerance boundary is inclusive.
  pub fn accepts(&self, length: f64) -> bool {
    (length - self.target_distance).abs() <= self.tolerance
  }

  fn is_valid(&self) -> bool {
    self.target_distance.is_finite()
      && self.target_distance > 0.0
      && self.tolerance.is_finite()
      && self.tolerance >= 0.0
      && self.alternatives > 0
  }
}

/// How via-points are picked.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
  /// Scan all nodes reachable from the start by ascending distance. The scan stops early
  /// when `time_limit` is exceeded, returning the routes found so far.
  ViaPoint { time_limit: Option<Duration> },
  /// Draw random via-points, at most `max_attempts` times. A fixed `seed` makes the
  /// result reproducible.
  Sampling { max_attempts: usize, seed: Option<u64> },
}

impl Default for Strategy {
  fn default() -> Self {
    Strategy::ViaPoint { time_limit: None }
  }
}

impl Strategy {
  pub fn sampling() -> Self {
    Strategy::Sampling {
      max_attempts: DEFAULT_MAX_ATTEMPTS,
      seed: None,
    }
  }
}

/// Generates up to `k` distinct routes from `start` to `end` whose length differs from
/// `target_distance` by at most `tolerance`, using [`Strategy::ViaPoint`].
pub fn generate_routes<G>(
  graph: G,
  start: G::NodeId,
  end: G::NodeId,
  target_distance: f64,
  tolerance: f64,
  k: usize,
) -> Vec<Route<G::Weight, G::NodeId>>
where
  G: Copy + IntoEdges + IntoNodes + NodeCollection,
{
  let request = RouteRequest::new(start, end, target_distance, tolerance).with_alternatives(k);
  generate_routes_with(graph, &request, &Strategy::default())
}

/// Generates routes for the request with the given strategy.
///
/// Routes are returned in the order they were found. Every route starts at `start`, ends
/// at `end`, has at least two nodes and is within tolerance; no two routes visit the same
/// sequence of nodes.
pub fn generate_routes_with<G>(
  graph: G,
  request: &RouteRequest<G::NodeId>,
  strategy: &Strategy,
) -> Vec<Route<G::Weight, G::NodeId>>
where
  G: Copy + IntoEdges + IntoNodes + NodeCollection,
{
  if !request.is_valid() {
    warn!(
      "Rejected route request: distance = {}, tolerance = {}, alternatives = {}",
      request.target_distance, request.tolerance, request.alternatives
    );
    return Vec::new();
  }

  if !graph.contains_node(request.start) || !graph.contains_node(request.end) {
    debug!("Start {:?} or end {:?} is not in the graph", request.start, request.end);
    return Vec::new();
  }

  if graph.number_of_edges() == 0 {
    debug!("Graph has no edges");
    return Vec::new();
  }

  let routes = match strategy {
    Strategy::ViaPoint { time_limit } => via_point_routes(graph, request, *time_limit),
    Strategy::Sampling { max_attempts, seed } => {
      sampled_routes(graph, request, *max_attempts, *seed)
    }
  };

  debug!(
    "Generated {} of {} requested routes",
    routes.len(),
    request.alternatives
  );
  routes
}

fn via_point_routes<G>(
  graph: G,
  request: &RouteRequest<G::NodeId>,
  time_limit: Option<Duration>,
) -> Vec<Route<G::Weight, G::NodeId>>
where
  G: Copy + IntoEdges + NodeCollection,
{
  let deadline = time_limit.map(|limit| Instant::now() + limit);
  let tree = shortest_path_tree(graph, request.start);

  let direct: f64 = match tree.cost(request.end) {
    Some(cost) => cost.into(),
    None => {
      debug!("End {:?} is not reachable from {:?}", request.end, request.start);
      return Vec::new();
    }
  };

  let lower = request.target_distance - request.tolerance - PRUNING_SLACK;
  let upper = request.target_distance + request.tolerance + PRUNING_SLACK;

  let mut collector = Collector::new(request);
  for &mid in tree.settled() {
    if collector.is_full() {
      break;
    }
    if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
      debug!("Time limit reached after {} routes", collector.routes.len());
      break;
    }

    let first_leg_length: f64 = match tree.cost(mid) {
      Some(cost) => cost.into(),
      None => continue,
    };

    // Bounds on the length of the second leg follow from the triangle inequality
    let shortest_total = first_leg_length + (first_leg_length - direct).abs();
    let longest_total = 2.0 * first_leg_length + direct;
    if shortest_total > upper {
      // Nodes are settled by ascending distance, so the bound only grows from here on
      break;
    }
    if longest_total < lower {
      continue;
    }

    let second_leg = match route(graph, mid, request.end) {
      Some(second_leg) => second_leg,
      None => continue,
    };
    collector.offer(graph, &tree.path(mid), &second_leg.ids);
  }

  collector.into_routes()
}

fn sampled_routes<G>(
  graph: G,
  request: &RouteRequest<G::NodeId>,
  max_attempts: usize,
  seed: Option<u64>,
) -> Vec<Route<G::Weight, G::NodeId>>
where
  G: Copy + IntoEdges + IntoNodes + NodeCollection,
{
  let nodes: Vec<G::NodeId> = graph.nodes().collect();
  if nodes.is_empty() {
    return Vec::new();
  }

  let mut rng = match seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let mut collector = Collector::new(request);
  let mut attempts = 0;
  while !collector.is_full() && attempts < max_attempts {
    attempts += 1;
    let mid = nodes[rng.gen_range(0..nodes.len())];

    let first_leg = match route(graph, request.start, mid) {
      Some(first_leg) => first_leg,
      None => continue,
    };
    let second_leg = match route(graph, mid, request.end) {
      Some(second_leg) => second_leg,
      None => continue,
    };
    collector.offer(graph, &first_leg.ids, &second_leg.ids);
  }

  if !collector.is_full() {
    debug!("Attempt budget exhausted after {} attempts", attempts);
  }
  collector.into_routes()
}

/// Accepted routes of one generation call.
struct Collector<'r, W: Weight, N: Identifier> {
  request: &'r RouteRequest<N>,
  routes: Vec<Route<W, N>>,
  seen: HashSet<Vec<N>>,
}

impl<'r, W: Weight, N: Identifier> Collector<'r, W, N> {
  fn new(request: &'r RouteRequest<N>) -> Self {
    Collector {
      request,
      routes: Vec::new(),
      seen: HashSet::new(),
    }
  }

  fn is_full(&self) -> bool {
    self.routes.len() >= self.request.alternatives
  }

  /// Joins the legs at their shared via-point and keeps the result if it is a new route
  /// within tolerance.
  fn offer<G>(&mut self, graph: G, first_leg: &[N], second_leg: &[N]) -> bool
  where
    G: Weighted<NodeId = N, Weight = W>,
  {
    let mut ids = first_leg.to_vec();
    ids.extend_from_slice(second_leg.get(1..).unwrap_or(&[]));

    // A single node is the empty loop
    if ids.len() < 2 {
      return false;
    }

    let cost = match route_length(&graph, &ids) {
      Some(cost) => cost,
      None => return false,
    };
    // Loops over zero length edges go nowhere
    if self.request.is_round_trip() && cost <= W::default() {
      return false;
    }
    if !self.request.accepts(cost.into()) || self.seen.contains(&ids) {
      return false;
    }

    debug!("Accepted route of {:?} m with {} nodes", cost, ids.len());
    self.seen.insert(ids.clone());
    self.routes.push(Route { cost, ids });
    true
  }

  fn into_routes(self) -> Vec<Route<W, N>> {
    self.routes
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graph_impl::DynamicGraph;
  use crate::test_utils::*;

  fn assert_routes_valid<D>(
    graph: &DynamicGraph<D>,
    request: &RouteRequest<u32>,
    routes: &[Route<f64, u32>],
  ) {
    assert!(routes.len() <= request.alternatives);
    for (i, r) in routes.iter().enumerate() {
      assert!(r.ids.len() >= 2, "route {} is degenerate", i);
      assert_eq!(r.first(), Some(request.start));
      assert_eq!(r.last(), Some(request.end));
      let length = route_length(graph, &r.ids).expect("consecutive nodes must be adjacent");
      assert_eq!(length, r.cost);
      assert!(request.accepts(length), "route {} has length {}", i, length);
      for other in &routes[i + 1..] {
        assert_ne!(r.ids, other.ids);
      }
    }
  }

  #[test]
  fn test_chain_exact_match() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);

    let routes = generate_routes(&graph, 0, 3, 300.0, 0.0, 3);

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].ids, vec![0, 1, 2, 3]);
    assert_eq!(routes[0].cost, 300.0);
  }

  #[test]
  fn test_chain_unsatisfiable_tolerance() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);
    assert!(generate_routes(&graph, 0, 3, 50.0, 10.0, 3).is_empty());
  }

  #[test]
  fn test_tolerance_boundary_is_inclusive() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);

    let routes = generate_routes(&graph, 0, 3, 250.0, 50.0, 3);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].cost, 300.0);
  }

  #[test]
  fn test_cycle_round_trip() {
    let graph = cycle_graph(5, 100.0);
    let request = RouteRequest::round_trip(0, 400.0, 50.0);

    let routes = generate_routes_with(&graph, &request, &Strategy::default());

    assert_routes_valid(&graph, &request, &routes);
    let found: HashSet<Vec<u32>> = routes.iter().map(|r| r.ids.clone()).collect();
    let expected: HashSet<Vec<u32>> = vec![vec![0, 1, 2, 1, 0], vec![0, 4, 3, 4, 0]]
      .into_iter()
      .collect();
    assert_eq!(found, expected);
    assert!(routes.iter().all(|r| r.cost == 400.0));
  }

  #[test]
  fn test_cycle_round_trip_without_candidates() {
    // Round trips through a via-point are twice the distance to it: 200 or 400 here
    let graph = cycle_graph(5, 100.0);
    let routes = generate_routes(&graph, 0, 0, 300.0, 50.0, 3);
    assert!(routes.is_empty());
  }

  #[test]
  fn test_round_trip_is_never_empty_loop() {
    let graph = cycle_graph(5, 100.0);
    // Tolerance covers a zero length route
    let routes = generate_routes(&graph, 0, 0, 100.0, 100.0, 10);

    assert!(!routes.is_empty());
    assert!(routes.iter().all(|r| r.ids.len() >= 3));
  }

  #[test]
  fn test_grid_round_trip_properties() {
    let graph = grid_graph(5, 5, 100.0);
    let request = RouteRequest::round_trip(12, 800.0, 100.0).with_alternatives(5);

    let routes = generate_routes_with(&graph, &request, &Strategy::default());

    assert!(!routes.is_empty());
    assert_routes_valid(&graph, &request, &routes);
  }

  #[test]
  fn test_grid_point_to_point_alternatives() {
    let graph = grid_graph(5, 5, 100.0);
    let request = RouteRequest::new(0, 24, 800.0, 0.0);

    let routes = generate_routes_with(&graph, &request, &Strategy::default());

    assert_eq!(routes.len(), DEFAULT_ALTERNATIVES);
    assert_routes_valid(&graph, &request, &routes);
  }

  #[test]
  fn test_cardinality_bound() {
    let graph = grid_graph(5, 5, 100.0);
    let routes = generate_routes(&graph, 0, 24, 800.0, 0.0, 2);
    assert_eq!(routes.len(), 2);
  }

  #[test]
  fn test_is_deterministic() {
    let graph = grid_graph(6, 6, 100.0);
    let first = generate_routes(&graph, 14, 14, 1000.0, 200.0, 4);
    let second = generate_routes(&graph, 14, 14, 1000.0, 200.0, 4);
    assert_eq!(first, second);
  }

  #[test]
  fn test_parallel_edges_use_cheapest() {
    let graph = graph_from_data_and_edges(
      vec![(); 3],
      vec![(0, 1, 100.0), (0, 1, 60.0), (1, 2, 40.0)],
    );

    let routes = generate_routes(&graph, 0, 2, 100.0, 0.0, 3);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].ids, vec![0, 1, 2]);
    assert_eq!(routes[0].cost, 100.0);
  }

  #[test]
  fn test_missing_nodes() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);
    assert!(generate_routes(&graph, 0, 42, 300.0, 50.0, 3).is_empty());
    assert!(generate_routes(&graph, 42, 0, 300.0, 50.0, 3).is_empty());

    let sampling = Strategy::sampling();
    let request = RouteRequest::new(42, 0, 300.0, 50.0);
    assert!(generate_routes_with(&graph, &request, &sampling).is_empty());
  }

  #[test]
  fn test_graph_without_edges() {
    let graph = graph_from_data_and_edges(vec![(); 3], vec![]);
    assert!(generate_routes(&graph, 0, 0, 100.0, 1000.0, 3).is_empty());

    let empty: DynamicGraph<()> = DynamicGraph::new();
    assert!(generate_routes(&empty, 0, 0, 100.0, 1000.0, 3).is_empty());
  }

  #[test]
  fn test_disconnected_graph() {
    let graph = graph_from_data_and_edges(
      vec![(); 6],
      vec![(0, 1, 100.0), (1, 2, 100.0), (3, 4, 100.0), (4, 5, 100.0)],
    );

    assert!(generate_routes(&graph, 0, 5, 300.0, 1000.0, 3).is_empty());

    let request = RouteRequest::new(0, 5, 300.0, 1000.0);
    let strategy = Strategy::Sampling {
      max_attempts: 100,
      seed: Some(7),
    };
    assert!(generate_routes_with(&graph, &request, &strategy).is_empty());
  }

  #[test]
  fn test_invalid_requests() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);
    assert!(generate_routes(&graph, 0, 3, 0.0, 500.0, 3).is_empty());
    assert!(generate_routes(&graph, 0, 3, -300.0, 500.0, 3).is_empty());
    assert!(generate_routes(&graph, 0, 3, 300.0, -1.0, 3).is_empty());
    assert!(generate_routes(&graph, 0, 3, std::f64::NAN, 10.0, 3).is_empty());
    assert!(generate_routes(&graph, 0, 3, 300.0, 10.0, 0).is_empty());
  }

  #[test]
  fn test_time_limit_truncates() {
    let graph = grid_graph(5, 5, 100.0);
    let request = RouteRequest::new(0, 24, 800.0, 0.0);

    let strategy = Strategy::ViaPoint {
      time_limit: Some(Duration::from_secs(0)),
    };
    assert!(generate_routes_with(&graph, &request, &strategy).is_empty());

    let strategy = Strategy::ViaPoint {
      time_limit: Some(Duration::from_secs(60)),
    };
    assert_eq!(generate_routes_with(&graph, &request, &strategy).len(), 3);
  }

  #[test]
  fn test_sampling_on_chain() {
    let graph = chain_graph(&[100.0, 100.0, 100.0]);
    let request = RouteRequest::new(0, 3, 300.0, 0.0);
    let strategy = Strategy::Sampling {
      max_attempts: DEFAULT_MAX_ATTEMPTS,
      seed: Some(42),
    };

    let routes = generate_routes_with(&graph, &request, &strategy);

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].ids, vec![0, 1, 2, 3]);
  }

  #[test]
  fn test_sampling_properties_and_reproducibility() {
    let graph = grid_graph(5, 5, 100.0);
    let request = RouteRequest::round_trip(12, 600.0, 200.0).with_alternatives(4);
    let strategy = Strategy::Sampling {
      max_attempts: 500,
      seed: Some(2024),
    };

    let first = generate_routes_with(&graph, &request, &strategy);
    let second = generate_routes_with(&graph, &request, &strategy);

    assert_routes_valid(&graph, &request, &first);
    assert_eq!(first, second);
  }

  #[test]
  fn test_sampling_attempt_budget() {
    let graph = grid_graph(3, 3, 100.0);
    let request = RouteRequest::new(0, 8, 400.0, 0.0);
    let strategy = Strategy::Sampling {
      max_attempts: 0,
      seed: Some(1),
    };
    assert!(generate_routes_with(&graph, &request, &strategy).is_empty());
  }

  #[test]
  fn test_sampling_attempt_budget_unsatisfiable() {
    let graph = grid_graph(3, 3, 100.0);
    // Every walk between opposite corners is a multiple of 100 m
    let request = RouteRequest::new(0, 8, 450.0, 10.0);
    let strategy = Strategy::Sampling {
      max_attempts: 5,
      seed: Some(3),
    };
    assert!(generate_routes_with(&graph, &request, &strategy).is_empty());
  }

  #[test]
  fn test_sampling_attempt_budget_limits_routes() {
    let graph = grid_graph(5, 5, 100.0);
    let request = RouteRequest::round_trip(12, 400.0, 400.0).with_alternatives(20);
    let strategy = Strategy::Sampling {
      max_attempts: 3,
      seed: Some(11),
    };

    let routes = generate_routes_with(&graph, &request, &strategy);

    // At most one route per attempt
    assert!(routes.len() <= 3);
    assert_routes_valid(&graph, &request, &routes);
  }

  #[test]
  fn test_round_trip_skips_zero_length_loops() {
    let graph = graph_from_data_and_edges(vec![(); 3], vec![(0, 1, 0.0), (1, 2, 100.0)]);

    let routes = generate_routes(&graph, 0, 0, 100.0, 100.0, 3);

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].ids, vec![0, 1, 2, 1, 0]);
    assert_eq!(routes[0].cost, 200.0);
    assert!(routes.iter().all(|r| r.cost > 0.0));
  }
}
