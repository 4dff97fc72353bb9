mod api;
mod config;

use api::*;
use config::Config;
use dotenv::dotenv;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use trailgen::export::route_to_gpx_string;
use trailgen::generator::{generate_routes_with, RouteRequest, Strategy};
use trailgen::graph::GraphData;
use trailgen::graph_impl::{Idx, SpatialGraph};
use trailgen::route::{collect_route_geometry, Route};
use trailgen::spatial::Position;
use trailgen::waypoint::{match_waypoint, SnappedNode};
use trailgen_osm::{load_graph, WalkGraph};
use warp::{reject, Filter};

struct RouteService {
  graph: SpatialGraph<WalkGraph>,
  snap_radius_m: f64,
  strategy: Strategy,
}

type Routes = Vec<Route<f64, Idx>>;

impl RouteService {
  fn snap(&self, waypoints: &Waypoints) -> Option<(SnappedNode<Idx>, SnappedNode<Idx>)> {
    let start = match_waypoint(&self.graph, waypoints.start(), self.snap_radius_m);
    let end = match_waypoint(&self.graph, waypoints.end(), self.snap_radius_m);
    match (start, end) {
      (Some(start), Some(end)) => Some((start, end)),
      _ => {
        debug!("Waypoints are not matched: {}", waypoints);
        None
      }
    }
  }

  fn generate(&self, start: &SnappedNode<Idx>, end: &SnappedNode<Idx>, query: &RouteQuery) -> Routes {
    let request = RouteRequest::new(start.id, end.id, query.distance, query.tolerance)
      .with_alternatives(query.alternatives);

    let route_timer = Instant::now();
    let routes = generate_routes_with(self.graph.inner(), &request, &self.strategy);
    info!(
      "Generated {} routes in {:.3}s: {:?}",
      routes.len(),
      route_timer.elapsed().as_secs_f32(),
      routes.iter().map(|r| r.length().round()).collect::<Vec<_>>()
    );
    routes
  }

  fn snapped_location(&self, node: &SnappedNode<Idx>) -> (Position, f64) {
    (*self.graph.data(node.id), node.distance)
  }
}

// Generation is CPU-bound, it runs on the blocking pool to keep the workers free
async fn generate_blocking(
  service: Arc<RouteService>,
  start: SnappedNode<Idx>,
  end: SnappedNode<Idx>,
  query: RouteQuery,
) -> Result<Routes, warp::Rejection> {
  tokio::task::spawn_blocking(move || service.generate(&start, &end, &query))
    .await
    .map_err(|e| {
      error!("Route generation failed: {}", e);
      reject::not_found()
    })
}

async fn route_request_handler(
  waypoints: Waypoints,
  query: RouteQuery,
  service: Arc<RouteService>,
) -> Result<impl warp::Reply, warp::Rejection> {
  info!("Route request: {}, {:?}", waypoints, query);

  let (start, end) = service.snap(&waypoints).ok_or_else(reject::not_found)?;
  let routes = generate_blocking(Arc::clone(&service), start, end, query).await?;

  let mut api_routes = Vec::with_capacity(routes.len());
  for route in &routes {
    let geometry = collect_route_geometry(service.graph.inner(), &route.ids);
    match ApiRoute::new(geometry, route.length(), route.ids.clone()) {
      Ok(api_route) => api_routes.push(api_route),
      Err(e) => {
        error!("Failed to encode route geometry: {}", e);
        return Err(reject::not_found());
      }
    }
  }

  let mut snapped = vec![service.snapped_location(&start)];
  if waypoints.has_end() {
    snapped.push(service.snapped_location(&end));
  }
  let response = RouteResponse::new(api_routes, &snapped);
  Ok(warp::reply::json(&response))
}

async fn gpx_request_handler(
  waypoints: Waypoints,
  index: usize,
  query: RouteQuery,
  service: Arc<RouteService>,
) -> Result<impl warp::Reply, warp::Rejection> {
  info!("GPX request: {}, route {}, {:?}", waypoints, index, query);

  let (start, end) = service.snap(&waypoints).ok_or_else(reject::not_found)?;
  let routes = generate_blocking(Arc::clone(&service), start, end, query).await?;

  let route = match routes.get(index) {
    Some(route) => route,
    None => {
      warn!("Route {} requested, {} generated", index, routes.len());
      return Err(reject::not_found());
    }
  };

  let name = format!("Route {}", index + 1);
  match route_to_gpx_string(service.graph.inner(), &route.ids, Some(&name)) {
    Ok(xml) => Ok(warp::reply::with_header(xml, "content-type", "application/gpx+xml")),
    Err(e) => {
      error!("Failed to export route: {}", e);
      Err(reject::not_found())
    }
  }
}

#[tokio::main]
async fn main() {
  // Load `.env` file, if there is one
  let dotenv_result = dotenv();
  env_logger::init();
  if let Err(e) = dotenv_result {
    debug!("No .env loaded: {}", e);
  }

  let config = match Config::from_env() {
    Ok(config) => config,
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    }
  };

  let startup_timer = Instant::now();
  let graph = match load_graph(&config.graph_path) {
    Ok(graph) => graph,
    Err(e) => {
      error!("Failed to load graph from {}: {}", config.graph_path, e);
      std::process::exit(1);
    }
  };
  info!(
    "Loaded graph with {} nodes and {} edges in {:.1} seconds",
    graph.number_of_nodes(),
    graph.number_of_edges(),
    startup_timer.elapsed().as_secs_f32()
  );
  graph.log_stats();

  let service = Arc::new(RouteService {
    graph: SpatialGraph::new(graph),
    snap_radius_m: config.snap_radius_m,
    strategy: Strategy::ViaPoint {
      time_limit: config.time_limit,
    },
  });
  let service = warp::any().map(move || Arc::clone(&service));

  let cors = warp::cors().allow_any_origin();

  let route_api = warp::path("route")
    .and(warp::path("v1"))
    .and(warp::path("foot"))
    .and(warp::path::param::<Waypoints>())
    .and(warp::path::end())
    .and(warp::query::<RouteQuery>())
    .and(service.clone())
    .and_then(route_request_handler);

  let gpx_api = warp::path("gpx")
    .and(warp::path("v1"))
    .and(warp::path("foot"))
    .and(warp::path::param::<Waypoints>())
    .and(warp::path::param::<usize>())
    .and(warp::path::end())
    .and(warp::query::<RouteQuery>())
    .and(service.clone())
    .and_then(gpx_request_handler);

  info!("Started service with the bind address {}", config.addr);
  warp::serve(warp::get().and(route_api.or(gpx_api)).with(cors))
    .run(config.addr)
    .await;
}
