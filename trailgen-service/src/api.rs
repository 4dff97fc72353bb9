use polyline::encode_coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use trailgen::spatial::Position;

const POLYLINE_PRECISION: u32 = 5;

fn default_distance() -> f64 {
  3000.0
}

fn default_tolerance() -> f64 {
  300.0
}

fn default_alternatives() -> usize {
  trailgen::generator::DEFAULT_ALTERNATIVES
}

/// Query string of both endpoints: `?distance=5000&tolerance=250&alternatives=2`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
  #[serde(default = "default_distance")]
  pub distance: f64,
  #[serde(default = "default_tolerance")]
  pub tolerance: f64,
  #[serde(default = "default_alternatives")]
  pub alternatives: usize,
}

impl Default for RouteQuery {
  fn default() -> Self {
    RouteQuery {
      distance: default_distance(),
      tolerance: default_tolerance(),
      alternatives: default_alternatives(),
    }
  }
}

#[derive(Deserialize, Serialize)]
struct ApiWaypoint {
  // Distance in meters between the requested location and the snapped node
  distance: f64,
  location: [f64; 2],
}

#[derive(Deserialize, Serialize)]
pub struct ApiRoute {
  distance: f64,
  geometry: String,
  nodes: Vec<u32>,
}

impl ApiRoute {
  pub fn new<Geometry: IntoIterator<Item = Position>>(
    geometry: Geometry,
    distance: f64,
    nodes: Vec<u32>,
  ) -> Result<ApiRoute, String> {
    Ok(ApiRoute {
      distance,
      geometry: encode_coordinates(geometry, POLYLINE_PRECISION)?,
      nodes,
    })
  }
}

#[derive(Deserialize, Serialize)]
pub struct RouteResponse {
  code: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
  routes: Vec<ApiRoute>,
  waypoints: Vec<ApiWaypoint>,
}

impl RouteResponse {
  /// `snapped` lists the snapped node position and snapping distance of each waypoint.
  pub fn new(routes: Vec<ApiRoute>, snapped: &[(Position, f64)]) -> RouteResponse {
    let waypoints = snapped
      .iter()
      .map(|(p, distance)| ApiWaypoint {
        distance: *distance,
        location: [p.x, p.y],
      })
      .collect();

    if routes.is_empty() {
      RouteResponse {
        code: String::from("NoRoute"),
        message: Some(String::from(
          "No routes found. Try adjusting distance or tolerance.",
        )),
        routes,
        waypoints,
      }
    } else {
      RouteResponse {
        code: String::from("Ok"),
        message: None,
        routes,
        waypoints,
      }
    }
  }
}

#[derive(Debug)]
pub struct RequestError(String);

impl RequestError {
  pub fn with(s: &str) -> Self {
    RequestError(String::from(s))
  }
}

impl fmt::Display for RequestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// One (loop) or two (start and end) `lon,lat` pairs separated by `;`.
#[derive(Debug)]
pub struct Waypoints {
  start: Position,
  end: Option<Position>,
}

impl Waypoints {
  pub fn start(&self) -> &Position {
    &self.start
  }

  /// The end of the route, the start for loops.
  pub fn end(&self) -> &Position {
    self.end.as_ref().unwrap_or(&self.start)
  }

  pub fn has_end(&self) -> bool {
    self.end.is_some()
  }
}

impl FromStr for Waypoints {
  type Err = RequestError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut result = Vec::new();
    for coord_str in s.split(';') {
      let coords: Vec<_> = coord_str.split(',').map(|s| s.trim().parse::<f64>()).collect();
      if coords.len() != 2 {
        return Err(RequestError::with("Each waypoint must have two coordinates"));
      };
      let coords: Vec<_> = coords.iter().filter_map(|r| r.as_ref().ok()).collect();
      if coords.len() != 2 {
        return Err(RequestError(format!(
          "Error in the coordinates of {}",
          coord_str
        )));
      };
      let (lon, lat) = (*coords[0], *coords[1]);
      if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(RequestError(format!("Coordinates out of range: {}", coord_str)));
      }
      result.push(Position { x: lon, y: lat });
    }
    match result[..] {
      [start] => Ok(Waypoints { start, end: None }),
      [start, end] => Ok(Waypoints {
        start,
        end: Some(end),
      }),
      _ => Err(RequestError(format!(
        "Expect 1 or 2 waypoints, {} found",
        result.len()
      ))),
    }
  }
}

impl fmt::Display for Waypoints {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}, {}", self.start.x, self.start.y)?;
    if let Some(end) = &self.end {
      write!(f, "; {}, {}", end.x, end.y)?;
    }
    Ok(())
  }
}
