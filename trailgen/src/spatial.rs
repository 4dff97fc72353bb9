//! Geographic types.

use geo::haversine_destination::HaversineDestination;
use geo::{Point, Rect};

#[doc(hidden)]
pub use geo::Coordinate;

/// Position on the map: `x` is the longitude and `y` is the latitude, both in degrees.
pub type Position = Coordinate<f64>;

pub type BoundingBox = Rect<f64>;

/// Earth radius used for all distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Builds a position from a latitude/longitude pair, the order used by map clicks and the CLI.
pub fn from_lat_lon(lat: f64, lon: f64) -> Position {
  Position { x: lon, y: lat }
}

/// Returns a bounding box which contains all points within `distance_m` meters of `center`.
pub fn envelope(center: &Position, distance_m: f64) -> BoundingBox {
  let center_point = Point::from(*center);
  let north = center_point.haversine_destination(0., distance_m).0;
  let east = center_point.haversine_destination(90., distance_m).0;

  BoundingBox::new(
    Coordinate {
      x: 2.0 * center.x - east.x,
      y: 2.0 * center.y - north.y,
    },
    Coordinate {
      x: east.x,
      y: north.y,
    },
  )
}

/// Great-circle distance in meters.
pub fn haversine_distance(from: &Position, to: &Position) -> f64 {
  let (lat1, lat2) = (from.y.to_radians(), to.y.to_radians());
  let d_lat = lat2 - lat1;
  let d_lon = (to.x - from.x).to_radians();

  let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
  2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// Sum of the great-circle distances between consecutive points.
pub fn haversine_length<P: IntoIterator<Item = Position>>(points: P) -> f64 {
  let mut length = 0.0;
  let mut previous: Option<Position> = None;
  for p in points {
    if let Some(prev) = previous {
      length += haversine_distance(&prev, &p);
    }
    previous = Some(p);
  }
  length
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn test_envelope_contains_radius() {
    let center = from_lat_lon(52.4947, 13.3548);
    let bbox = envelope(&center, 1000.0);

    assert!(bbox.min().x < center.x && center.x < bbox.max().x);
    assert!(bbox.min().y < center.y && center.y < bbox.max().y);

    let corner_north = Position {
      x: center.x,
      y: bbox.max().y,
    };
    let corner_east = Position {
      x: bbox.max().x,
      y: center.y,
    };
    assert_relative_eq!(haversine_distance(&center, &corner_north), 1000.0, max_relative = 1e-3);
    assert_relative_eq!(haversine_distance(&center, &corner_east), 1000.0, max_relative = 1e-3);
  }

  #[test]
  fn test_haversine_distance() {
    // One degree of latitude
    let d = haversine_distance(&from_lat_lon(0.0, 0.0), &from_lat_lon(1.0, 0.0));
    assert_relative_eq!(d, EARTH_RADIUS_M * std::f64::consts::PI / 180.0, max_relative = 1e-12);

    let amsterdam = from_lat_lon(52.3676, 4.9041);
    let utrecht = from_lat_lon(52.0907, 5.1214);
    assert_relative_eq!(haversine_distance(&amsterdam, &utrecht), 34_000.0, max_relative = 0.02);
    assert_eq!(haversine_distance(&utrecht, &utrecht), 0.0);
  }

  #[test]
  fn test_haversine_length() {
    let a = from_lat_lon(52.0, 5.0);
    let b = from_lat_lon(52.001, 5.0);
    let c = from_lat_lon(52.002, 5.0);

    let direct = haversine_distance(&a, &c);
    assert_relative_eq!(haversine_length(vec![a, b, c]), direct, max_relative = 1e-9);
    assert_relative_eq!(haversine_length(vec![a]), 0.0);
    // one millidegree of latitude is about 111 meters
    assert!(direct > 220.0 && direct < 225.0);
  }
}
