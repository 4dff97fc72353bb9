//! GPX export of generated routes.

use crate::graph::*;
use crate::route::collect_route_geometry;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use std::io::Write;
use thiserror::Error;

const CREATOR: &str = "trailgen";

#[derive(Error, Debug)]
pub enum ExportError {
  #[error("route refers to node {0} which is not in the graph")]
  UnknownNode(String),

  #[error("failed to write gpx: {0}")]
  Gpx(#[from] gpx::errors::GpxError),

  #[error("gpx document is not valid utf-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}

/// Builds a GPX document with a single track of a single segment, one track point per
/// route node in traveling order.
pub fn route_to_gpx_document<G>(graph: &G, ids: &[G::NodeId], name: Option<&str>) -> Result<Gpx, ExportError>
where
  G: GraphData + NodeCollection,
  G::Data: HasPosition,
{
  if let Some(unknown) = ids.iter().find(|id| !graph.contains_node(**id)) {
    return Err(ExportError::UnknownNode(format!("{:?}", unknown)));
  }

  let mut segment = TrackSegment::new();
  segment.points = collect_route_geometry(graph, ids)
    .into_iter()
    .map(|p| Waypoint::new(geo_types::Point::new(p.x, p.y)))
    .collect();

  let mut track = Track::new();
  track.name = name.map(String::from);
  track.segments.push(segment);

  Ok(Gpx {
    version: GpxVersion::Gpx11,
    creator: Some(CREATOR.to_string()),
    tracks: vec![track],
    ..Default::default()
  })
}

/// Serializes the route as GPX into `writer`.
pub fn route_to_gpx<G, W>(graph: &G, ids: &[G::NodeId], name: Option<&str>, writer: W) -> Result<(), ExportError>
where
  G: GraphData + NodeCollection,
  G::Data: HasPosition,
  W: Write,
{
  let document = route_to_gpx_document(graph, ids, name)?;
  gpx::write(&document, writer)?;
  Ok(())
}

pub fn route_to_gpx_string<G>(graph: &G, ids: &[G::NodeId], name: Option<&str>) -> Result<String, ExportError>
where
  G: GraphData + NodeCollection,
  G::Data: HasPosition,
{
  let mut buffer = Vec::new();
  route_to_gpx(graph, ids, name, &mut buffer)?;
  Ok(String::from_utf8(buffer)?)
}
