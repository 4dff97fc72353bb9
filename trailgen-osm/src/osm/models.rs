use super::categorize::WayProperties;
use geo::LineString;
use osmpbfreader::objects::{NodeId, WayId};
use trailgen::spatial::{haversine_length, Position};

// Coord are coordinates in decimal degress WGS84
pub type Coord = Position;
pub type Geometry = LineString<f64>;

// Node is the OpenStreetMap node
#[derive(Copy, Clone)]
pub struct Node {
    pub id: NodeId,
    pub coord: Coord,
    pub uses: i16,
}

impl Default for Node {
    fn default() -> Node {
        Node {
            id: NodeId(0),
            coord: Coord { x: 0.0, y: 0.0 },
            uses: Default::default(),
        }
    }
}

impl Node {
    pub fn set_coord(&mut self, lon: f64, lat: f64) {
        self.coord.x = lon;
        self.coord.y = lat;
    }
}

// Edge is a topological representation with only two extremities and no geometry
pub struct Edge {
    pub id: WayId,
    pub source: NodeId,
    pub target: NodeId,
    pub geometry: Geometry,
    pub properties: WayProperties,
}

impl Edge {
    // Length in meters of the edge
    pub fn length(&self) -> f64 {
        haversine_length(self.geometry.0.iter().cloned())
    }

    pub fn source_coord(&self) -> Option<Coord> {
        self.geometry.0.first().cloned()
    }

    pub fn target_coord(&self) -> Option<Coord> {
        self.geometry.0.last().cloned()
    }
}
