mod error;
mod graph_builder;
mod graph_serde;
mod osm;

pub use error::ImportError;
pub use graph_builder::*;
pub use graph_serde::{load_graph, save_graph};
pub use osm::{Edge, WayFilter};
