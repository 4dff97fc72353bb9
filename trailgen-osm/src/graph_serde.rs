use crate::error::ImportError;
use crate::graph_builder::WalkGraph;
use std::fs::File;
use std::io::{BufReader, BufWriter};

pub fn save_graph(graph: &WalkGraph, path: &str) -> Result<(), ImportError> {
  let file = BufWriter::new(File::create(path)?);
  bincode::serialize_into(file, graph)?;
  Ok(())
}

pub fn load_graph(path: &str) -> Result<WalkGraph, ImportError> {
  let file = BufReader::new(File::open(path)?);
  let mut graph: WalkGraph = bincode::deserialize_from(file)?;
  graph.shrink();
  Ok(graph)
}
