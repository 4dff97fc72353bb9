use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read pbf: {0}")]
    Pbf(String),

    #[error("failed to encode or decode graph: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("no walkable ways found in the area")]
    EmptyGraph,
}
