//! Set of traits for defining a graph abstraction.
//!
//! The module contains traits for defining an undirected, weighted graph whose nodes
//! are located on the map.
//!
mod graph;
mod spatial;
mod weighted;

pub use graph::*;
pub use spatial::*;
pub use weighted::*;
