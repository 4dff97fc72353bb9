//! Generic algorithms for generating running routes of a given length in walking networks.

pub mod connectivity;
pub mod export;
pub mod generator;
pub mod graph;
pub mod graph_impl;
pub mod route;
pub mod spatial;
pub mod waypoint;

mod search_space;

#[cfg(test)]
mod test_utils;
