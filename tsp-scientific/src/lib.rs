//! Scientific crate contains logic to read scientific problems used to benchmark exact TSP
//! algorithms.
//!
//!
//! # Supported formats
//!
//! - **tsplib** subset of TSPLIB95 format: symmetric problems given by node coordinates

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub(crate) mod helpers;

#[cfg(test)]
#[path = "../tests/integration/known_problems_test.rs"]
mod known_problems_test;

pub use tsp_core as core;

pub mod common;
pub mod tsplib;
