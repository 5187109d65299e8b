//! A collection of reusable algorithms without dependencies on the optimizer boundary.

pub mod clustering;
pub mod cycles;
pub mod heuristics;
