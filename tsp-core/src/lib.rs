//! Core crate contains building blocks to solve ***Travelling Salesman Problem*** exactly using an
//! assignment model with subtour elimination constraints.
//!
//! The model is solved by an optimizer behind a narrow boundary (see `milp` module), subtours found in
//! its solutions are eliminated by new constraints, either between optimizer runs or lazily inside
//! optimizer's own search, until the solution is a single tour. Larger symmetric problems are warm
//! started by solving clusters of cities first.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub(crate) mod helpers;

pub mod algorithms;
pub mod milp;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
