//! Contains domain models: cost matrix, assignment matrix and solution.

mod assignment;
pub use self::assignment::*;

mod matrix;
pub use self::matrix::*;

mod solution;
pub use self::solution::*;

/// An ordered sequence of distinct city indices which forms a closed loop.
pub type Cycle = Vec<usize>;
