//! Contains clustering algorithms.

mod hierarchical;
pub use self::hierarchical::*;
