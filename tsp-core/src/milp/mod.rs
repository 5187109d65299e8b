//! Specifies a narrow boundary to a mixed integer linear programming optimizer and provides
//! a reference implementation based on LP relaxations.

mod bnb;
pub use self::bnb::*;

mod model;
pub use self::model::*;
