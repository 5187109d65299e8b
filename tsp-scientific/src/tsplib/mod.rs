//! Contains functionality to read TSPLIB95 problems and write tours.

mod distance;
pub use self::distance::EdgeWeightType;

mod reader;
pub use self::reader::{TsplibInstance, TsplibProblem};

mod writer;
pub use self::writer::TsplibTour;
