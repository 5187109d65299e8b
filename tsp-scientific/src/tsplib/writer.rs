#[cfg(test)]
#[path = "../../tests/unit/tsplib/writer_test.rs"]
mod writer_test;

use std::io::{BufWriter, Write};
use tsp_core::models::TspSolution;
use tsp_core::utils::GenericError;

/// A trait to write tsplib95 tour.
pub trait TsplibTour<W: Write> {
    /// Writes tsplib95 tour with 1-based node ids.
    fn write_tsplib(&self, writer: BufWriter<W>) -> Result<(), GenericError>;
}

impl<W: Write> TsplibTour<W> for (&TspSolution, &str) {
    fn write_tsplib(&self, mut writer: BufWriter<W>) -> Result<(), GenericError> {
        let (solution, name) = *self;

        writeln!(writer, "NAME : {name}.tour")?;
        writeln!(writer, "COMMENT : Tour cost {}", solution.cost)?;
        writeln!(writer, "TYPE : TOUR")?;
        writeln!(writer, "DIMENSION : {}", solution.tour.len())?;
        writeln!(writer, "TOUR_SECTION")?;

        solution.tour.iter().try_for_each(|city| writeln!(writer, "{}", city + 1))?;

        writeln!(writer, "-1")?;
        writeln!(writer, "EOF")?;

        writer.flush()?;

        Ok(())
    }
}
