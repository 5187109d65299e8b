//! Import command helpers

mod csv;
pub use self::csv::*;

use std::io::{BufReader, Read};
use tsp_core::models::CostMatrix;
use tsp_core::utils::GenericError;
use tsp_scientific::tsplib::TsplibProblem;

/// A problem name with its cost matrix.
pub type NamedMatrix = (String, CostMatrix);

/// Imports cost matrix from specific format. `default_name` is used when the format has no name.
pub fn import_matrix<R: Read>(
    input_format: &str,
    reader: BufReader<R>,
    default_name: &str,
) -> Result<NamedMatrix, GenericError> {
    match input_format {
        "tsplib" => {
            let instance = reader.read_tsplib().map_err(|err| format!("cannot read tsplib: {err}"))?;
            let name = if instance.name.is_empty() { default_name.to_string() } else { instance.name.clone() };

            Ok((name, instance.to_cost_matrix()?))
        }
        "csv" => read_csv_matrix(reader)
            .map(|matrix| (default_name.to_string(), matrix))
            .map_err(|err| format!("cannot read csv: {err}").into()),
        _ => Err(format!("unknown format: '{input_format}'").into()),
    }
}
