//! Import from a simple csv format logic: a square cost matrix with one row per line.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/import/csv_test.rs"]
mod csv_test;

pub use self::actual::read_csv_matrix;

#[cfg(feature = "csv-format")]
mod actual {
    extern crate csv;

    use std::io::{BufReader, Read};
    use tsp_core::models::CostMatrix;
    use tsp_core::utils::{Float, GenericError};

    /// Reads cost matrix from csv without header row.
    pub fn read_csv_matrix<R: Read>(reader: BufReader<R>) -> Result<CostMatrix, GenericError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(false).trim(csv::Trim::All).from_reader(reader);

        let rows = reader
            .records()
            .enumerate()
            .map(|(row_idx, record)| {
                let record = record.map_err(|err| format!("cannot read row {row_idx}: {err}"))?;

                record
                    .iter()
                    .map(|value| {
                        value.parse::<Float>().map_err(|err| format!("cannot parse '{value}' in row {row_idx}: {err}"))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, String>>()?;

        CostMatrix::from_rows(rows).map_err(GenericError::from)
    }
}

#[cfg(not(feature = "csv-format"))]
mod actual {
    use std::io::{BufReader, Read};
    use tsp_core::models::CostMatrix;
    use tsp_core::utils::GenericError;

    /// A stub method for reading cost matrix from csv format.
    pub fn read_csv_matrix<R: Read>(_reader: BufReader<R>) -> Result<CostMatrix, GenericError> {
        Err("csv format is not enabled".into())
    }
}
