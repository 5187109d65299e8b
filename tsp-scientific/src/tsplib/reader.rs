#[cfg(test)]
#[path = "../../tests/unit/tsplib/reader_test.rs"]
mod reader_test;

use super::EdgeWeightType;
use crate::common::*;
use std::io::{BufReader, Read};
use tsp_core::models::CostMatrix;
use tsp_core::utils::{Float, GenericError, GenericResult};

/// A symmetric TSPLIB95 instance defined by node coordinates.
#[derive(Clone, Debug)]
pub struct TsplibInstance {
    /// Instance name.
    pub name: String,
    /// Edge weight function.
    pub edge_weight_type: EdgeWeightType,
    /// Node coordinates in order of their ids.
    pub cities: Vec<(Float, Float)>,
}

impl TsplibInstance {
    /// Creates a cost matrix using instance's edge weight function.
    pub fn to_cost_matrix(&self) -> GenericResult<CostMatrix> {
        let edge_weight_type = self.edge_weight_type;

        CostMatrix::from_cities(&self.cities, &move |from, to| edge_weight_type.distance(from, to))
            .map_err(GenericError::from)
    }
}

/// A trait to read tsplib95 problem. Only the node coordinates subset of the format is supported.
pub trait TsplibProblem {
    /// Reads tsplib95 problem.
    fn read_tsplib(self) -> Result<TsplibInstance, GenericError>;
}

impl<R: Read> TsplibProblem for BufReader<R> {
    fn read_tsplib(self) -> Result<TsplibInstance, GenericError> {
        TsplibReader::new(self).read_instance()
    }
}

impl TsplibProblem for String {
    fn read_tsplib(self) -> Result<TsplibInstance, GenericError> {
        TsplibReader::new(BufReader::new(self.as_bytes())).read_instance()
    }
}

struct TsplibReader<R: Read> {
    buffer: String,
    reader: BufReader<R>,
    name: Option<String>,
    dimension: Option<usize>,
    edge_weight_type: Option<EdgeWeightType>,
}

impl<R: Read> TsplibReader<R> {
    fn new(reader: BufReader<R>) -> Self {
        Self { buffer: String::new(), reader, name: None, dimension: None, edge_weight_type: None }
    }

    fn read_instance(&mut self) -> Result<TsplibInstance, GenericError> {
        self.read_meta()?;
        let cities = self.read_coordinates()?;

        let edge_weight_type = self.edge_weight_type.ok_or("EDGE_WEIGHT_TYPE is not specified")?;

        Ok(TsplibInstance { name: self.name.clone().unwrap_or_default(), edge_weight_type, cities })
    }

    /// Reads header keys until coordinates section.
    fn read_meta(&mut self) -> Result<(), GenericError> {
        loop {
            let line = self.read_line()?.ok_or("unexpected end of input, expecting NODE_COORD_SECTION")?;

            if line.is_empty() {
                continue;
            }

            if line == "NODE_COORD_SECTION" {
                return Ok(());
            }

            let (key, value) =
                split_key_value(&line).ok_or_else(|| format!("expected colon separated string, got: '{line}'"))?;

            match key {
                "NAME" => self.name = Some(value.to_string()),
                "TYPE" if value != "TSP" => return Err(format!("expecting 'TSP' as TYPE, got '{value}'").into()),
                "DIMENSION" => self.dimension = Some(parse_int(value, "cannot parse DIMENSION")?),
                "EDGE_WEIGHT_TYPE" => self.edge_weight_type = Some(value.parse()?),
                _ => {}
            }
        }
    }

    /// Reads `index x y` lines until `EOF` or end of input.
    fn read_coordinates(&mut self) -> Result<Vec<(Float, Float)>, GenericError> {
        let mut cities = Vec::with_capacity(self.dimension.unwrap_or_default());

        while let Some(line) = self.read_line()? {
            if line == "EOF" {
                break;
            }

            if line.is_empty() {
                continue;
            }

            let data = line.split_whitespace().collect::<Vec<_>>();
            if data.len() != 3 {
                return Err(format!("unexpected coord data: '{line}'").into());
            }

            let id = parse_int(data[0], "cannot parse id")?;
            if id != cities.len() + 1 {
                return Err(format!("expecting node id {}, got {id}", cities.len() + 1).into());
            }

            cities.push((parse_float(data[1], "cannot parse coord.0")?, parse_float(data[2], "cannot parse coord.1")?));
        }

        match self.dimension {
            Some(dimension) if dimension != cities.len() => {
                Err(format!("DIMENSION is {dimension}, but {} nodes are specified", cities.len()).into())
            }
            _ => Ok(cities),
        }
    }

    /// Returns trimmed line or `None` at the end of input.
    fn read_line(&mut self) -> Result<Option<String>, GenericError> {
        match read_line(&mut self.reader, &mut self.buffer)? {
            0 => Ok(None),
            _ => Ok(Some(self.buffer.trim().to_string())),
        }
    }
}
