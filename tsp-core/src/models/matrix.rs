#[cfg(test)]
#[path = "../../tests/unit/models/matrix_test.rs"]
mod matrix_test;

use crate::utils::{Float, SolveError, SolveResult};

/// A tolerance used to detect matrix symmetry.
const SYMMETRY_TOLERANCE: Float = 1E-9;

/// A distance function which derives a travel cost between two coordinates.
pub type DistanceFn = dyn Fn((Float, Float), (Float, Float)) -> Float;

/// Represents an immutable square matrix of travel costs: `cost(i, j)` is a cost to travel
/// from city `i` to city `j`. Values are kept in a flattened row-major vector.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    size: usize,
    values: Vec<Float>,
}

impl CostMatrix {
    /// Creates a new instance of `CostMatrix` from flattened row-major values.
    pub fn new(values: Vec<Float>) -> SolveResult<Self> {
        let size = (values.len() as Float).sqrt().round() as usize;

        if size * size != values.len() {
            return Err(SolveError::Shape(format!("non-square flatten matrix: {} items", values.len())));
        }

        if size == 0 {
            return Err(SolveError::Shape("empty cost matrix".to_string()));
        }

        if let Some(position) = values.iter().position(|value| !value.is_finite() || *value < 0.) {
            return Err(SolveError::Shape(format!(
                "invalid cost at ({}, {}): '{}'",
                position / size,
                position % size,
                values[position]
            )));
        }

        Ok(Self { size, values })
    }

    /// Creates a new instance of `CostMatrix` from rows.
    pub fn from_rows(rows: Vec<Vec<Float>>) -> SolveResult<Self> {
        let size = rows.len();

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(SolveError::Shape(format!(
                "non-square matrix: row {idx} has {} columns, expected {size}",
                row.len()
            )));
        }

        Self::new(rows.into_iter().flatten().collect())
    }

    /// Creates a new instance of `CostMatrix` from city coordinates using given distance function.
    pub fn from_cities(cities: &[(Float, Float)], distance_fn: &DistanceFn) -> SolveResult<Self> {
        let values = cities
            .iter()
            .flat_map(|&from| cities.iter().map(move |&to| (from, to)))
            .map(|(from, to)| distance_fn(from, to))
            .collect::<Vec<_>>();

        Self::new(values)
    }

    /// Returns amount of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a travel cost from `from` to `to`.
    pub fn cost(&self, from: usize, to: usize) -> Float {
        self.values[from * self.size + to]
    }

    /// Returns a cost of undirected edge: an average of both directions.
    pub fn edge_cost(&self, i: usize, j: usize) -> Float {
        (self.cost(i, j) + self.cost(j, i)) / 2.
    }

    /// Checks whether the matrix is symmetric.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| {
                let (a, b) = (self.cost(i, j), self.cost(j, i));
                (a - b).abs() <= SYMMETRY_TOLERANCE * a.abs().max(b.abs()).max(1.)
            })
        })
    }

    /// Returns a symmetrized version of the matrix where both directions have the average cost.
    pub fn symmetrized(&self) -> Self {
        let values = (0..self.size)
            .flat_map(|i| (0..self.size).map(move |j| (i, j)))
            .map(|(i, j)| if i == j { self.cost(i, j) } else { self.edge_cost(i, j) })
            .collect();

        Self { size: self.size, values }
    }

    /// Extracts a sub matrix induced by given city indices, order of indices is preserved.
    pub fn sub_matrix(&self, indices: &[usize]) -> SolveResult<Self> {
        if let Some(idx) = indices.iter().find(|&&idx| idx >= self.size) {
            return Err(SolveError::Shape(format!("index {idx} is out of bounds for size {}", self.size)));
        }

        Self::new(indices.iter().flat_map(|&i| indices.iter().map(move |&j| self.cost(i, j))).collect())
    }

    /// Returns a cost of closed tour which visits cities in given order.
    pub fn tour_cost(&self, tour: &[usize]) -> Float {
        tour.iter().zip(tour.iter().cycle().skip(1)).map(|(&from, &to)| self.cost(from, to)).sum()
    }
}

/// Calculates euclidean distance between two points.
pub fn euclidean_distance(from: (Float, Float), to: (Float, Float)) -> Float {
    let x = from.0 - to.0;
    let y = from.1 - to.1;

    (x * x + y * y).sqrt()
}
