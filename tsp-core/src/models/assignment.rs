#[cfg(test)]
#[path = "../../tests/unit/models/assignment_test.rs"]
mod assignment_test;

use super::Cycle;
use crate::utils::{EDGE_THRESHOLD, Float, INTEGRALITY_TOLERANCE, SolveError, SolveResult, is_integral};

/// A read-only snapshot of solver output: `value(i, j)` is a share of edge `i -> j` used by
/// the solution. For symmetric problems both directions of an edge have the same value.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentMatrix {
    size: usize,
    values: Vec<Float>,
    is_symmetric: bool,
}

impl AssignmentMatrix {
    /// Creates a new instance of `AssignmentMatrix` from flattened row-major values.
    pub fn new(size: usize, values: Vec<Float>, is_symmetric: bool) -> SolveResult<Self> {
        if size * size != values.len() {
            return Err(SolveError::Shape(format!(
                "assignment matrix of size {size} expects {} values, got {}",
                size * size,
                values.len()
            )));
        }

        Ok(Self { size, values, is_symmetric })
    }

    /// Creates an assignment matrix which encodes given cycles. Two city cycles are only valid for
    /// asymmetric matrices where they are encoded as a pair of opposite arcs.
    pub fn from_cycles(size: usize, cycles: &[Cycle], is_symmetric: bool) -> SolveResult<Self> {
        let mut values = vec![0.; size * size];

        for cycle in cycles.iter().filter(|cycle| cycle.len() > 1) {
            if let Some(idx) = cycle.iter().find(|&&idx| idx >= size) {
                return Err(SolveError::Shape(format!("index {idx} is out of bounds for size {size}")));
            }

            cycle.iter().zip(cycle.iter().cycle().skip(1)).for_each(|(&from, &to)| {
                values[from * size + to] = 1.;
                if is_symmetric {
                    values[to * size + from] = 1.;
                }
            });
        }

        Self::new(size, values, is_symmetric)
    }

    /// Returns size of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the matrix describes undirected edges.
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    /// Returns a value of entry `(from, to)`.
    pub fn value(&self, from: usize, to: usize) -> Float {
        self.values[from * self.size + to]
    }

    /// Checks whether entry `(from, to)` is interpreted as a used edge.
    pub fn is_edge(&self, from: usize, to: usize) -> bool {
        self.value(from, to) > EDGE_THRESHOLD
    }

    /// Returns cities adjacent to `from` through used edges, in ascending order.
    pub fn successors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&to| to != from && self.is_edge(from, to))
    }

    /// Checks whether all values are numerically integral.
    pub fn is_integral(&self) -> bool {
        self.values.iter().all(|&value| is_integral(value, INTEGRALITY_TOLERANCE))
    }
}
