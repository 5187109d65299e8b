//! Builds subtour elimination constraints over assignment matrix entries.

#[cfg(test)]
#[path = "../../tests/unit/solver/constraints_test.rs"]
mod constraints_test;

use crate::algorithms::cycles::decompose_cycles;
use crate::milp::{LinearConstraint, Sense};
use crate::models::{AssignmentMatrix, Cycle};
use crate::utils::{Float, SolveResult};

/// An assignment matrix entry `(from, to)`.
pub type Entry = (usize, usize);

/// A subtour elimination constraint expressed over assignment matrix entries.
pub type SubtourConstraint = LinearConstraint<Entry>;

/// Builds a constraint which forbids given cycle without excluding any tour over all `size` cities.
///
/// For symmetric problems, entries inside the cycle are limited by `2|S| - 2` (each undirected edge is
/// counted in both directions). When the cycle covers more than `(2N + 1) / 3` cities, the cut form is
/// used instead: at least two entries must leave the cycle. For asymmetric problems, arcs inside the
/// cycle are limited by `|S| - 1`.
pub fn build_subtour_constraint(cycle: &[usize], is_symmetric: bool, size: usize) -> SubtourConstraint {
    let cycle_size = cycle.len();

    if is_symmetric && is_large_cycle(cycle_size, size) {
        let mut is_inside = vec![false; size];
        cycle.iter().for_each(|&idx| is_inside[idx] = true);

        let terms = cycle
            .iter()
            .flat_map(|&from| (0..size).filter(|&to| !is_inside[to]).map(move |to| ((from, to), 1.)))
            .collect();

        return LinearConstraint::new(terms, Sense::GreaterOrEqual, 2.);
    }

    let terms = cycle
        .iter()
        .flat_map(|&from| cycle.iter().filter(move |&&to| to != from).map(move |&to| ((from, to), 1.)))
        .collect();

    let rhs = if is_symmetric { 2 * cycle_size - 2 } else { cycle_size - 1 };

    LinearConstraint::new(terms, Sense::LessOrEqual, rhs as Float)
}

/// Checks whether a cycle is large enough to prefer the cut form of the constraint.
pub fn is_large_cycle(cycle_size: usize, size: usize) -> bool {
    3 * cycle_size > 2 * size + 1
}

/// Returns a key which identifies a cycle regardless of its rotation and direction.
pub fn get_cycle_key(cycle: &[usize]) -> Vec<usize> {
    let mut key = cycle.to_vec();
    key.sort_unstable();

    key
}

/// Keeps cycles found in an assignment matrix together with constraints which eliminate them.
#[derive(Clone, Debug)]
pub struct SubtourAnalysis {
    /// Cycles of the assignment.
    pub cycles: Vec<Cycle>,
    /// Elimination constraints: one per cycle or none if the assignment is a tour.
    pub constraints: Vec<SubtourConstraint>,
}

impl SubtourAnalysis {
    /// Returns true if the assignment is a single cycle over all cities.
    pub fn is_tour(&self) -> bool {
        self.cycles.len() == 1
    }
}

/// Splits the assignment into cycles and builds elimination constraints for every cycle if there is
/// more than one. Used both between optimizer runs and inside a lazy callback.
pub fn analyze_subtours(assignment: &AssignmentMatrix) -> SolveResult<SubtourAnalysis> {
    let cycles = decompose_cycles(assignment)?;

    let constraints = if cycles.len() > 1 {
        cycles
            .iter()
            .map(|cycle| build_subtour_constraint(cycle, assignment.is_symmetric(), assignment.size()))
            .collect()
    } else {
        vec![]
    };

    Ok(SubtourAnalysis { cycles, constraints })
}
