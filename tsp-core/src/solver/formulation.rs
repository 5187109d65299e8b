//! Creates an assignment model of the travelling salesman problem.

#[cfg(test)]
#[path = "../../tests/unit/solver/formulation_test.rs"]
mod formulation_test;

use super::constraints::{Entry, SubtourConstraint};
use crate::milp::{LinearConstraint, MilpModel, Sense, Variable};
use crate::models::{AssignmentMatrix, CostMatrix, Cycle};
use crate::utils::{Float, SolveError, SolveResult};
use rustc_hash::FxHashMap;

/// Maps assignment matrix entries to model variables.
///
/// A symmetric matrix has one variable per unordered pair of cities, so both `(i, j)` and `(j, i)`
/// refer to the same variable. A directed matrix has one variable per ordered pair. Diagonal entries
/// never have a variable.
#[derive(Clone, Debug)]
pub struct VariableMatrix {
    size: usize,
    is_symmetric: bool,
    variables: Vec<Option<Variable>>,
}

impl VariableMatrix {
    /// Creates variables in the model and returns their matrix.
    pub fn new(model: &mut dyn MilpModel, size: usize, is_symmetric: bool) -> Self {
        let mut variables = vec![None; size * size];

        for from in 0..size {
            for to in 0..size {
                if from == to {
                    continue;
                }

                variables[from * size + to] = if is_symmetric && to < from {
                    variables[to * size + from]
                } else {
                    Some(model.add_binary_variable())
                };
            }
        }

        Self { size, is_symmetric, variables }
    }

    /// Returns amount of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the matrix has one variable per unordered pair.
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    /// Returns a variable of the entry, if any.
    pub fn get(&self, from: usize, to: usize) -> Option<Variable> {
        self.variables[from * self.size + to]
    }

    /// Returns every distinct variable with its entry: `from < to` for symmetric matrices.
    pub fn entries(&self) -> impl Iterator<Item = (Entry, Variable)> + '_ {
        (0..self.size)
            .flat_map(move |from| (0..self.size).map(move |to| (from, to)))
            .filter(move |&(from, to)| if self.is_symmetric { from < to } else { from != to })
            .filter_map(move |(from, to)| self.get(from, to).map(|variable| ((from, to), variable)))
    }

    /// Converts variable values into an assignment matrix.
    pub fn to_assignment(&self, values: &[Float]) -> SolveResult<AssignmentMatrix> {
        let matrix_values = self
            .variables
            .iter()
            .map(|variable| match variable {
                Some(variable) => values.get(variable.index()).copied().ok_or_else(|| {
                    SolveError::Solver(format!("solution has no value for variable {}", variable.index()))
                }),
                None => Ok(0.),
            })
            .collect::<SolveResult<Vec<_>>>()?;

        AssignmentMatrix::new(self.size, matrix_values, self.is_symmetric)
    }

    /// Translates a constraint over entries into a constraint over variables. Coefficients of entries
    /// which share a variable are merged, diagonal entries are dropped.
    pub fn to_model_constraint(&self, constraint: &SubtourConstraint) -> LinearConstraint {
        let mut coefficients = FxHashMap::<Variable, Float>::default();

        constraint
            .terms
            .iter()
            .filter_map(|&((from, to), coefficient)| self.get(from, to).map(|variable| (variable, coefficient)))
            .for_each(|(variable, coefficient)| *coefficients.entry(variable).or_insert(0.) += coefficient);

        let mut terms = coefficients.into_iter().collect::<Vec<_>>();
        terms.sort_by_key(|(variable, _)| *variable);

        LinearConstraint::new(terms, constraint.sense, constraint.rhs)
    }

    /// Sets start values of all variables from a tour.
    pub fn set_start_tour(&self, model: &mut dyn MilpModel, tour: &Cycle) -> SolveResult<()> {
        let assignment = AssignmentMatrix::from_cycles(self.size, &[tour.clone()], self.is_symmetric)?;

        self.entries().for_each(|((from, to), variable)| model.set_start_value(variable, assignment.value(from, to)));

        Ok(())
    }
}

/// Adds variables, objective, degree constraints and, for directed problems, two city cycle
/// elimination into the model.
pub fn create_formulation(model: &mut dyn MilpModel, matrix: &CostMatrix, is_symmetric: bool) -> VariableMatrix {
    let size = matrix.size();
    let variables = VariableMatrix::new(model, size, is_symmetric);

    let objective = variables
        .entries()
        .map(|((from, to), variable)| {
            let cost = if is_symmetric { matrix.edge_cost(from, to) } else { matrix.cost(from, to) };
            (variable, cost)
        })
        .collect();
    model.set_objective(objective);

    let degree = if is_symmetric { 2. } else { 1. };
    for city in 0..size {
        let outgoing = (0..size).filter(|&other| other != city).map(|other| ((city, other), 1.)).collect();
        model.add_constraint(variables.to_model_constraint(&LinearConstraint::new(outgoing, Sense::Equal, degree)));

        if !is_symmetric {
            let incoming = (0..size).filter(|&other| other != city).map(|other| ((other, city), 1.)).collect();
            model.add_constraint(variables.to_model_constraint(&LinearConstraint::new(incoming, Sense::Equal, 1.)));
        }
    }

    if !is_symmetric && size > 2 {
        for from in 0..size {
            for to in from + 1..size {
                let pair = LinearConstraint::new(vec![((from, to), 1.), ((to, from), 1.)], Sense::LessOrEqual, 1.);
                model.add_constraint(variables.to_model_constraint(&pair));
            }
        }
    }

    variables
}
