//! Contains the constraint generation loop: solve, find subtours, add constraints, solve again.

use super::constraints::{analyze_subtours, get_cycle_key};
use super::formulation::VariableMatrix;
use super::telemetry::Telemetry;
use crate::milp::{MilpModel, TerminationStatus};
use crate::models::Cycle;
use crate::utils::{Float, SolveError, SolveResult, Timer};
use rustc_hash::FxHashSet;

/// A tour found by the optimizer with its objective value and optimality flag.
pub(crate) type TourResult = (Cycle, Float, bool);

/// Runs optimizer until the best returned solution is a single tour. Every distinct cycle found in any
/// pooled solution is eliminated by a new constraint. Cycles eliminated before (e.g. pre-seeded ones)
/// should be passed as `eliminated`.
pub(crate) fn solve_iteratively(
    model: &mut dyn MilpModel,
    variables: &VariableMatrix,
    mut eliminated: FxHashSet<Vec<usize>>,
    telemetry: &mut Telemetry,
) -> SolveResult<TourResult> {
    loop {
        let (status, duration) = Timer::measure_duration(|| model.optimize());
        telemetry.on_solver_call(duration);

        let is_optimal = check_status(status, telemetry)?;
        let solutions = model.feasible_solutions();
        if solutions.is_empty() {
            return Err(SolveError::Solver("optimizer has returned no solutions".to_string()));
        }

        let analyses = solutions
            .iter()
            .map(|values| variables.to_assignment(values).and_then(|assignment| analyze_subtours(&assignment)))
            .collect::<SolveResult<Vec<_>>>()?;

        let objective = model.objective_value();
        let first_cycles = analyses[0].cycles.len();

        let mut added = 0;
        for analysis in analyses.iter().filter(|analysis| !analysis.is_tour()) {
            for (cycle, constraint) in analysis.cycles.iter().zip(analysis.constraints.iter()) {
                if eliminated.insert(get_cycle_key(cycle)) {
                    model.add_constraint(variables.to_model_constraint(constraint));
                    added += 1;
                }
            }
        }

        telemetry.on_iteration(first_cycles, added, objective);

        if analyses[0].is_tour() {
            let objective =
                objective.ok_or_else(|| SolveError::Solver("optimizer has no objective value".to_string()))?;
            let tour = analyses[0].cycles[0].clone();

            return Ok((tour, objective, is_optimal));
        }

        if added == 0 {
            return Err(SolveError::InvariantViolation(format!(
                "solution has {first_cycles} cycles, but all of them were already eliminated"
            )));
        }
    }
}

/// Converts termination status into optimality flag or error. Non-optimal termination with a solution
/// is reported as a warning.
pub(crate) fn check_status(status: TerminationStatus, telemetry: &Telemetry) -> SolveResult<bool> {
    match status {
        TerminationStatus::Optimal => Ok(true),
        TerminationStatus::FeasibleNotProvenOptimal => {
            telemetry.warn("optimizer has returned a feasible solution without proven optimality");
            Ok(false)
        }
        TerminationStatus::Infeasible => Err(SolveError::Solver("model is infeasible".to_string())),
        TerminationStatus::Error(message) => Err(SolveError::Solver(message)),
    }
}
