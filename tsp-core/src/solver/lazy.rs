//! Contains lazy constraint delivery: subtours are eliminated inside optimizer's own search.

#[cfg(test)]
#[path = "../../tests/unit/solver/lazy_test.rs"]
mod lazy_test;

use super::constraints::analyze_subtours;
use super::formulation::VariableMatrix;
use super::iterative::{TourResult, check_status};
use super::telemetry::Telemetry;
use crate::milp::{LazyContext, MilpModel};
use crate::utils::{SolveError, SolveResult, Timer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Reacts on integral candidates found by optimizer: every candidate which is not a single tour
/// receives elimination constraints for all its cycles.
#[derive(Clone)]
pub struct LazySubtourEliminator {
    variables: VariableMatrix,
    triggers: Arc<AtomicUsize>,
    eliminated: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<SolveError>>>,
}

impl LazySubtourEliminator {
    /// Creates a new instance of `LazySubtourEliminator`.
    pub fn new(variables: VariableMatrix) -> Self {
        Self {
            variables,
            triggers: Arc::new(AtomicUsize::new(0)),
            eliminated: Arc::new(AtomicUsize::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Handles a single candidate.
    pub fn on_candidate(&self, context: &mut LazyContext<'_>) {
        let assignment = match self.variables.to_assignment(context.values()) {
            Ok(assignment) if !assignment.is_integral() => return,
            Ok(assignment) => assignment,
            Err(err) => {
                self.set_failure(err);
                return;
            }
        };

        self.triggers.fetch_add(1, Ordering::Relaxed);

        let analysis = match analyze_subtours(&assignment) {
            Ok(analysis) => analysis,
            Err(err) => {
                self.set_failure(err);
                return;
            }
        };

        if analysis.is_tour() {
            return;
        }

        self.eliminated.fetch_add(analysis.constraints.len(), Ordering::Relaxed);
        analysis
            .constraints
            .iter()
            .for_each(|constraint| context.submit(self.variables.to_model_constraint(constraint)));
    }

    /// Returns amount of integral candidates seen.
    pub fn triggers(&self) -> usize {
        self.triggers.load(Ordering::Relaxed)
    }

    /// Returns amount of submitted constraints.
    pub fn eliminated(&self) -> usize {
        self.eliminated.load(Ordering::Relaxed)
    }

    /// Returns the first failure which happened inside the callback.
    pub fn take_failure(&self) -> Option<SolveError> {
        self.failure.lock().ok().and_then(|mut failure| failure.take())
    }

    fn set_failure(&self, err: SolveError) {
        if let Ok(mut failure) = self.failure.lock() {
            failure.get_or_insert(err);
        }
    }
}

/// Runs a single optimization with subtours eliminated by a lazy callback.
pub(crate) fn solve_lazily(
    model: &mut dyn MilpModel,
    variables: &VariableMatrix,
    telemetry: &mut Telemetry,
) -> SolveResult<TourResult> {
    if !model.supports_lazy_constraints() {
        return Err(SolveError::Configuration("optimizer does not support lazy constraints".to_string()));
    }

    let eliminator = LazySubtourEliminator::new(variables.clone());
    let callback_eliminator = eliminator.clone();
    if !model.register_lazy_callback(Box::new(move |context: &mut LazyContext<'_>| {
        callback_eliminator.on_candidate(context)
    })) {
        return Err(SolveError::Configuration("optimizer has rejected lazy callback".to_string()));
    }

    let (status, duration) = Timer::measure_duration(|| model.optimize());
    telemetry.on_solver_call(duration);
    telemetry.on_lazy_callback(eliminator.triggers(), eliminator.eliminated());

    if let Some(err) = eliminator.take_failure() {
        return Err(err);
    }

    let is_optimal = check_status(status, telemetry)?;

    let values = model
        .feasible_solutions()
        .into_iter()
        .next()
        .ok_or_else(|| SolveError::Solver("optimizer has returned no solutions".to_string()))?;
    let analysis = analyze_subtours(&variables.to_assignment(&values)?)?;

    if !analysis.is_tour() {
        return Err(SolveError::InvariantViolation(format!(
            "optimizer has accepted a solution with {} cycles despite lazy constraints",
            analysis.cycles.len()
        )));
    }

    let objective =
        model.objective_value().ok_or_else(|| SolveError::Solver("optimizer has no objective value".to_string()))?;

    Ok((analysis.cycles[0].clone(), objective, is_optimal))
}
