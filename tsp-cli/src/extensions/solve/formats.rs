//! Contains result serialization logic.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/formats_test.rs"]
mod formats_test;

use serde::Serialize;
use std::io::{BufWriter, Write};
use tsp_core::models::TspSolution;
use tsp_core::solver::Metrics;
use tsp_core::utils::{Float, GenericError};

/// A solve result written by command line interface.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionResult {
    /// City indices in visiting order starting from city 0.
    pub tour: Vec<usize>,
    /// Tour cost.
    pub cost: Float,
    /// Whether optimality of the tour is proven.
    pub is_optimal: bool,
    /// Solve metrics, if collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsResult>,
}

/// Solve metrics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    /// Total duration in milliseconds.
    pub duration: usize,
    /// Amount of optimizer invocations.
    pub solver_invocations: usize,
    /// Cumulative optimizer time in seconds.
    pub solver_time: Float,
    /// Amount of eliminated cycles.
    pub eliminated_cycles: usize,
    /// Amount of lazy callback triggers.
    pub lazy_triggers: usize,
    /// Amount of pre-seeded constraints.
    pub preseeded_constraints: usize,
}

impl From<Metrics> for MetricsResult {
    fn from(metrics: Metrics) -> Self {
        Self {
            duration: metrics.duration,
            solver_invocations: metrics.solver_invocations,
            solver_time: metrics.solver_time,
            eliminated_cycles: metrics.eliminated_cycles,
            lazy_triggers: metrics.lazy_triggers,
            preseeded_constraints: metrics.preseeded_constraints,
        }
    }
}

/// Writes solution with optional metrics as json.
pub fn write_solution_json<W: Write>(
    writer: BufWriter<W>,
    solution: &TspSolution,
    metrics: Option<Metrics>,
) -> Result<(), GenericError> {
    let result = SolutionResult {
        tour: solution.tour.clone(),
        cost: solution.cost,
        is_optimal: solution.is_optimal,
        metrics: metrics.map(MetricsResult::from),
    };

    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, &result).map_err(|err| format!("cannot write result: '{err}'"))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
