//! Contains the exact solver: an assignment model with subtour elimination constraints which are
//! generated iteratively or delivered lazily.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tsp_core::prelude::*;
//!
//! let cities = vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.)];
//! let matrix = CostMatrix::from_cities(&cities, &euclidean_distance)?;
//!
//! let (solution, _) = Builder::new(matrix)
//!     .with_optimizer(Arc::new(BranchAndBoundOptimizer::default()))
//!     .build()?
//!     .solve()?;
//!
//! assert_eq!(solution.tour.len(), 4);
//! assert!((solution.cost - 4.).abs() < 1E-9);
//! # Ok::<(), SolveError>(())
//! ```

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

mod config;
pub use self::config::*;

mod constraints;
pub use self::constraints::*;

mod formulation;
pub use self::formulation::*;

mod iterative;

mod lazy;
pub use self::lazy::LazySubtourEliminator;

mod telemetry;
pub use self::telemetry::*;

mod warmstart;
pub use self::warmstart::*;

use self::iterative::solve_iteratively;
use self::lazy::solve_lazily;
use crate::algorithms::heuristics::create_heuristic_tour;
use crate::milp::{ModelSettings, OptimizerFactory};
use crate::models::{CostMatrix, DistanceFn, TspSolution};
use crate::utils::{Float, SolveResult};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Solves the travelling salesman problem exactly.
pub struct Solver {
    matrix: CostMatrix,
    config: SolverConfig,
}

impl Solver {
    /// Creates a new instance of `Solver`. Use `Builder` to get a validated configuration.
    pub fn new(matrix: CostMatrix, config: SolverConfig) -> Self {
        Self { matrix, config }
    }

    /// Returns solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the problem and returns the tour with metrics, if metrics collection is enabled.
    pub fn solve(self) -> SolveResult<(TspSolution, Option<Metrics>)> {
        let Self { matrix, config } = self;
        let size = matrix.size();
        let mut telemetry = Telemetry::new(config.telemetry.clone());

        // trivial instances do not need a model
        if size < 3 {
            let tour = (0..size).collect::<Vec<_>>();
            let cost = if size == 2 { matrix.tour_cost(&tour) } else { 0. };
            telemetry.on_result(cost, true);

            return Ok((TspSolution::new(tour, cost, true), telemetry.take_metrics()));
        }

        let is_symmetric = config.is_symmetric;
        telemetry.log(
            format!(
                "solving {size} cities with '{}' optimizer: {} formulation, {} constraints",
                config.optimizer.name(),
                if is_symmetric { "symmetric" } else { "directed" },
                if config.lazy_constraints { "lazy" } else { "iterative" }
            )
            .as_str(),
        );

        let mut subtours = config.initial_subtours.clone();
        if config.clustering.is_engaged(size, is_symmetric) {
            let cluster_subtours = create_cluster_subtours(&matrix, &config);
            telemetry.log(
                format!(
                    "clustering has produced {} subtour(s) with total cost {}",
                    cluster_subtours.len(),
                    get_subtours_cost(&matrix, &cluster_subtours)
                )
                .as_str(),
            );
            subtours.extend(cluster_subtours);
        }

        let settings = ModelSettings {
            silent: config.silent,
            time_limit: config.time_limit,
            solution_pool_size: config.solution_pool_size,
            logger: config.telemetry.logger(),
        };
        let mut model = config.optimizer.create_model(&settings);
        let variables = create_formulation(model.as_mut(), &matrix, is_symmetric);

        let mut eliminated = FxHashSet::default();
        for subtour in subtours.iter() {
            if eliminated.insert(get_cycle_key(subtour)) {
                let constraint = build_subtour_constraint(subtour, is_symmetric, size);
                model.add_constraint(variables.to_model_constraint(&constraint));
            }
        }
        telemetry.on_preseeded(eliminated.len());

        if config.heuristic_warmstart {
            let heuristic_matrix = if is_symmetric { matrix.symmetrized() } else { matrix.clone() };
            let (tour, cost) = create_heuristic_tour(&heuristic_matrix);
            telemetry.log(format!("heuristic warm start tour cost: {cost}").as_str());
            variables.set_start_tour(model.as_mut(), &tour)?;
        }

        let (tour, cost, is_optimal) = if config.lazy_constraints {
            solve_lazily(model.as_mut(), &variables, &mut telemetry)?
        } else {
            solve_iteratively(model.as_mut(), &variables, eliminated, &mut telemetry)?
        };

        telemetry.on_result(cost, is_optimal);

        Ok((TspSolution::new(tour, cost, is_optimal), telemetry.take_metrics()))
    }
}

/// Returns an optimal tour for given cost matrix using default settings. When no optimizer is passed,
/// a process wide default one is used.
pub fn get_optimal_tour(matrix: CostMatrix, optimizer: Option<Arc<dyn OptimizerFactory>>) -> SolveResult<TspSolution> {
    let builder = Builder::new(matrix);
    let builder = match optimizer {
        Some(optimizer) => builder.with_optimizer(optimizer),
        None => builder,
    };

    builder.build()?.solve().map(|(solution, _)| solution)
}

/// Returns an optimal tour for given cities using distance function to derive the cost matrix.
pub fn get_optimal_tour_from_cities(
    cities: &[(Float, Float)],
    distance_fn: &DistanceFn,
    optimizer: Option<Arc<dyn OptimizerFactory>>,
) -> SolveResult<TspSolution> {
    get_optimal_tour(CostMatrix::from_cities(cities, distance_fn)?, optimizer)
}
