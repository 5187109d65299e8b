//! Contains solver configuration and a builder to create it using fluent interface style.

#[cfg(test)]
#[path = "../../tests/unit/solver/config_test.rs"]
mod config_test;

use super::{Solver, TelemetryMode};
use crate::milp::OptimizerFactory;
use crate::models::{CostMatrix, Cycle};
use crate::utils::{Float, SolveError, SolveResult};
use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};

lazy_static! {
    static ref DEFAULT_OPTIMIZER: RwLock<Option<Arc<dyn OptimizerFactory>>> = RwLock::new(None);
}

/// Sets a process wide optimizer used when no optimizer is passed to the builder explicitly.
/// Passing `None` resets it.
pub fn set_default_optimizer(optimizer: Option<Arc<dyn OptimizerFactory>>) {
    if let Ok(mut default_optimizer) = DEFAULT_OPTIMIZER.write() {
        *default_optimizer = optimizer;
    }
}

/// Returns a process wide default optimizer, if set.
pub fn get_default_optimizer() -> Option<Arc<dyn OptimizerFactory>> {
    DEFAULT_OPTIMIZER.read().ok().and_then(|optimizer| optimizer.clone())
}

/// Controls clustering based warm start: cities are clustered hierarchically and each cluster of
/// suitable size is solved separately, resulting tours are added as subtour constraints.
#[derive(Clone, Debug)]
pub struct ClusteringConfig {
    /// Enables clustering. It is used only for symmetric problems.
    pub is_enabled: bool,
    /// Clustering is engaged when amount of cities exceeds this value.
    pub min_problem_size: usize,
    /// Amount of clusters is amount of cities divided by this value.
    pub cities_per_cluster: usize,
    /// Only clusters with more cities are solved.
    pub min_cluster_size: usize,
    /// Only clusters with less than this share of cities are solved.
    pub max_cluster_ratio: Float,
    /// Solves clusters in parallel.
    pub is_parallel: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            is_enabled: true,
            min_problem_size: 10,
            cities_per_cluster: 10,
            min_cluster_size: 3,
            max_cluster_ratio: 0.8,
            is_parallel: false,
        }
    }
}

impl ClusteringConfig {
    /// Checks whether clustering should be used for the problem.
    pub fn is_engaged(&self, size: usize, is_symmetric: bool) -> bool {
        self.is_enabled && is_symmetric && size > self.min_problem_size
    }

    /// Returns amount of clusters for the problem.
    pub fn cluster_count(&self, size: usize) -> usize {
        (size / self.cities_per_cluster.max(1)).max(1)
    }

    /// Checks whether a cluster has suitable size to be solved.
    pub fn is_suitable_cluster(&self, cluster_size: usize, size: usize) -> bool {
        cluster_size > self.min_cluster_size && (cluster_size as Float) < self.max_cluster_ratio * size as Float
    }
}

/// A solver configuration.
#[derive(Clone)]
pub struct SolverConfig {
    /// An optimizer used to create models.
    pub optimizer: Arc<dyn OptimizerFactory>,
    /// Whether the problem is solved with undirected edges.
    pub is_symmetric: bool,
    /// Delivers subtour constraints through a lazy callback instead of re-solving.
    pub lazy_constraints: bool,
    /// Seeds optimizer with a heuristic tour.
    pub heuristic_warmstart: bool,
    /// Suppresses optimizer's own log output.
    pub silent: bool,
    /// Subtours which are eliminated before the first optimization.
    pub initial_subtours: Vec<Cycle>,
    /// Time limit in seconds for a single optimizer call.
    pub time_limit: Option<Float>,
    /// Max amount of equally good solutions analyzed per optimizer call.
    pub solution_pool_size: usize,
    /// Clustering warm start settings.
    pub clustering: ClusteringConfig,
    /// Telemetry settings.
    pub telemetry: TelemetryMode,
}

/// Provides configurable way to build solver using fluent interface style.
pub struct Builder {
    matrix: CostMatrix,
    optimizer: Option<Arc<dyn OptimizerFactory>>,
    is_symmetric: Option<bool>,
    lazy_constraints: bool,
    heuristic_warmstart: bool,
    silent: bool,
    initial_subtours: Vec<Cycle>,
    time_limit: Option<Float>,
    solution_pool_size: usize,
    clustering: ClusteringConfig,
    telemetry: TelemetryMode,
}

impl Builder {
    /// Creates a new instance of `Builder` for given cost matrix.
    pub fn new(matrix: CostMatrix) -> Self {
        Self {
            matrix,
            optimizer: None,
            is_symmetric: None,
            lazy_constraints: false,
            heuristic_warmstart: false,
            silent: true,
            initial_subtours: vec![],
            time_limit: None,
            solution_pool_size: 1,
            clustering: ClusteringConfig::default(),
            telemetry: TelemetryMode::None,
        }
    }

    /// Sets optimizer. Default is a process wide default optimizer.
    pub fn with_optimizer(mut self, optimizer: Arc<dyn OptimizerFactory>) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Forces symmetric or directed formulation. Default is detected from the cost matrix.
    pub fn with_symmetric(mut self, is_symmetric: Option<bool>) -> Self {
        self.is_symmetric = is_symmetric;
        self
    }

    /// Sets lazy constraints delivery. Default is false.
    pub fn with_lazy_constraints(mut self, lazy_constraints: bool) -> Self {
        self.lazy_constraints = lazy_constraints;
        self
    }

    /// Sets heuristic tour warm start. Default is false.
    pub fn with_heuristic_warmstart(mut self, heuristic_warmstart: bool) -> Self {
        self.heuristic_warmstart = heuristic_warmstart;
        self
    }

    /// Suppresses optimizer's own output. Default is true.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Sets subtours which are eliminated before the first optimization.
    pub fn with_initial_subtours(mut self, initial_subtours: Vec<Cycle>) -> Self {
        self.initial_subtours = initial_subtours;
        self
    }

    /// Sets time limit in seconds for a single optimizer call. Default is no limit.
    pub fn with_time_limit(mut self, time_limit: Option<Float>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets solution pool size. Default is 1.
    pub fn with_solution_pool_size(mut self, solution_pool_size: usize) -> Self {
        self.solution_pool_size = solution_pool_size;
        self
    }

    /// Sets clustering warm start settings.
    pub fn with_clustering(mut self, clustering: ClusteringConfig) -> Self {
        self.clustering = clustering;
        self
    }

    /// Sets telemetry. Default is no telemetry.
    pub fn with_telemetry(mut self, telemetry: TelemetryMode) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Validates settings and creates a solver.
    pub fn build(self) -> SolveResult<Solver> {
        let optimizer = self.optimizer.or_else(get_default_optimizer).ok_or_else(|| {
            SolveError::Configuration("no optimizer is specified and no default optimizer is set".to_string())
        })?;

        if self.solution_pool_size == 0 {
            return Err(SolveError::Configuration("solution pool size must be positive".to_string()));
        }

        if let Some(time_limit) = self.time_limit.filter(|limit| !limit.is_finite() || *limit <= 0.) {
            return Err(SolveError::Configuration(format!("time limit must be positive, got: {time_limit}")));
        }

        validate_subtours(&self.initial_subtours, self.matrix.size())?;

        let is_symmetric = self.is_symmetric.unwrap_or_else(|| self.matrix.is_symmetric());

        Ok(Solver::new(
            self.matrix,
            SolverConfig {
                optimizer,
                is_symmetric,
                lazy_constraints: self.lazy_constraints,
                heuristic_warmstart: self.heuristic_warmstart,
                silent: self.silent,
                initial_subtours: self.initial_subtours,
                time_limit: self.time_limit,
                solution_pool_size: self.solution_pool_size,
                clustering: self.clustering,
                telemetry: self.telemetry,
            },
        ))
    }
}

fn validate_subtours(subtours: &[Cycle], size: usize) -> SolveResult<()> {
    subtours.iter().enumerate().try_for_each(|(idx, subtour)| {
        if subtour.len() < 2 || subtour.len() >= size {
            return Err(SolveError::Configuration(format!(
                "initial subtour {idx} has {} cities, expected from 2 to {}",
                subtour.len(),
                size.saturating_sub(1)
            )));
        }

        let mut seen = vec![false; size];
        subtour.iter().try_for_each(|&city| match seen.get_mut(city) {
            Some(true) => Err(SolveError::Configuration(format!("initial subtour {idx} visits city {city} twice"))),
            Some(is_seen) => {
                *is_seen = true;
                Ok(())
            }
            None => Err(SolveError::Configuration(format!("initial subtour {idx} has unknown city {city}"))),
        })
    })
}
