//! This module reimports commonly used types.

pub use crate::milp::BranchAndBoundOptimizer;
pub use crate::milp::OptimizerFactory;

pub use crate::models::CostMatrix;
pub use crate::models::TspSolution;
pub use crate::models::euclidean_distance;

pub use crate::solver::Builder;
pub use crate::solver::ClusteringConfig;
pub use crate::solver::Metrics;
pub use crate::solver::Solver;
pub use crate::solver::TelemetryMode;
pub use crate::solver::get_default_optimizer;
pub use crate::solver::get_optimal_tour;
pub use crate::solver::set_default_optimizer;

pub use crate::utils::Float;
pub use crate::utils::GenericError;
pub use crate::utils::InfoLogger;
pub use crate::utils::SolveError;
