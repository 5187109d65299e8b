//! Contains clustering based warm start: tours of city clusters are likely to appear as subtours
//! of the first relaxed solution, so they are eliminated upfront.

#[cfg(test)]
#[path = "../../tests/unit/solver/warmstart_test.rs"]
mod warmstart_test;

use super::{Builder, ClusteringConfig, SolverConfig, TelemetryMode};
use crate::algorithms::clustering::create_average_linkage;
use crate::models::{CostMatrix, Cycle};
use crate::utils::{Float, SolveResult};
use rayon::prelude::*;

/// Creates subtours by solving every suitable cluster of cities separately. Returned subtours use
/// original city indices. Clusters which fail to solve are skipped.
pub fn create_cluster_subtours(matrix: &CostMatrix, config: &SolverConfig) -> Vec<Cycle> {
    let size = matrix.size();
    let clustering = &config.clustering;

    let dendrogram = create_average_linkage(size, |i, j| matrix.cost(i, j).min(matrix.cost(j, i)));
    let clusters = dendrogram
        .cut(clustering.cluster_count(size))
        .into_iter()
        .filter(|cluster| clustering.is_suitable_cluster(cluster.len(), size))
        .collect::<Vec<_>>();

    let to_subtour = |cluster: &Vec<usize>| -> Option<Cycle> {
        solve_cluster(matrix, cluster, config).ok().map(|tour| tour.into_iter().map(|idx| cluster[idx]).collect())
    };

    if clustering.is_parallel {
        clusters.par_iter().filter_map(to_subtour).collect()
    } else {
        clusters.iter().filter_map(to_subtour).collect()
    }
}

fn solve_cluster(matrix: &CostMatrix, cluster: &[usize], config: &SolverConfig) -> SolveResult<Cycle> {
    let sub_matrix = matrix.sub_matrix(cluster)?;
    let clustering = ClusteringConfig { is_enabled: false, ..config.clustering.clone() };

    let (solution, _) = Builder::new(sub_matrix)
        .with_optimizer(config.optimizer.clone())
        .with_symmetric(Some(true))
        .with_heuristic_warmstart(config.heuristic_warmstart)
        .with_time_limit(config.time_limit)
        .with_clustering(clustering)
        .with_telemetry(TelemetryMode::None)
        .build()?
        .solve()?;

    Ok(solution.tour)
}

/// Returns total cost of given subtours, used for diagnostics.
pub fn get_subtours_cost(matrix: &CostMatrix, subtours: &[Cycle]) -> Float {
    subtours.iter().map(|subtour| matrix.tour_cost(subtour)).sum()
}
