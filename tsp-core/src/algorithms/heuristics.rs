//! Provides a simple tour construction heuristic used to warm start the optimizer.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/heuristics_test.rs"]
mod heuristics_test;

use crate::models::{CostMatrix, rotate_to_zero};
use crate::utils::{Float, compare_floats};

/// Max amount of start cities used by nearest neighbour construction.
const MAX_STARTS: usize = 16;

/// Min cost decrease to accept 2-opt move.
const IMPROVEMENT_THRESHOLD: Float = 1E-9;

/// Creates a tour using nearest neighbour construction from several start cities followed by
/// 2-opt improvement. Returns a tour which starts from city 0 and its cost.
pub fn create_heuristic_tour(matrix: &CostMatrix) -> (Vec<usize>, Float) {
    let size = matrix.size();
    if size < 4 {
        let tour = (0..size).collect::<Vec<_>>();
        let cost = if size > 1 { matrix.tour_cost(&tour) } else { 0. };

        return (tour, cost);
    }

    let starts = size.min(MAX_STARTS);
    let tour = (0..starts)
        .map(|idx| idx * size / starts)
        .map(|start| {
            let mut tour = create_nearest_neighbour_tour(matrix, start);
            improve_with_two_opt(matrix, &mut tour);

            let cost = matrix.tour_cost(&tour);
            (tour, cost)
        })
        .min_by(|(_, a), (_, b)| compare_floats(*a, *b))
        .map(|(tour, _)| rotate_to_zero(tour))
        .unwrap_or_else(|| (0..size).collect());

    let cost = matrix.tour_cost(&tour);

    (tour, cost)
}

/// Builds a tour by visiting the cheapest unvisited city from the current one.
pub fn create_nearest_neighbour_tour(matrix: &CostMatrix, start: usize) -> Vec<usize> {
    let size = matrix.size();
    let mut visited = vec![false; size];
    let mut tour = Vec::with_capacity(size);

    let mut current = start;
    visited[current] = true;
    tour.push(current);

    while let Some(next) = (0..size)
        .filter(|&next| !visited[next])
        .min_by(|&a, &b| compare_floats(matrix.cost(current, a), matrix.cost(current, b)))
    {
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}

/// Applies first improvement 2-opt moves until no improving move exists. A move reverses a tour segment,
/// so its direction matters for asymmetric costs: reversed segment cost is taken from prefix sums.
pub fn improve_with_two_opt(matrix: &CostMatrix, tour: &mut [usize]) {
    let size = tour.len();
    if size < 4 {
        return;
    }

    'search: loop {
        let (forward, backward) = get_prefix_costs(matrix, tour);

        for i in 0..size - 2 {
            for j in i + 2..size {
                let (a, b, c, d) = (tour[i], tour[i + 1], tour[j], tour[(j + 1) % size]);

                let old_cost = matrix.cost(a, b) + matrix.cost(c, d) + forward[j] - forward[i + 1];
                let new_cost = matrix.cost(a, c) + matrix.cost(b, d) + backward[j] - backward[i + 1];

                if new_cost < old_cost - IMPROVEMENT_THRESHOLD {
                    tour[i + 1..=j].reverse();
                    continue 'search;
                }
            }
        }

        break;
    }
}

/// Returns cumulative costs of the path `tour[0] -> tour[k]` in forward and reversed edge direction.
fn get_prefix_costs(matrix: &CostMatrix, tour: &[usize]) -> (Vec<Float>, Vec<Float>) {
    let mut forward = vec![0.; tour.len()];
    let mut backward = vec![0.; tour.len()];

    for k in 1..tour.len() {
        forward[k] = forward[k - 1] + matrix.cost(tour[k - 1], tour[k]);
        backward[k] = backward[k - 1] + matrix.cost(tour[k], tour[k - 1]);
    }

    (forward, backward)
}
