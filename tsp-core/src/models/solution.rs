use crate::utils::Float;

/// A result of a solve call.
#[derive(Clone, Debug, PartialEq)]
pub struct TspSolution {
    /// Visiting order: a permutation of city indices which starts from city 0.
    pub tour: Vec<usize>,
    /// Total cost of the closed tour as reported by the optimizer.
    pub cost: Float,
    /// False when the optimizer has not proven optimality, e.g. it stopped on time limit.
    pub is_optimal: bool,
}

impl TspSolution {
    /// Creates a new instance of `TspSolution` with tour rotated to start from city 0.
    pub fn new(tour: Vec<usize>, cost: Float, is_optimal: bool) -> Self {
        Self { tour: rotate_to_zero(tour), cost, is_optimal }
    }
}

/// Rotates a closed tour so that it starts from city 0 (if present).
pub fn rotate_to_zero(mut tour: Vec<usize>) -> Vec<usize> {
    if let Some(position) = tour.iter().position(|&idx| idx == 0) {
        tour.rotate_left(position);
    }

    tour
}
