//! Provides functionality to split an assignment matrix into disjoint cycles.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/cycles_test.rs"]
mod cycles_test;

use crate::models::{AssignmentMatrix, Cycle};
use crate::utils::{SolveError, SolveResult};

/// Partitions city indices into disjoint cycles by following used edges of the assignment matrix.
/// Cycles are returned in order of their smallest city which is also their first element.
pub fn decompose_cycles(assignment: &AssignmentMatrix) -> SolveResult<Vec<Cycle>> {
    let size = assignment.size();
    let mut visited = vec![false; size];

    let cycles = (0..size).try_fold(Vec::new(), |mut cycles, start| {
        if !visited[start] {
            cycles.push(walk_cycle(assignment, start, &mut visited)?);
        }

        Ok::<_, SolveError>(cycles)
    })?;

    validate_partition(size, &cycles)?;

    Ok(cycles)
}

/// Checks that cycles cover every index in `0..size` exactly once.
pub fn validate_partition(size: usize, cycles: &[Cycle]) -> SolveResult<()> {
    if cycles.is_empty() {
        return Err(SolveError::InvariantViolation("assignment has no cycles".to_string()));
    }

    let mut counts = vec![0_usize; size];
    for &idx in cycles.iter().flatten() {
        match counts.get_mut(idx) {
            Some(count) => *count += 1,
            None => return Err(SolveError::InvariantViolation(format!("city {idx} is out of range {size}"))),
        }
    }

    match counts.iter().position(|&count| count != 1) {
        Some(idx) => Err(SolveError::InvariantViolation(format!(
            "city {idx} belongs to {} cycles instead of one",
            counts[idx]
        ))),
        None => Ok(()),
    }
}

fn walk_cycle(assignment: &AssignmentMatrix, start: usize, visited: &mut [bool]) -> SolveResult<Cycle> {
    let mut cycle = vec![start];
    let mut previous = None;
    let mut current = start;

    visited[start] = true;

    loop {
        // undirected edges are stored in both directions, so the way back has to be skipped
        let next = assignment
            .successors(current)
            .find(|&next| !assignment.is_symmetric() || Some(next) != previous)
            .ok_or_else(|| SolveError::InvariantViolation(format!("walk is stuck at city {current}")))?;

        if next == start {
            return Ok(cycle);
        }

        if visited[next] {
            return Err(SolveError::InvariantViolation(format!("city {next} is reached twice")));
        }

        visited[next] = true;
        cycle.push(next);
        previous = Some(current);
        current = next;
    }
}
