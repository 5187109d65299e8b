//! This module contains an agglomerative hierarchical clustering with average linkage.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/clustering/hierarchical_test.rs"]
mod hierarchical_test;

use crate::utils::Float;

/// Describes a single merge of two clusters. Clusters are identified as in the usual linkage
/// notation: `0..n` are single points, `n + k` is a cluster produced by k-th merge.
#[derive(Clone, Debug, PartialEq)]
pub struct Merge {
    /// First merged cluster.
    pub left: usize,
    /// Second merged cluster.
    pub right: usize,
    /// Linkage distance between merged clusters.
    pub distance: Float,
    /// Amount of points in the new cluster.
    pub size: usize,
}

/// A result of hierarchical clustering: a sequence of `n - 1` merges.
#[derive(Clone, Debug)]
pub struct Dendrogram {
    size: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Cuts the dendrogram into `k` clusters (clamped to `[1, n]`). Members of each cluster are sorted,
    /// clusters are ordered by their smallest member.
    pub fn cut(&self, k: usize) -> Vec<Vec<usize>> {
        if self.size == 0 {
            return vec![];
        }

        let k = k.clamp(1, self.size);
        let mut parents = (0..self.size).collect::<Vec<_>>();
        // a point which represents each merged cluster
        let mut representatives = (0..self.size).collect::<Vec<_>>();

        for merge in self.merges.iter().take(self.size - k) {
            let left = find_root(&mut parents, representatives[merge.left]);
            let right = find_root(&mut parents, representatives[merge.right]);

            parents[right] = left;
            representatives.push(left);
        }

        let mut clusters: Vec<Vec<usize>> = vec![];
        let mut cluster_of_root: Vec<Option<usize>> = vec![None; self.size];

        for point in 0..self.size {
            let root = find_root(&mut parents, point);
            match cluster_of_root[root] {
                Some(idx) => clusters[idx].push(point),
                None => {
                    cluster_of_root[root] = Some(clusters.len());
                    clusters.push(vec![point]);
                }
            }
        }

        clusters
    }
}

/// Creates a dendrogram using average linkage over `size` points with given distance function.
pub fn create_average_linkage<F>(size: usize, distance_fn: F) -> Dendrogram
where
    F: Fn(usize, usize) -> Float,
{
    let mut distances = (0..size)
        .map(|i| (0..size).map(|j| if i == j { 0. } else { distance_fn(i, j) }).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    // cluster id and size for each active row of the distance matrix
    let mut active = (0..size).map(|idx| Some((idx, 1_usize))).collect::<Vec<_>>();
    let mut merges = Vec::with_capacity(size.saturating_sub(1));

    while merges.len() + 1 < size {
        let Some((i, j, distance)) = find_closest_pair(&distances, &active) else {
            break;
        };

        let ((left, left_size), (right, right_size)) = match (active[i], active[j]) {
            (Some(left), Some(right)) => (left, right),
            _ => break,
        };

        // Lance-Williams update for average linkage, the merged cluster takes place of i
        for k in (0..size).filter(|&k| k != i && k != j && active[k].is_some()) {
            let value = (left_size as Float * distances[i][k] + right_size as Float * distances[j][k])
                / (left_size + right_size) as Float;
            distances[i][k] = value;
            distances[k][i] = value;
        }

        let merged_size = left_size + right_size;
        active[i] = Some((size + merges.len(), merged_size));
        active[j] = None;

        merges.push(Merge { left, right, distance, size: merged_size });
    }

    Dendrogram { size, merges }
}

fn find_closest_pair(distances: &[Vec<Float>], active: &[Option<(usize, usize)>]) -> Option<(usize, usize, Float)> {
    let indices = active.iter().enumerate().filter(|(_, item)| item.is_some()).map(|(idx, _)| idx).collect::<Vec<_>>();

    indices
        .iter()
        .enumerate()
        .flat_map(|(position, &i)| indices[position + 1..].iter().map(move |&j| (i, j)))
        .fold(None, |best: Option<(usize, usize, Float)>, (i, j)| match best {
            Some((_, _, distance)) if distances[i][j] >= distance => best,
            _ => Some((i, j, distances[i][j])),
        })
}

fn find_root(parents: &mut [usize], point: usize) -> usize {
    let mut root = point;
    while parents[root] != root {
        root = parents[root];
    }

    // path compression
    let mut current = point;
    while parents[current] != root {
        let next = parents[current];
        parents[current] = root;
        current = next;
    }

    root
}
