use super::*;

fn create_line_distance(points: Vec<Float>) -> impl Fn(usize, usize) -> Float {
    move |i, j| (points[i] - points[j]).abs()
}

#[test]
fn can_create_dendrogram_with_average_linkage() {
    let dendrogram = create_average_linkage(4, create_line_distance(vec![0., 1., 10., 12.]));

    assert_eq!(dendrogram.size, 4);
    assert_eq!(
        dendrogram.merges,
        vec![
            Merge { left: 0, right: 1, distance: 1., size: 2 },
            Merge { left: 2, right: 3, distance: 2., size: 2 },
            Merge { left: 4, right: 5, distance: 10.5, size: 4 },
        ]
    );
}

parameterized_test! {can_cut_dendrogram, (k, expected), {
    let points = vec![0., 20., 1., 21., 50., 2.];
    let dendrogram = create_average_linkage(points.len(), create_line_distance(points));

    assert_eq!(dendrogram.cut(k), expected);
}}

can_cut_dendrogram! {
    case_01_zero_clamped: (0, vec![vec![0, 1, 2, 3, 4, 5]]),
    case_02_one: (1, vec![vec![0, 1, 2, 3, 4, 5]]),
    case_03_two: (2, vec![vec![0, 1, 2, 3, 5], vec![4]]),
    case_04_three: (3, vec![vec![0, 2, 5], vec![1, 3], vec![4]]),
    case_05_all: (6, vec![vec![0], vec![1], vec![2], vec![3], vec![4], vec![5]]),
    case_06_too_many: (10, vec![vec![0], vec![1], vec![2], vec![3], vec![4], vec![5]]),
}

#[test]
fn can_handle_empty_input() {
    let dendrogram = create_average_linkage(0, |_, _| 0.);

    assert!(dendrogram.merges.is_empty());
    assert!(dendrogram.cut(3).is_empty());
}

#[test]
fn can_cut_dendrogram_with_shared_root_points() {
    let points = vec![0., 1., 2., 30., 31., 60.];
    let dendrogram = create_average_linkage(points.len(), create_line_distance(points));

    let clusters = dendrogram.cut(3);

    assert_eq!(clusters, vec![vec![0, 1, 2], vec![3, 4], vec![5]]);
    assert_eq!(clusters.iter().map(|cluster| cluster.len()).sum::<usize>(), 6);
}
