use super::*;

#[test]
fn can_create_from_symmetric_cycles() {
    let matrix = AssignmentMatrix::from_cycles(4, &[vec![0, 2, 1, 3]], true).unwrap();

    assert!(matrix.is_edge(0, 2) && matrix.is_edge(2, 0));
    assert!(matrix.is_edge(3, 0) && matrix.is_edge(0, 3));
    assert!(!matrix.is_edge(0, 1));
    assert_eq!(matrix.successors(0).collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn can_create_from_directed_cycles() {
    let matrix = AssignmentMatrix::from_cycles(5, &[vec![0, 1], vec![2, 4, 3]], false).unwrap();

    assert!(matrix.is_edge(0, 1) && matrix.is_edge(1, 0));
    assert!(matrix.is_edge(2, 4) && !matrix.is_edge(4, 2));
    assert_eq!(matrix.successors(3).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn can_reject_wrong_size() {
    assert!(matches!(AssignmentMatrix::new(3, vec![0.; 8], false), Err(SolveError::Shape(_))));
    assert!(matches!(AssignmentMatrix::from_cycles(3, &[vec![0, 3]], false), Err(SolveError::Shape(_))));
}

parameterized_test! {can_use_edge_threshold, (value, expected_edge, expected_integral), {
    let matrix = AssignmentMatrix::new(2, vec![0., value, value, 0.], true).unwrap();

    assert_eq!(matrix.is_edge(0, 1), expected_edge);
    assert_eq!(matrix.is_integral(), expected_integral);
}}

can_use_edge_threshold! {
    case_01_one: (1., true, true),
    case_02_almost_one: (0.9999999, true, true),
    case_03_half: (0.5, false, false),
    case_04_above_half: (0.51, true, false),
    case_05_almost_zero: (1E-9, false, true),
}
