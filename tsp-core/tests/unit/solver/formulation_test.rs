use super::*;
use crate::milp::{BranchAndBoundModel, ModelSettings};

fn create_variables(size: usize, is_symmetric: bool) -> VariableMatrix {
    let mut model = BranchAndBoundModel::new(ModelSettings::default());

    VariableMatrix::new(&mut model, size, is_symmetric)
}

parameterized_test! {can_create_variables, (size, is_symmetric, expected), {
    let variables = create_variables(size, is_symmetric);

    assert_eq!(variables.entries().count(), expected);
    assert!((0..size).all(|city| variables.get(city, city).is_none()));
}}

can_create_variables! {
    case_01_symmetric: (5, true, 10),
    case_02_directed: (5, false, 20),
    case_03_single: (1, true, 0),
}

#[test]
fn can_share_variable_for_symmetric_entries() {
    let variables = create_variables(4, true);

    assert_eq!(variables.get(1, 3), variables.get(3, 1));
    assert_ne!(variables.get(1, 3), variables.get(1, 2));
}

#[test]
fn can_merge_coefficients_of_shared_variables() {
    let variables = create_variables(4, true);
    let constraint = LinearConstraint::new(vec![((0, 1), 1.), ((1, 0), 1.), ((2, 2), 1.)], Sense::LessOrEqual, 2.);

    let model_constraint = variables.to_model_constraint(&constraint);

    assert_eq!(model_constraint.terms, vec![(variables.get(0, 1).unwrap(), 2.)]);
    assert_eq!(model_constraint.rhs, 2.);
}

#[test]
fn can_convert_values_into_assignment() {
    let variables = create_variables(3, false);
    let mut values = vec![0.; 6];
    [(0, 2), (2, 1), (1, 0)].iter().for_each(|&(from, to)| values[variables.get(from, to).unwrap().index()] = 1.);

    let assignment = variables.to_assignment(&values).unwrap();

    assert!(assignment.is_edge(0, 2) && assignment.is_edge(2, 1) && assignment.is_edge(1, 0));
    assert!(!assignment.is_edge(0, 1));
    assert!(matches!(variables.to_assignment(&values[..3]), Err(SolveError::Solver(_))));
}

parameterized_test! {can_create_formulation, (is_symmetric, expected_constraints), {
    let matrix = CostMatrix::from_rows(vec![
        vec![0., 1., 2., 3.],
        vec![1., 0., 4., 5.],
        vec![2., 4., 0., 6.],
        vec![3., 5., 6., 0.],
    ])
    .unwrap();
    let mut model = BranchAndBoundModel::new(ModelSettings::default());

    let variables = create_formulation(&mut model, &matrix, is_symmetric);

    assert_eq!(model.constraints_count(), expected_constraints);
    assert_eq!(variables.is_symmetric(), is_symmetric);
    assert_eq!(variables.size(), 4);
}}

can_create_formulation! {
    case_01_symmetric: (true, 4),
    case_02_directed: (false, 14),
}

#[test]
fn can_set_start_tour() {
    let mut model = BranchAndBoundModel::new(ModelSettings::default());
    let matrix = CostMatrix::from_rows(vec![vec![0., 1., 1.], vec![1., 0., 1.], vec![1., 1., 0.]]).unwrap();
    let variables = create_formulation(&mut model, &matrix, true);

    variables.set_start_tour(&mut model, &vec![0, 1, 2]).unwrap();

    assert_eq!(crate::milp::MilpModel::optimize(&mut model), crate::milp::TerminationStatus::Optimal);
    assert_eq!(crate::milp::MilpModel::objective_value(&model), Some(3.));
}
