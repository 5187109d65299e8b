use super::*;

parameterized_test! {can_format_solve_error, (error, expected), {
    assert_eq!(error.to_string(), expected);
}}

can_format_solve_error! {
    case_01_configuration: (SolveError::Configuration("no optimizer".to_string()), "configuration error: no optimizer"),
    case_02_shape: (SolveError::Shape("3x2".to_string()), "shape error: 3x2"),
    case_03_solver: (SolveError::Solver("infeasible".to_string()), "solver error: infeasible"),
    case_04_invariant: (SolveError::InvariantViolation("stuck".to_string()), "algorithm invariant violated: stuck"),
}

#[test]
fn can_distinguish_invariant_violation() {
    assert!(SolveError::InvariantViolation("stuck".to_string()).is_invariant_violation());
    assert!(!SolveError::Solver("infeasible".to_string()).is_invariant_violation());
}

#[test]
fn can_convert_solve_error_into_generic() {
    let error: GenericError = SolveError::Shape("empty".to_string()).into();

    assert_eq!(error, GenericError::from("shape error: empty"));
}
