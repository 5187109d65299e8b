use super::*;

fn create_constraint(sense: Sense, rhs: Float) -> LinearConstraint<usize> {
    LinearConstraint::new(vec![(0, 1.), (1, 2.)], sense, rhs)
}

parameterized_test! {can_check_violation, (sense, rhs, expected), {
    let constraint = create_constraint(sense, rhs);
    let values = [1., 1.];

    assert_eq!(constraint.evaluate(|&idx| values[idx]), 3.);
    assert_eq!(constraint.is_violated(|&idx| values[idx], 1E-6), expected);
}}

can_check_violation! {
    case_01_le_satisfied: (Sense::LessOrEqual, 3., false),
    case_02_le_violated: (Sense::LessOrEqual, 2., true),
    case_03_ge_satisfied: (Sense::GreaterOrEqual, 3., false),
    case_04_ge_violated: (Sense::GreaterOrEqual, 4., true),
    case_05_eq_satisfied: (Sense::Equal, 3. + 1E-8, false),
    case_06_eq_violated: (Sense::Equal, 2.5, true),
}

#[test]
fn can_collect_submitted_constraints_in_lazy_context() {
    let values = vec![1., 0.];
    let mut context = LazyContext::new(&values);

    assert_eq!(context.values(), &[1., 0.]);
    context.submit(LinearConstraint::new(vec![(Variable::new(0), 1.)], Sense::LessOrEqual, 0.));

    assert_eq!(context.into_submitted().len(), 1);
}

parameterized_test! {can_detect_solution_presence, (status, expected), {
    assert_eq!(status.has_solution(), expected);
}}

can_detect_solution_presence! {
    case_01_optimal: (TerminationStatus::Optimal, true),
    case_02_feasible: (TerminationStatus::FeasibleNotProvenOptimal, true),
    case_03_infeasible: (TerminationStatus::Infeasible, false),
    case_04_error: (TerminationStatus::Error("failed".to_string()), false),
}
