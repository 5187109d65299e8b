use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::*;
use crate::milp::{BranchAndBoundOptimizer, TerminationStatus};
use crate::models::{Cycle, euclidean_distance};
use crate::utils::SolveError;

fn solve(builder: Builder) -> (TspSolution, Metrics) {
    let (solution, metrics) = builder.build().unwrap().solve().unwrap();

    (solution, metrics.unwrap())
}

fn create_directional_matrix() -> CostMatrix {
    CostMatrix::from_rows(vec![
        vec![0., 1., 10., 10.],
        vec![10., 0., 1., 10.],
        vec![10., 10., 0., 1.],
        vec![1., 10., 10., 0.],
    ])
    .unwrap()
}

fn create_grouped_cities() -> Vec<(Float, Float)> {
    [(0., 0.), (100., 0.), (0., 100.)]
        .iter()
        .flat_map(|&(x, y)| vec![(x, y), (x + 3., y), (x + 3., y + 4.), (x + 1., y + 5.)])
        .collect()
}

#[test]
fn can_solve_unit_square() {
    let cities = vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.)];
    let matrix = CostMatrix::from_cities(&cities, &euclidean_distance).unwrap();

    let (solution, _) = solve(create_test_builder(matrix.clone()));

    assert!((solution.cost - 4.).abs() < 1E-9);
    assert!(solution.is_optimal);
    assert_eq!(solution.tour[0], 0);
    assert!(solution.tour == vec![0, 1, 2, 3] || solution.tour == vec![0, 3, 2, 1], "{:?}", solution.tour);
    assert!((matrix.tour_cost(&solution.tour) - 4.).abs() < 1E-9);
}

parameterized_test! {can_solve_trivial_instances, (rows, expected_tour, expected_cost), {
    let (solution, metrics) = solve(create_test_builder(CostMatrix::from_rows(rows).unwrap()));

    assert_eq!(solution.tour, expected_tour);
    assert_eq!(solution.cost, expected_cost);
    assert!(solution.is_optimal);
    assert_eq!(metrics.solver_invocations, 0);
}}

can_solve_trivial_instances! {
    case_01_single: (vec![vec![5.]], vec![0], 0.),
    case_02_pair: (vec![vec![0., 3.], vec![4., 0.]], vec![0, 1], 7.),
}

#[test]
fn can_reject_empty_matrix() {
    let result = CostMatrix::from_rows(vec![]);

    assert!(matches!(result, Err(SolveError::Shape(_))));
}

parameterized_test! {can_find_exact_optimum, (size, is_symmetric, is_lazy, seed), {
    let matrix = create_random_matrix(size, 100, is_symmetric, seed);
    let expected = brute_force_cost(&matrix);

    let (solution, metrics) = solve(create_test_builder(matrix.clone()).with_lazy_constraints(is_lazy));

    assert_permutation(&solution.tour, size);
    assert!((solution.cost - expected).abs() < 1E-6, "{} != {expected}", solution.cost);
    assert!((matrix.tour_cost(&solution.tour) - expected).abs() < 1E-6);
    assert!(metrics.solver_invocations >= 1);
    if is_lazy {
        assert_eq!(metrics.solver_invocations, 1);
        assert!(metrics.lazy_triggers >= 1);
    }
}}

can_find_exact_optimum! {
    case_01_sym_3: (3, true, false, 0),
    case_02_sym_5: (5, true, false, 1),
    case_03_sym_7: (7, true, false, 2),
    case_04_sym_8_lazy: (8, true, true, 3),
    case_05_asym_3: (3, false, false, 4),
    case_06_asym_5: (5, false, false, 5),
    case_07_asym_7: (7, false, false, 6),
    case_08_asym_7_lazy: (7, false, true, 7),
    case_09_sym_9: (9, true, false, 8),
}

parameterized_test! {can_find_exact_optimum_on_plane, (size, seed), {
    let matrix = create_random_euclidean_matrix(size, seed);
    let expected = brute_force_cost(&matrix);

    let (solution, _) = solve(create_test_builder(matrix).with_heuristic_warmstart(true));

    assert!((solution.cost - expected).abs() < 1E-6, "{} != {expected}", solution.cost);
}}

can_find_exact_optimum_on_plane! {
    case_01: (6, 10),
    case_02: (8, 11),
    case_03: (9, 12),
}

#[test]
fn can_get_same_cost_with_symmetric_and_directed_formulation() {
    let matrix = create_random_euclidean_matrix(8, 42);

    let (symmetric, _) = solve(create_test_builder(matrix.clone()).with_symmetric(Some(true)));
    let (directed, _) = solve(create_test_builder(matrix).with_symmetric(Some(false)));

    assert!((symmetric.cost - directed.cost).abs() < 1E-6, "{} != {}", symmetric.cost, directed.cost);
}

#[test]
fn can_get_same_cost_on_symmetrized_random_matrix() {
    let matrix = create_random_matrix(5, 100, false, 5).symmetrized();

    let (symmetric, _) = solve(create_test_builder(matrix.clone()).with_symmetric(Some(true)));
    let (directed, _) = solve(create_test_builder(matrix).with_symmetric(Some(false)));

    assert!((symmetric.cost - directed.cost).abs() < 1E-6);
}

#[test]
fn can_detect_wrongly_forced_symmetry() {
    let matrix = create_directional_matrix();

    let (directed, _) = solve(create_test_builder(matrix.clone()));
    let (forced, _) = solve(create_test_builder(matrix).with_symmetric(Some(true)));

    assert_eq!(directed.tour, vec![0, 1, 2, 3]);
    assert_eq!(directed.cost, 4.);
    assert_eq!(forced.cost, 22.);
}

#[test]
fn can_get_same_cost_with_lazy_and_iterative_constraints() {
    let matrix = create_random_euclidean_matrix(10, 7);

    let (iterative, _) = solve(create_test_builder(matrix.clone()));
    let (lazy, _) = solve(create_test_builder(matrix).with_lazy_constraints(true));

    assert!((iterative.cost - lazy.cost).abs() < 1E-6);
}

#[test]
fn can_solve_idempotently() {
    let matrix = create_random_matrix(7, 50, false, 9);

    let (first, _) = solve(create_test_builder(matrix.clone()));
    let (second, _) = solve(create_test_builder(matrix));

    assert_eq!(first.cost, second.cost);
}

parameterized_test! {can_preseed_constraints_from_clusters, is_parallel, {
    let matrix = CostMatrix::from_cities(&create_grouped_cities(), &euclidean_distance).unwrap();
    let clustering = ClusteringConfig { cities_per_cluster: 4, is_parallel, ..ClusteringConfig::default() };

    let (with_clusters, metrics) = solve(create_test_builder(matrix.clone()).with_clustering(clustering));
    let no_clustering = ClusteringConfig { is_enabled: false, ..ClusteringConfig::default() };
    let (without_clusters, _) = solve(create_test_builder(matrix).with_clustering(no_clustering));

    assert_eq!(metrics.preseeded_constraints, 3);
    assert_permutation(&with_clusters.tour, 12);
    assert!((with_clusters.cost - without_clusters.cost).abs() < 1E-6);
}}

can_preseed_constraints_from_clusters! {
    case_01_sequential: false,
    case_02_parallel: true,
}

#[test]
fn can_create_cluster_subtours_in_original_indices() {
    let matrix = CostMatrix::from_cities(&create_grouped_cities(), &euclidean_distance).unwrap();
    let solver = create_test_builder(matrix.clone())
        .with_clustering(ClusteringConfig { cities_per_cluster: 4, ..ClusteringConfig::default() })
        .build()
        .unwrap();

    let mut subtours = create_cluster_subtours(&matrix, solver.config());

    subtours.iter_mut().for_each(|subtour| subtour.sort_unstable());
    subtours.sort();
    assert_eq!(subtours, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9, 10, 11]]);
}

#[test]
fn can_use_initial_subtours() {
    let matrix = create_random_euclidean_matrix(8, 3);
    let expected = brute_force_cost(&matrix);

    let (solution, metrics) =
        solve(create_test_builder(matrix).with_initial_subtours(vec![vec![0, 1, 2], vec![3, 4, 5, 6], vec![2, 1, 0]]));

    assert_eq!(metrics.preseeded_constraints, 2);
    assert!((solution.cost - expected).abs() < 1E-6);
}

parameterized_test! {can_reject_invalid_initial_subtours, subtour, {
    let result = create_test_builder(create_random_matrix(5, 10, true, 0)).with_initial_subtours(vec![subtour]).build();

    assert!(matches!(result, Err(SolveError::Configuration(_))));
}}

can_reject_invalid_initial_subtours! {
    case_01_too_short: vec![1],
    case_02_full: vec![0, 1, 2, 3, 4],
    case_03_duplicate: vec![0, 1, 1],
    case_04_out_of_range: vec![0, 1, 5],
}

#[test]
fn can_report_non_optimal_termination() {
    let matrix = create_random_matrix(5, 10, true, 1);
    let tour: Cycle = vec![0, 2, 4, 1, 3];
    let optimizer = Arc::new(ScriptedOptimizer::new(
        5,
        true,
        vec![(TerminationStatus::FeasibleNotProvenOptimal, vec![vec![tour.clone()]])],
    ));
    let (logger, messages) = create_collecting_logger();

    let (solution, _) = Builder::new(matrix.clone())
        .with_optimizer(optimizer)
        .with_telemetry(TelemetryMode::OnlyLogging { logger })
        .build()
        .unwrap()
        .solve()
        .unwrap();

    assert!(!solution.is_optimal);
    assert_eq!(solution.tour, tour);
    assert!((solution.cost - matrix.tour_cost(&tour)).abs() < 1E-9);
    assert!(messages.lock().unwrap().iter().any(|message| message.starts_with("warning:")));
}

#[test]
fn can_add_deduplicated_constraints_from_solution_pool() {
    let matrix = create_random_matrix(6, 10, true, 2);
    let optimizer = Arc::new(ScriptedOptimizer::new(
        6,
        true,
        vec![
            (
                TerminationStatus::Optimal,
                vec![
                    vec![vec![0, 1, 2], vec![3, 4, 5]],
                    vec![vec![2, 1, 0], vec![3, 5, 4]],
                    vec![vec![0, 2, 4], vec![1, 3, 5]],
                ],
            ),
            (TerminationStatus::Optimal, vec![vec![vec![0, 1, 2, 3, 4, 5]]]),
        ],
    ));

    let (solution, metrics) = solve(
        Builder::new(matrix)
            .with_optimizer(optimizer.clone())
            .with_solution_pool_size(3)
            .with_telemetry(TelemetryMode::OnlyMetrics),
    );

    assert_eq!(solution.tour, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(metrics.solver_invocations, 2);
    assert_eq!(metrics.eliminated_cycles, 4);
    // six degree constraints and four subtour constraints
    assert_eq!(optimizer.constraints().len(), 10);
}

#[test]
fn can_detect_lack_of_progress() {
    let matrix = create_random_matrix(6, 10, true, 3);
    let subtours = vec![vec![vec![0, 1, 2], vec![3, 4, 5]]];
    let optimizer = Arc::new(ScriptedOptimizer::new(
        6,
        true,
        vec![(TerminationStatus::Optimal, subtours.clone()), (TerminationStatus::Optimal, subtours)],
    ));

    let result = create_test_builder(matrix).with_optimizer(optimizer).build().unwrap().solve();

    assert!(matches!(result, Err(ref err) if err.is_invariant_violation()));
}

parameterized_test! {can_propagate_solver_failure, status, {
    let optimizer = Arc::new(ScriptedOptimizer::new(5, true, vec![(status, vec![])]));

    let result =
        create_test_builder(create_random_matrix(5, 10, true, 4)).with_optimizer(optimizer).build().unwrap().solve();

    assert!(matches!(result, Err(SolveError::Solver(_))));
}}

can_propagate_solver_failure! {
    case_01_infeasible: TerminationStatus::Infeasible,
    case_02_error: TerminationStatus::Error("license expired".to_string()),
    case_03_no_solutions: TerminationStatus::Optimal,
}

#[test]
fn can_reject_lazy_constraints_for_unsupported_optimizer() {
    let optimizer = Arc::new(ScriptedOptimizer::new(5, true, vec![]));

    let result = create_test_builder(create_random_matrix(5, 10, true, 5))
        .with_optimizer(optimizer)
        .with_lazy_constraints(true)
        .build()
        .unwrap()
        .solve();

    assert!(matches!(result, Err(SolveError::Configuration(_))));
}

#[test]
fn can_use_default_optimizer() {
    let matrix = create_random_matrix(4, 10, true, 6);

    set_default_optimizer(None);
    assert!(get_default_optimizer().is_none());
    assert!(matches!(get_optimal_tour(matrix.clone(), None), Err(SolveError::Configuration(_))));

    set_default_optimizer(Some(Arc::new(BranchAndBoundOptimizer::default())));
    let solution = get_optimal_tour(matrix.clone(), None);
    set_default_optimizer(None);

    assert_eq!(solution.unwrap().cost, brute_force_cost(&matrix));
}

#[test]
fn can_solve_from_cities() {
    let cities = vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.), (0.5, 0.5)];

    let solution =
        get_optimal_tour_from_cities(&cities, &euclidean_distance, Some(Arc::new(BranchAndBoundOptimizer::default())))
            .unwrap();

    assert_permutation(&solution.tour, 5);
    assert!((solution.cost - (3. + 2_f64.sqrt())).abs() < 1E-9);
}

#[test]
fn can_return_metrics_only_when_requested() {
    let matrix = create_random_matrix(4, 10, true, 8);

    let (_, metrics) = create_test_builder(matrix)
        .with_telemetry(TelemetryMode::None)
        .build()
        .unwrap()
        .solve()
        .unwrap();

    assert!(metrics.is_none());
}
