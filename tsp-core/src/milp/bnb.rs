//! A reference optimizer: depth-first branch and bound over LP relaxations solved by `microlp`.

#[cfg(test)]
#[path = "../../tests/unit/milp/bnb_test.rs"]
mod bnb_test;

use super::*;
use crate::utils::{Float, INTEGRALITY_TOLERANCE, Timer, compare_floats, is_integral};
use microlp::{ComparisonOp, OptimizationDirection, Problem, Solution};

/// A tolerance used to compare objective values.
const OBJECTIVE_TOLERANCE: Float = 1E-6;

/// A tolerance used to check constraint satisfaction of a start point.
const FEASIBILITY_TOLERANCE: Float = 1E-6;

/// How often search progress is logged.
const LOG_NODE_FREQUENCY: usize = 1000;

/// Creates models solved with depth-first branch and bound over LP relaxations.
#[derive(Clone, Debug, Default)]
pub struct BranchAndBoundOptimizer {}

impl OptimizerFactory for BranchAndBoundOptimizer {
    fn name(&self) -> &str {
        "branch-and-bound"
    }

    fn create_model(&self, settings: &ModelSettings) -> Box<dyn MilpModel> {
        Box::new(BranchAndBoundModel::new(settings.clone()))
    }
}

/// A model which keeps its variables and constraints and rebuilds LP relaxation on every
/// optimization call.
pub struct BranchAndBoundModel {
    settings: ModelSettings,
    objective: Vec<Float>,
    start_values: Vec<Option<Float>>,
    constraints: Vec<LinearConstraint>,
    lazy_callback: Option<LazyCallback>,
    solutions: Vec<Vec<Float>>,
    objective_value: Option<Float>,
}

impl BranchAndBoundModel {
    /// Creates a new instance of `BranchAndBoundModel`.
    pub fn new(settings: ModelSettings) -> Self {
        Self {
            settings,
            objective: vec![],
            start_values: vec![],
            constraints: vec![],
            lazy_callback: None,
            solutions: vec![],
            objective_value: None,
        }
    }

    /// Returns amount of constraints in the model including lazy constraints from previous runs.
    pub fn constraints_count(&self) -> usize {
        self.constraints.len()
    }

    fn log(&self, message: &str) {
        if let (false, Some(logger)) = (self.settings.silent, self.settings.logger.as_ref()) {
            (logger)(message)
        }
    }
}

impl MilpModel for BranchAndBoundModel {
    fn add_binary_variable(&mut self) -> Variable {
        self.objective.push(0.);
        self.start_values.push(None);

        Variable::new(self.objective.len() - 1)
    }

    fn set_objective(&mut self, objective: LinearExpr) {
        self.objective.iter_mut().for_each(|coefficient| *coefficient = 0.);
        objective.into_iter().for_each(|(variable, coefficient)| self.objective[variable.index()] += coefficient);
    }

    fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    fn set_start_value(&mut self, variable: Variable, value: Float) {
        self.start_values[variable.index()] = Some(value);
    }

    fn optimize(&mut self) -> TerminationStatus {
        self.solutions.clear();
        self.objective_value = None;

        let mut lazy_callback = self.lazy_callback.take();
        let (status, pool, cuts, nodes) = {
            let mut search = Search::new(self, lazy_callback.as_mut());
            let status = search.run();

            (status, search.pool, search.cuts, search.nodes)
        };
        self.lazy_callback = lazy_callback;

        self.log(&format!("branch and bound finished: {nodes} nodes, {} lazy cuts, status: {status:?}", cuts.len()));

        // lazy constraints are global and stay for next optimization calls
        self.constraints.extend(cuts);

        if status.has_solution() {
            self.objective_value = pool.first().map(|(value, _)| *value);
            self.solutions = pool.into_iter().map(|(_, values)| values).collect();
        }

        status
    }

    fn feasible_solutions(&self) -> Vec<Vec<Float>> {
        self.solutions.clone()
    }

    fn objective_value(&self) -> Option<Float> {
        self.objective_value
    }

    fn supports_lazy_constraints(&self) -> bool {
        true
    }

    fn register_lazy_callback(&mut self, callback: LazyCallback) -> bool {
        self.lazy_callback = Some(callback);
        true
    }
}

struct Node {
    solution: Solution,
    fix: Option<(usize, Float)>,
    applied_cuts: usize,
}

/// Keeps state of a single branch and bound run.
struct Search<'a> {
    model: &'a BranchAndBoundModel,
    lazy_callback: Option<&'a mut LazyCallback>,
    variables: Vec<microlp::Variable>,
    pool: Vec<(Float, Vec<Float>)>,
    cuts: Vec<LinearConstraint>,
    nodes: usize,
}

enum NodeOutcome {
    Pruned,
    Integral(Vec<Float>),
    Fractional(Solution, usize),
}

impl<'a> Search<'a> {
    fn new(model: &'a BranchAndBoundModel, lazy_callback: Option<&'a mut LazyCallback>) -> Self {
        Self { model, lazy_callback, variables: vec![], pool: vec![], cuts: vec![], nodes: 0 }
    }

    fn run(&mut self) -> TerminationStatus {
        let timer = Timer::start();

        let root = match self.create_relaxation().solve() {
            Ok(root) => root,
            Err(microlp::Error::Infeasible) => return TerminationStatus::Infeasible,
            Err(err) => return TerminationStatus::Error(err.to_string()),
        };

        self.try_start_point();

        let mut stack = vec![Node { solution: root, fix: None, applied_cuts: 0 }];

        while let Some(node) = stack.pop() {
            if let Some(time_limit) = self.model.settings.time_limit {
                if timer.elapsed_secs_as_float() > time_limit {
                    self.model.log(&format!("time limit of {time_limit}s is reached after {} nodes", self.nodes));
                    return if self.pool.is_empty() {
                        TerminationStatus::Error("time limit is reached without feasible solution".to_string())
                    } else {
                        TerminationStatus::FeasibleNotProvenOptimal
                    };
                }
            }

            self.nodes += 1;
            if self.nodes % LOG_NODE_FREQUENCY == 0 {
                self.model.log(&format!(
                    "[{}s] nodes: {}, open: {}, incumbent: {:?}",
                    timer.elapsed_secs(),
                    self.nodes,
                    stack.len(),
                    self.pool.first().map(|(value, _)| *value)
                ));
            }

            match self.process_node(node) {
                Ok(NodeOutcome::Pruned) => {}
                Ok(NodeOutcome::Integral(values)) => self.add_incumbent(values),
                Ok(NodeOutcome::Fractional(solution, variable)) => {
                    let applied_cuts = self.cuts.len();
                    // one branch is explored first
                    stack.push(Node { solution: solution.clone(), fix: Some((variable, 0.)), applied_cuts });
                    stack.push(Node { solution, fix: Some((variable, 1.)), applied_cuts });
                }
                Err(status) => return status,
            }
        }

        if self.pool.is_empty() { TerminationStatus::Infeasible } else { TerminationStatus::Optimal }
    }

    fn process_node(&mut self, node: Node) -> Result<NodeOutcome, TerminationStatus> {
        let Node { mut solution, fix, applied_cuts } = node;

        solution = match self.apply_cuts(solution, applied_cuts)? {
            Some(solution) => solution,
            None => return Ok(NodeOutcome::Pruned),
        };

        if let Some((variable, value)) = fix {
            solution = match solution.fix_var(self.variables[variable], value) {
                Ok(solution) => solution,
                Err(microlp::Error::Infeasible) => return Ok(NodeOutcome::Pruned),
                Err(err) => return Err(TerminationStatus::Error(err.to_string())),
            };
        }

        loop {
            if self.can_prune(solution.objective()) {
                return Ok(NodeOutcome::Pruned);
            }

            if let Some(variable) = self.select_branching_variable(&solution) {
                return Ok(NodeOutcome::Fractional(solution, variable));
            }

            let values = self.get_values(&solution);
            let submitted = self.call_lazy_callback(&values);

            if submitted.is_empty() {
                return Ok(NodeOutcome::Integral(values));
            }

            // candidate is rejected: cuts are applied to the current node and, later, to every open node
            let first_cut = self.cuts.len();
            self.cuts.extend(submitted);

            solution = match self.apply_cuts(solution, first_cut)? {
                Some(solution) => solution,
                None => return Ok(NodeOutcome::Pruned),
            };
        }
    }

    fn create_relaxation(&mut self) -> Problem {
        let mut problem = Problem::new(OptimizationDirection::Minimize);

        self.variables =
            self.model.objective.iter().map(|&coefficient| problem.add_var(coefficient, (0., 1.))).collect();

        self.model.constraints.iter().for_each(|constraint| {
            problem.add_constraint(self.to_lp_terms(constraint), to_comparison_op(constraint.sense), constraint.rhs);
        });

        problem
    }

    /// Applies cuts collected since `first_cut`, returns `None` when the node becomes infeasible.
    fn apply_cuts(&self, mut solution: Solution, first_cut: usize) -> Result<Option<Solution>, TerminationStatus> {
        for cut in &self.cuts[first_cut..] {
            solution = match self.add_cut(solution, cut)? {
                Some(solution) => solution,
                None => return Ok(None),
            };
        }

        Ok(Some(solution))
    }

    fn add_cut(&self, solution: Solution, cut: &LinearConstraint) -> Result<Option<Solution>, TerminationStatus> {
        match solution.add_constraint(self.to_lp_terms(cut), to_comparison_op(cut.sense), cut.rhs) {
            Ok(solution) => Ok(Some(solution)),
            Err(microlp::Error::Infeasible) => Ok(None),
            Err(err) => Err(TerminationStatus::Error(err.to_string())),
        }
    }

    fn try_start_point(&mut self) {
        if self.model.start_values.iter().all(|value| value.is_none()) {
            return;
        }

        let values = self.model.start_values.iter().map(|value| value.unwrap_or(0.).round()).collect::<Vec<_>>();
        let is_feasible = self
            .model
            .constraints
            .iter()
            .all(|constraint| !constraint.is_violated(|variable| values[variable.index()], FEASIBILITY_TOLERANCE));

        if !is_feasible {
            self.model.log("start values are ignored as they violate model constraints");
            return;
        }

        let submitted = self.call_lazy_callback(&values);
        if submitted.is_empty() {
            self.add_incumbent(values);
        } else {
            self.cuts.extend(submitted);
        }
    }

    fn call_lazy_callback(&mut self, values: &[Float]) -> Vec<LinearConstraint> {
        match self.lazy_callback.as_mut() {
            Some(callback) => {
                let mut context = LazyContext::new(values);
                (callback)(&mut context);

                context.into_submitted()
            }
            None => vec![],
        }
    }

    fn select_branching_variable(&self, solution: &Solution) -> Option<usize> {
        self.variables
            .iter()
            .enumerate()
            .map(|(idx, &variable)| (idx, solution[variable]))
            .filter(|(_, value)| !is_integral(*value, INTEGRALITY_TOLERANCE))
            .min_by(|(_, a), (_, b)| compare_floats((a - 0.5).abs(), (b - 0.5).abs()))
            .map(|(idx, _)| idx)
    }

    fn can_prune(&self, bound: Float) -> bool {
        match self.pool.first() {
            Some((best, _)) => {
                let tolerance = OBJECTIVE_TOLERANCE * best.abs().max(1.);
                let is_pool_full = self.pool.len() >= self.model.settings.solution_pool_size.max(1);

                bound > best + tolerance || (is_pool_full && bound >= best - tolerance)
            }
            None => false,
        }
    }

    fn add_incumbent(&mut self, values: Vec<Float>) {
        let value = self.model.objective.iter().zip(values.iter()).map(|(c, x)| c * x).sum::<Float>();

        match self.pool.first() {
            Some((best, _)) if value < best - OBJECTIVE_TOLERANCE * best.abs().max(1.) => {
                self.model.log(&format!("new incumbent: {value} (was {best}) at node {}", self.nodes));
                self.pool = vec![(value, values)];
            }
            Some((best, _)) if value <= best + OBJECTIVE_TOLERANCE * best.abs().max(1.) => {
                let is_known = self.pool.iter().any(|(_, other)| *other == values);
                if !is_known && self.pool.len() < self.model.settings.solution_pool_size {
                    self.pool.push((value, values));
                }
            }
            Some(_) => {}
            None => {
                self.model.log(&format!("first incumbent: {value} at node {}", self.nodes));
                self.pool.push((value, values));
            }
        }
    }

    fn get_values(&self, solution: &Solution) -> Vec<Float> {
        self.variables.iter().map(|&variable| solution[variable].round()).collect()
    }

    fn to_lp_terms(&self, constraint: &LinearConstraint) -> Vec<(microlp::Variable, Float)> {
        constraint
            .terms
            .iter()
            .map(|(variable, coefficient)| (self.variables[variable.index()], *coefficient))
            .collect()
    }
}

fn to_comparison_op(sense: Sense) -> ComparisonOp {
    match sense {
        Sense::LessOrEqual => ComparisonOp::Le,
        Sense::GreaterOrEqual => ComparisonOp::Ge,
        Sense::Equal => ComparisonOp::Eq,
    }
}
