#[cfg(test)]
#[path = "../../tests/unit/milp/model_test.rs"]
mod model_test;

use crate::utils::{Float, InfoLogger};

/// A handle to a decision variable of the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(usize);

impl Variable {
    /// Creates a new variable handle.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns an index of the variable in order of creation.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Specifies a relation between left and right side of a linear constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    /// Left side is less or equal to right side.
    LessOrEqual,
    /// Left side is greater or equal to right side.
    GreaterOrEqual,
    /// Left side is equal to right side.
    Equal,
}

/// A linear expression: a list of weighted keys.
pub type LinearExpr<K = Variable> = Vec<(K, Float)>;

/// A linear constraint `sum(coefficient * key) <sense> rhs` over some key type: a solver variable or
/// an assignment matrix entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint<K = Variable> {
    /// Weighted terms of the left side.
    pub terms: LinearExpr<K>,
    /// Constraint sense.
    pub sense: Sense,
    /// Right hand side constant.
    pub rhs: Float,
}

impl<K> LinearConstraint<K> {
    /// Creates a new instance of `LinearConstraint`.
    pub fn new(terms: LinearExpr<K>, sense: Sense, rhs: Float) -> Self {
        Self { terms, sense, rhs }
    }

    /// Evaluates left side using given key values.
    pub fn evaluate<F>(&self, value_fn: F) -> Float
    where
        F: Fn(&K) -> Float,
    {
        self.terms.iter().map(|(key, coefficient)| coefficient * value_fn(key)).sum()
    }

    /// Checks whether the constraint is violated by more than given tolerance.
    pub fn is_violated<F>(&self, value_fn: F, tolerance: Float) -> bool
    where
        F: Fn(&K) -> Float,
    {
        let lhs = self.evaluate(value_fn);

        match self.sense {
            Sense::LessOrEqual => lhs > self.rhs + tolerance,
            Sense::GreaterOrEqual => lhs < self.rhs - tolerance,
            Sense::Equal => (lhs - self.rhs).abs() > tolerance,
        }
    }
}

/// Reports how an optimization call has finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminationStatus {
    /// A proven optimal solution is found.
    Optimal,
    /// A feasible solution is found, but its optimality is not proven (e.g. time limit is reached).
    FeasibleNotProvenOptimal,
    /// Model has no feasible solution.
    Infeasible,
    /// Optimizer has failed.
    Error(String),
}

impl TerminationStatus {
    /// Returns true if at least one feasible solution is available.
    pub fn has_solution(&self) -> bool {
        matches!(self, TerminationStatus::Optimal | TerminationStatus::FeasibleNotProvenOptimal)
    }
}

/// Specifies settings used to create a model.
#[derive(Clone)]
pub struct ModelSettings {
    /// Suppresses optimizer's own log output.
    pub silent: bool,
    /// Time limit in seconds for a single optimization call.
    pub time_limit: Option<Float>,
    /// Max amount of equally good solutions to keep.
    pub solution_pool_size: usize,
    /// A logger used for optimizer output.
    pub logger: Option<InfoLogger>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self { silent: true, time_limit: None, solution_pool_size: 1, logger: None }
    }
}

/// A context passed to a lazy callback for every integral candidate found during search.
pub struct LazyContext<'a> {
    values: &'a [Float],
    submitted: Vec<LinearConstraint>,
}

impl<'a> LazyContext<'a> {
    /// Creates a new instance of `LazyContext`.
    pub fn new(values: &'a [Float]) -> Self {
        Self { values, submitted: vec![] }
    }

    /// Returns candidate values indexed by variable index.
    pub fn values(&self) -> &[Float] {
        self.values
    }

    /// Submits a constraint into the live search.
    pub fn submit(&mut self, constraint: LinearConstraint) {
        self.submitted.push(constraint);
    }

    /// Returns constraints submitted so far.
    pub fn into_submitted(self) -> Vec<LinearConstraint> {
        self.submitted
    }
}

/// A callback invoked on integral candidates during optimizer's search.
pub type LazyCallback = Box<dyn FnMut(&mut LazyContext<'_>) + Send>;

/// Represents an optimization model with binary variables, linear objective and constraints.
pub trait MilpModel {
    /// Adds a new binary variable.
    fn add_binary_variable(&mut self) -> Variable;

    /// Sets a minimization objective.
    fn set_objective(&mut self, objective: LinearExpr);

    /// Adds a constraint which stays in the model until it is dropped.
    fn add_constraint(&mut self, constraint: LinearConstraint);

    /// Sets a start value hint for the variable.
    fn set_start_value(&mut self, variable: Variable, value: Float);

    /// Runs optimization.
    fn optimize(&mut self) -> TerminationStatus;

    /// Returns feasible solutions found by the last optimization, best first. Each solution is a list
    /// of values indexed by variable index.
    fn feasible_solutions(&self) -> Vec<Vec<Float>>;

    /// Returns objective value of the best solution.
    fn objective_value(&self) -> Option<Float>;

    /// Returns true if the model can invoke lazy callbacks.
    fn supports_lazy_constraints(&self) -> bool {
        false
    }

    /// Registers a lazy callback. Returns false if the capability is not supported.
    fn register_lazy_callback(&mut self, _callback: LazyCallback) -> bool {
        false
    }
}

/// Creates models of a specific optimizer.
pub trait OptimizerFactory: Send + Sync {
    /// Returns optimizer name.
    fn name(&self) -> &str;

    /// Creates a new empty model.
    fn create_model(&self, settings: &ModelSettings) -> Box<dyn MilpModel>;
}
