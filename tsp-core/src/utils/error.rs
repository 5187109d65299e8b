#[cfg(test)]
#[path = "../../tests/unit/utils/error_test.rs"]
mod error_test;

use std::hash::{Hash, Hasher};

/// A basic error type which, essentially, a wrapper on String type.
#[derive(Clone, Debug)]
pub struct GenericError(String);

/// A type alias for result type with `GenericError`.
pub type GenericResult<T> = Result<T, GenericError>;

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl<'a> From<&'a str> for GenericError {
    fn from(value: &'a str) -> Self {
        Self(value.to_string())
    }
}

impl From<std::io::Error> for GenericError {
    fn from(value: std::io::Error) -> Self {
        Self(value.to_string())
    }
}

impl From<SolveError> for GenericError {
    fn from(value: SolveError) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<Self> for GenericError {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for GenericError {}

impl Hash for GenericError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Specifies why a solve call has failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// No optimizer is available or options are contradictory.
    Configuration(String),
    /// Cost matrix is not square or contains invalid values.
    Shape(String),
    /// The optimizer failed or reported that the model has no solution.
    Solver(String),
    /// The constraint generation loop cannot make progress: this is a defect rather than a data problem.
    InvariantViolation(String),
}

/// A type alias for result type with `SolveError`.
pub type SolveResult<T> = Result<T, SolveError>;

impl SolveError {
    /// Returns true if the error indicates a broken algorithm invariant.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SolveError::InvariantViolation(_))
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            SolveError::Shape(msg) => write!(f, "shape error: {msg}"),
            SolveError::Solver(msg) => write!(f, "solver error: {msg}"),
            SolveError::InvariantViolation(msg) => write!(f, "algorithm invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for SolveError {}
