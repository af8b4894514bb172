use thiserror::Error;

/// Reasons a tableau (or the model it is built from) cannot be solved.
/// Always reported before the first pivot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedInput {
    #[error("tableau has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tableau needs an objective column, at least one variable column and a rhs column")]
    TooFewColumns,
    #[error("entry [{row}, {column}] is not a finite number")]
    NonFinite { row: usize, column: usize },
    #[error("constraint row {row} has a negative right-hand side")]
    NegativeRhs { row: usize },
    #[error("constraint row {row} has no basic variable")]
    NoBasicVariable { row: usize },
    #[error("expected {expected} coefficients, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("constraint {index} needs an artificial variable to form a starting basis")]
    UnsupportedConstraint { index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),
    #[error("problem is unbounded: column {column} has no positive entry in any constraint row")]
    Unbounded { column: usize },
    #[error("iteration limit exceeded after {iterations} pivots")]
    IterationLimitExceeded { iterations: usize },
    #[error("pivot entry {value:e} at [{row}, {column}] is too close to zero")]
    NumericInstability {
        row: usize,
        column: usize,
        value: f64,
    },
}
