// Error handling for the glispy runtime

use crate::ast::Symbol;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Runtime errors that can occur while evaluating an expression.
///
/// The first error short-circuits evaluation. Bindings written by forms that
/// completed before the failure stay in place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("Unbound symbol: {0}")]
    UnboundSymbol(Symbol),

    #[error("Expected function, got {actual}")]
    ExpectedFunction { actual: String },

    #[error("Type error in {operation}: expected number, got {actual}")]
    ExpectedNumber { actual: String, operation: String },

    #[error("Type error in {operation}: expected symbol, got {actual}")]
    ExpectedSymbol { actual: String, operation: String },

    #[error("Type error in {operation}: expected string, got {actual}")]
    ExpectedString { actual: String, operation: String },

    #[error("Type error in {operation}: expected host value, got {actual}")]
    ExpectedHostValue { actual: String, operation: String },

    #[error("Arity mismatch in {function}: expected {expected}, got {actual}")]
    ArityMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Field not found: {record} has no field '{field}'")]
    FieldNotFound { field: String, record: String },

    #[error("Type mismatch for '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Stack overflow: call depth exceeded {limit}")]
    StackOverflow { limit: usize },
}

impl RuntimeError {
    pub fn expected_number(actual: &str, operation: &str) -> Self {
        RuntimeError::ExpectedNumber {
            actual: actual.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn arity(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        RuntimeError::ArityMismatch {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }
}
