// SPDX-License-Identifier: MIT

//! Typed error handling for route-logic
//!
//! Every failure in the crate is a value. Parsing, casting, evaluation and
//! inference each have their own error type so callers can tell a malformed
//! condition apart from inconsistent tracker data.

use thiserror::Error;

use crate::condition::VariableKind;
use crate::tracker::Stat;

/// Top-level error type for route-logic
#[derive(Debug, Error)]
pub enum RouteError {
    /// Malformed condition text
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A declared variable could not be cast to its declared kind
    #[error(transparent)]
    Cast(#[from] TypeCastError),

    /// Evaluation failures (unbound variables, type mismatches)
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Observations that no IV/nature combination can explain
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Tracker lookup failed
    #[error("No IV table with the name {0} exists.")]
    UnknownTracker(String),

    /// Configuration errors (missing arguments, bad route files)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// A condition string that could not be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    /// Byte offset into the source text
    pub position: usize,
    pub message: String,
}

/// Raw variable text incompatible with its declared kind
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot cast '{raw}' to {kind}{}", variable_suffix(.name))]
pub struct TypeCastError {
    pub kind: VariableKind,
    pub raw: String,
    /// Set when the failing value belongs to a named declaration
    pub name: Option<String>,
}

/// Expression evaluation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// Variable referenced by the condition is not declared
    #[error("variable '{0}' is not defined")]
    UnboundVariable(String),

    /// Operand kinds are incompatible with the operator
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The condition produced a value that is not a boolean
    #[error("condition must evaluate to a boolean, got {0}")]
    NotBoolean(String),
}

/// Observation data that no IV/nature combination can reproduce
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The IV candidates for a stat became empty
    #[error("no IV for {stat} is consistent with every observation")]
    EmptyRange { stat: Stat },

    /// Every nature was ruled out
    #[error("no nature is consistent with every observation")]
    NoCandidateNatures,

    /// An observation refers to an evolution stage with no base stats
    #[error("no base stats recorded for evolution stage {evolution}")]
    MissingBaseStats { evolution: usize },
}

fn variable_suffix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" for variable '{}'", name),
        None => String::new(),
    }
}

impl SyntaxError {
    /// Create a syntax error at a byte offset
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl TypeCastError {
    /// Create a cast error for an anonymous value
    pub fn new(kind: VariableKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            name: None,
        }
    }

    /// Attach the name of the declaration that failed
    pub fn for_variable(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl EvalError {
    /// Create a type mismatch error
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch(message.into())
    }
}

impl RouteError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new(7, "expected an operand");
        assert_eq!(err.to_string(), "expected an operand at position 7");
    }

    #[test]
    fn test_cast_error_display() {
        let err = TypeCastError::new(VariableKind::Number, "abc");
        assert_eq!(err.to_string(), "cannot cast 'abc' to number");

        let err = err.for_variable("badges");
        assert_eq!(
            err.to_string(),
            "cannot cast 'abc' to number for variable 'badges'"
        );
    }

    #[test]
    fn test_route_error_from_inner() {
        let err: RouteError = EvalError::UnboundVariable("x".to_string()).into();
        assert!(matches!(err, RouteError::Eval(EvalError::UnboundVariable(_))));
        assert_eq!(err.to_string(), "variable 'x' is not defined");

        let err: RouteError = InferenceError::EmptyRange { stat: Stat::Hp }.into();
        assert_eq!(
            err.to_string(),
            "no IV for HP is consistent with every observation"
        );
    }

    #[test]
    fn test_unknown_tracker_message() {
        let err = RouteError::UnknownTracker("Mudkip".to_string());
        assert_eq!(err.to_string(), "No IV table with the name Mudkip exists.");
    }
}
