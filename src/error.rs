//! Errors raised while evaluating conditions.
//!
//! Evaluation itself never fails: unrecognized conditions simply do not
//! match. The only failures come from user predicates, and they are never
//! folded into the boolean result.

use std::fmt;

use crate::function::PredicateFailure;
use crate::value::Value;

/// Fatal failure of a user predicate.
///
/// # Examples
///
/// ```rust
/// use condev::{evaluate, ConditionError, Context, Function, State, Value};
///
/// let sloppy = Function::condition(|_: &Context, _: &Value| Ok(Value::from("yes")));
///
/// match evaluate(&Value::from(1), &Value::from(sloppy), State::Unset) {
///     Err(ConditionError::InvalidPredicateResult { result, .. }) => {
///         assert_eq!(result, Value::from("yes"));
///     }
///     other => panic!("expected invalid result, got {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub enum ConditionError {
    /// The predicate returned something other than a boolean.
    InvalidPredicateResult {
        /// Declared name of the predicate, `None` when anonymous.
        predicate: Option<String>,
        /// The value it returned.
        result: Value,
    },
    /// The predicate itself failed.
    PredicateExecutionFailure {
        /// Declared name of the predicate, `None` when anonymous.
        predicate: Option<String>,
        /// The error the predicate returned.
        source: PredicateFailure,
    },
}

impl ConditionError {
    /// Create an invalid-result error.
    pub fn invalid_result(predicate: Option<&str>, result: Value) -> Self {
        Self::InvalidPredicateResult {
            predicate: predicate.map(String::from),
            result,
        }
    }

    /// Create an execution-failure error.
    pub fn execution_failure(predicate: Option<&str>, source: PredicateFailure) -> Self {
        Self::PredicateExecutionFailure {
            predicate: predicate.map(String::from),
            source,
        }
    }

    /// Returns true if the predicate returned a non-boolean.
    pub fn is_invalid_result(&self) -> bool {
        matches!(self, Self::InvalidPredicateResult { .. })
    }

    /// Returns true if the predicate failed while running.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, Self::PredicateExecutionFailure { .. })
    }

    /// The offending result, for invalid-result errors.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::InvalidPredicateResult { result, .. } => Some(result),
            Self::PredicateExecutionFailure { .. } => None,
        }
    }

    /// Declared name of the predicate involved.
    pub fn predicate_name(&self) -> Option<&str> {
        match self {
            Self::InvalidPredicateResult { predicate, .. }
            | Self::PredicateExecutionFailure { predicate, .. } => predicate.as_deref(),
        }
    }
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPredicateResult { result, .. } => {
                write!(f, "invalid condition result, {}", result)
            }
            Self::PredicateExecutionFailure { source, .. } => {
                write!(f, "cannot execute condition, {}", source)
            }
        }
    }
}

impl std::error::Error for ConditionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPredicateResult { .. } => None,
            Self::PredicateExecutionFailure { source, .. } => Some(&**source),
        }
    }
}
