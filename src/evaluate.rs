//! Condition evaluation
//!
//! [`evaluate`] decides whether an entity satisfies a condition. The kind of
//! the condition is never declared; it is inferred from the condition's
//! shape, one rule at a time, in a fixed order:
//!
//! | # | Rule | Decides when |
//! |---|------|--------------|
//! | 1 | any-of | condition is an array: true if any element matches |
//! | 2 | falsy-gate | state is not truthy and both sides are falsy: strict equality |
//! | 3 | reject-truthy | state is falsy and the entity is truthy: false |
//! | 4 | reject-falsy | state is truthy and the entity is falsy: false |
//! | 5 | shallow-equal | entity and condition are shallowly equal: true |
//! | 6 | regex | entity is a non-empty string and condition a regex: search |
//! | 7 | type-name | condition is a type name: `typeof` comparison |
//! | 8 | class-name | condition names a class in the entity's chain: true |
//! | 9 | function-name | condition is the entity function's name: true |
//! | 10 | predicate | condition is a function named `condition` or anonymous: call it |
//! | 11 | instance-of | condition is any other function: instance check |
//! | - | default | false |
//!
//! # Example
//!
//! ```rust
//! use condev::{evaluate, State, Value, STRING};
//!
//! let entity = Value::from("yeah");
//!
//! assert!(evaluate(&entity, &Value::from(STRING), State::Unset).unwrap());
//! assert!(evaluate(&entity, &Value::regex("eah").unwrap(), State::Unset).unwrap());
//! assert!(evaluate(&entity, &Value::array([Value::from(1), Value::from("yeah")]), State::Unset).unwrap());
//! assert!(!evaluate(&Value::Null, &Value::Undefined, State::Unset).unwrap());
//! ```

use crate::context::Context;
use crate::error::ConditionError;
use crate::function::Function;
use crate::primitives::{
    current_context, has_function_name, invoke_with_context, is_anonymous_function, is_falsy,
    is_instance_of, is_instance_of_named_class, is_one_of, is_truthy, matches_type_name,
    shallow_equal, PREDICATE_NAME,
};
use crate::type_name::TYPE_NAMES;
use crate::value::{Array, Value};

macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

/// Truthiness gate applied before shape-specific rules.
///
/// `Falsy` only lets falsy entities match, `Truthy` only truthy ones. `Unset`
/// applies no restriction beyond the falsy-equality shortcut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// No gate.
    #[default]
    Unset,
    /// Match falsy entities only.
    Falsy,
    /// Match truthy entities only.
    Truthy,
}

impl From<bool> for State {
    fn from(state: bool) -> Self {
        if state {
            State::Truthy
        } else {
            State::Falsy
        }
    }
}

impl From<Option<bool>> for State {
    fn from(state: Option<bool>) -> Self {
        state.map_or(State::Unset, State::from)
    }
}

/// Evaluate `condition` over `entity` in the global context.
///
/// Shorthand for `Evaluator::new().with_state(state).evaluate(entity, condition)`.
///
/// # Errors
///
/// Only user predicates can fail: see [`ConditionError`].
///
/// # Example
///
/// ```rust
/// use condev::{builtin, evaluate, State, Value, OBJECT};
///
/// // null classifies as an object, and state `false` admits falsy entities
/// assert!(evaluate(&Value::Null, &Value::from(OBJECT), false).unwrap());
///
/// // state `true` rejects falsy entities before anything else is checked
/// assert!(!evaluate(&Value::Null, &Value::from(OBJECT), true).unwrap());
///
/// assert!(evaluate(&Value::from(123), &Value::from(builtin::number()), State::Unset).unwrap());
/// ```
pub fn evaluate(
    entity: &Value,
    condition: &Value,
    state: impl Into<State>,
) -> Result<bool, ConditionError> {
    Evaluator::new().with_state(state).evaluate(entity, condition)
}

/// Reusable evaluation settings: the state gate and the bound context.
///
/// # Example
///
/// ```rust
/// use condev::{Context, Evaluator, Function, State, Value};
///
/// let evaluator = Evaluator::new()
///     .with_state(State::Truthy)
///     .with_context(Context::new(Value::from("caller")));
///
/// let from_caller = Function::arrow(|ctx: &Context, _: &Value| {
///     Ok(Value::from(ctx.this().as_str() == Some("caller")))
/// });
///
/// assert!(evaluator.evaluate(&Value::from(1), &Value::from(from_caller)).unwrap());
/// assert!(!evaluator.evaluate(&Value::Null, &Value::from(1)).unwrap());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    state: State,
    context: Option<Context>,
}

impl Evaluator {
    /// An evaluator with no state gate, bound to the global context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state gate.
    pub fn with_state(mut self, state: impl Into<State>) -> Self {
        self.state = state.into();
        self
    }

    /// Bind the context passed to user predicates.
    pub fn with_context(mut self, context: impl Into<Context>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The state gate.
    pub fn state(&self) -> State {
        self.state
    }

    /// The context user predicates will receive.
    pub fn context(&self) -> &Context {
        current_context(self.context.as_ref())
    }

    /// Evaluate `condition` over `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::InvalidPredicateResult`] when a user predicate
    /// returns a non-boolean, and [`ConditionError::PredicateExecutionFailure`]
    /// when it fails.
    pub fn evaluate(&self, entity: &Value, condition: &Value) -> Result<bool, ConditionError> {
        let evaluation = Evaluation {
            evaluator: self,
            entity,
            condition,
        };

        for rule in &RULES {
            if let Some(outcome) = (rule.apply)(&evaluation) {
                log_trace!(
                    rule = rule.name,
                    entity = %entity,
                    condition = %condition,
                    state = ?self.state,
                    matched = ?outcome.as_ref().ok(),
                    "condition decided"
                );
                return outcome;
            }
        }

        log_trace!(rule = "default", entity = %entity, condition = %condition, "condition decided");
        Ok(false)
    }
}

type Outcome = Option<Result<bool, ConditionError>>;

struct Rule {
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    name: &'static str,
    apply: fn(&Evaluation<'_>) -> Outcome,
}

const RULES: [Rule; 11] = [
    Rule {
        name: "any-of",
        apply: any_of,
    },
    Rule {
        name: "falsy-gate",
        apply: falsy_gate,
    },
    Rule {
        name: "reject-truthy",
        apply: reject_truthy,
    },
    Rule {
        name: "reject-falsy",
        apply: reject_falsy,
    },
    Rule {
        name: "shallow-equal",
        apply: shallow_equality,
    },
    Rule {
        name: "regex",
        apply: regex_search,
    },
    Rule {
        name: "type-name",
        apply: type_name,
    },
    Rule {
        name: "class-name",
        apply: class_name,
    },
    Rule {
        name: "function-name",
        apply: function_name,
    },
    Rule {
        name: "predicate",
        apply: predicate,
    },
    Rule {
        name: "instance-of",
        apply: instance_of,
    },
];

struct Evaluation<'a> {
    evaluator: &'a Evaluator,
    entity: &'a Value,
    condition: &'a Value,
}

impl Evaluation<'_> {
    fn state(&self) -> State {
        self.evaluator.state
    }

    fn any(&self, conditions: &Array) -> Result<bool, ConditionError> {
        for condition in conditions.iter() {
            if self.evaluator.evaluate(self.entity, condition)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn call(&self, function: &Function) -> Result<bool, ConditionError> {
        let name = function.name().filter(|n| !n.is_empty());
        match invoke_with_context(function, self.evaluator.context(), self.entity) {
            Ok(Value::Bool(result)) => Ok(result),
            Ok(other) => {
                log_debug!(predicate = ?name, result = %other, "condition returned a non-boolean");
                Err(ConditionError::invalid_result(name, other))
            }
            Err(source) => {
                log_debug!(predicate = ?name, error = %source, "condition failed");
                Err(ConditionError::execution_failure(name, source))
            }
        }
    }
}

fn any_of(e: &Evaluation<'_>) -> Outcome {
    let conditions = e.condition.as_array()?;
    Some(e.any(conditions))
}

fn falsy_gate(e: &Evaluation<'_>) -> Outcome {
    (e.state() != State::Truthy && is_falsy(e.entity) && is_falsy(e.condition))
        .then(|| Ok(e.entity.strict_equals(e.condition)))
}

fn reject_truthy(e: &Evaluation<'_>) -> Outcome {
    (e.state() == State::Falsy && is_truthy(e.entity)).then_some(Ok(false))
}

fn reject_falsy(e: &Evaluation<'_>) -> Outcome {
    (e.state() == State::Truthy && is_falsy(e.entity)).then_some(Ok(false))
}

fn shallow_equality(e: &Evaluation<'_>) -> Outcome {
    shallow_equal(e.entity, e.condition).then_some(Ok(true))
}

fn regex_search(e: &Evaluation<'_>) -> Outcome {
    let text = e.entity.as_str().filter(|s| !s.is_empty())?;
    let pattern = e.condition.as_regexp()?;
    Some(Ok(pattern.is_match(text)))
}

fn type_name(e: &Evaluation<'_>) -> Outcome {
    let name = e.condition.as_str()?;
    if !is_one_of(e.condition, &TYPE_NAMES) {
        return None;
    }
    let matched = matches_type_name(e.entity, name);
    match e.state() {
        State::Truthy => Some(Ok(matched && is_truthy(e.entity))),
        State::Unset | State::Falsy => Some(Ok(matched)),
    }
}

fn class_name(e: &Evaluation<'_>) -> Outcome {
    let name = e.condition.as_str()?;
    is_instance_of_named_class(e.entity, name).then_some(Ok(true))
}

fn function_name(e: &Evaluation<'_>) -> Outcome {
    let name = e.condition.as_str()?;
    has_function_name(e.entity, name).then_some(Ok(true))
}

fn predicate(e: &Evaluation<'_>) -> Outcome {
    let function = e.condition.as_function()?;
    if !(has_function_name(e.condition, PREDICATE_NAME) || is_anonymous_function(e.condition)) {
        return None;
    }
    Some(e.call(function))
}

fn instance_of(e: &Evaluation<'_>) -> Outcome {
    let class = e.condition.as_function()?;
    Some(Ok(is_instance_of(e.entity, class)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::type_name::{NUMBER, OBJECT, STRING, UNDEFINED};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn eval(entity: &Value, condition: &Value, state: impl Into<State>) -> bool {
        evaluate(entity, condition, state).expect("evaluation should not fail")
    }

    #[test]
    fn test_state_conversions() {
        assert_eq!(State::from(true), State::Truthy);
        assert_eq!(State::from(false), State::Falsy);
        assert_eq!(State::from(None::<bool>), State::Unset);
        assert_eq!(State::from(Some(true)), State::Truthy);
        assert_eq!(State::default(), State::Unset);
    }

    #[test]
    fn test_empty_array_never_matches() {
        for state in [State::Unset, State::Falsy, State::Truthy] {
            assert!(!eval(&Value::Null, &Value::array([]), state));
            assert!(!eval(&Value::from(1), &Value::array([]), state));
        }
    }

    #[test]
    fn test_array_short_circuits_on_first_match() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting = Function::condition(move |_: &Context, _: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from(false))
        });

        let condition = Value::array([Value::from(STRING), Value::from(counting)]);
        assert!(eval(&Value::from("hit"), &condition, State::Unset));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(!eval(&Value::from(5), &condition, State::Unset));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_array_propagates_errors() {
        let broken = Function::arrow(|_: &Context, _: &Value| Err("nope".into()));
        let condition = Value::array([Value::from(NUMBER), Value::from(broken)]);
        let err = evaluate(&Value::from("text"), &condition, State::Unset).unwrap_err();
        assert!(err.is_execution_failure());
    }

    #[test]
    fn test_nested_arrays_recurse() {
        let condition = Value::array([Value::array([Value::from(NUMBER)])]);
        assert!(eval(&Value::from(3), &condition, State::Unset));
    }

    #[test]
    fn test_falsy_gate_uses_strict_equality() {
        assert!(!eval(&Value::Null, &Value::Undefined, State::Unset));
        assert!(!eval(&Value::Null, &Value::Undefined, State::Falsy));
        assert!(eval(&Value::Null, &Value::Null, State::Unset));
        assert!(eval(&Value::Undefined, &Value::Undefined, State::Falsy));
        assert!(!eval(&Value::from(""), &Value::from(false), State::Unset));
        assert!(!eval(&Value::from(f64::NAN), &Value::from(f64::NAN), State::Unset));
    }

    #[test]
    fn test_falsy_gate_returns_before_type_names() {
        // "" is falsy, so the type name rule is never reached
        assert!(!eval(&Value::Undefined, &Value::from(""), State::Unset));
        assert!(eval(&Value::Undefined, &Value::from(UNDEFINED), State::Unset));
    }

    #[test]
    fn test_state_false_rejects_truthy_entities() {
        assert!(!eval(&Value::from("yeah"), &Value::from("yeah"), State::Falsy));
        assert!(!eval(&Value::from(0), &Value::from(0), State::Falsy));
        assert!(eval(&Value::Null, &Value::from(OBJECT), State::Falsy));
    }

    #[test]
    fn test_state_true_rejects_falsy_entities() {
        assert!(!eval(&Value::Null, &Value::Null, State::Truthy));
        assert!(!eval(&Value::from(""), &Value::from(STRING), State::Truthy));
        assert!(eval(&Value::from(0), &Value::from(0), State::Truthy));
    }

    #[test]
    fn test_shallow_equal_arrays_as_entities() {
        let entity = Value::array([Value::from(1)]);
        // array conditions are always combinators, never compared as a whole
        assert!(!eval(&entity, &Value::array([]), State::Unset));
        assert!(eval(&entity, &Value::from(OBJECT), State::Unset));
    }

    #[test]
    fn test_regex_requires_non_empty_string() {
        let re = Value::regex("eah").unwrap();
        assert!(eval(&Value::from("yeah"), &re, State::Unset));
        assert!(!eval(&Value::from("nope"), &re, State::Unset));
        assert!(!eval(&Value::from(""), &re, State::Unset));
        assert!(!eval(&Value::from(123), &Value::regex("1").unwrap(), State::Unset));
    }

    #[test]
    fn test_regex_is_unanchored() {
        let re = Value::regex("^y").unwrap();
        assert!(eval(&Value::from("yeah"), &re, State::Unset));
        assert!(eval(&Value::from("a yeah b"), &Value::regex("yeah").unwrap(), State::Unset));
    }

    #[test]
    fn test_type_names() {
        assert!(eval(&Value::from("x"), &Value::from(STRING), State::Unset));
        assert!(!eval(&Value::from(123), &Value::from(STRING), State::Unset));
        assert!(eval(&Value::from(true), &Value::from("boolean"), State::Unset));
        assert!(eval(&Value::symbol("s"), &Value::from("symbol"), State::Unset));
        assert!(eval(
            &Value::from(Function::anonymous()),
            &Value::from("function"),
            State::Unset
        ));
    }

    #[test]
    fn test_type_name_with_truthy_state() {
        assert!(eval(&Value::from(0), &Value::from(NUMBER), State::Truthy));
        assert!(!eval(&Value::from(f64::NAN), &Value::from(NUMBER), State::Truthy));
        assert!(eval(&Value::from(f64::NAN), &Value::from(NUMBER), State::Unset));
    }

    #[test]
    fn test_class_names() {
        assert!(eval(&Value::array([]), &Value::from("Array"), State::Unset));
        assert!(eval(&Value::from("s"), &Value::from("String"), State::Unset));
        assert!(eval(&Value::object::<&str>([]), &Value::from("Object"), State::Unset));
        assert!(!eval(&Value::object::<&str>([]), &Value::from("Array"), State::Unset));

        let base = Function::class("Base");
        let derived = Function::extends("Derived", &base);
        let item = Value::instance(&derived, [("id", Value::from(1))]);
        assert!(eval(&item, &Value::from("Base"), State::Unset));
        assert!(eval(&item, &Value::from("Derived"), State::Truthy));
        assert!(!eval(&item, &Value::from("Other"), State::Unset));
    }

    #[test]
    fn test_function_names() {
        assert!(eval(
            &Value::from(Function::named("constructor")),
            &Value::from("constructor"),
            State::Unset
        ));
        assert!(eval(&Value::from(builtin::array()), &Value::from("Array"), State::Unset));
        assert!(!eval(
            &Value::from(Function::named("hello")),
            &Value::from("goodbye"),
            State::Unset
        ));
    }

    #[test]
    fn test_named_predicate_is_invoked() {
        let is_yeah = Function::condition(|_: &Context, v: &Value| {
            Ok(Value::from(v.as_str() == Some("yeah")))
        });
        assert!(eval(&Value::from("yeah"), &Value::from(is_yeah.clone()), State::Unset));
        assert!(!eval(&Value::from("nah"), &Value::from(is_yeah), State::Unset));
    }

    #[test]
    fn test_other_named_functions_are_not_invoked() {
        let hello = Function::declare("hello", |_: &Context, _: &Value| {
            panic!("hello must not be called")
        });
        assert!(!eval(&Value::from("yeah"), &Value::from(hello), State::Unset));
    }

    #[test]
    fn test_predicate_receives_bound_context() {
        let check = Function::arrow(|ctx: &Context, v: &Value| {
            let limit = ctx.this().get("limit").and_then(Value::as_f64).unwrap_or(0.0);
            Ok(Value::from(v.as_f64().is_some_and(|n| n < limit)))
        });
        let evaluator =
            Evaluator::new().with_context(Value::object([("limit", Value::from(10))]));

        assert!(evaluator.evaluate(&Value::from(3), &Value::from(check.clone())).unwrap());
        assert!(!evaluator.evaluate(&Value::from(30), &Value::from(check.clone())).unwrap());

        // the global context has no limit
        assert!(!eval(&Value::from(3), &Value::from(check), State::Unset));
    }

    #[test]
    fn test_context_reaches_predicates_inside_arrays() {
        let check = Function::arrow(|ctx: &Context, _: &Value| Ok(Value::from(ctx.this().is_string())));
        let evaluator = Evaluator::new().with_context(Value::from("bound"));
        let condition = Value::array([Value::from(NUMBER), Value::from(check)]);
        assert!(evaluator.evaluate(&Value::from("x"), &condition).unwrap());
    }

    #[test]
    fn test_non_boolean_result_is_fatal() {
        let sloppy = Function::condition(|_: &Context, _: &Value| Ok(Value::from("yes")));
        let err = evaluate(&Value::from(1), &Value::from(sloppy), State::Unset).unwrap_err();
        assert!(err.is_invalid_result());
        assert_eq!(err.result(), Some(&Value::from("yes")));
        assert_eq!(err.predicate_name(), Some("condition"));
        assert!(err.to_string().contains("yes"));
    }

    #[test]
    fn test_empty_body_predicate_returns_undefined() {
        let err = evaluate(&Value::from(1), &Value::from(Function::anonymous()), State::Unset)
            .unwrap_err();
        assert_eq!(err.result(), Some(&Value::Undefined));
        assert_eq!(err.predicate_name(), None);
    }

    #[test]
    fn test_failing_predicate_is_wrapped() {
        let failing = Function::condition(|_: &Context, _: &Value| Err("database is down".into()));
        let err = evaluate(&Value::from(1), &Value::from(failing), State::Unset).unwrap_err();
        assert!(err.is_execution_failure());
        assert!(err.to_string().contains("database is down"));
        let source = std::error::Error::source(&err).expect("source kept");
        assert_eq!(source.to_string(), "database is down");
    }

    #[test]
    fn test_gates_apply_before_predicates() {
        let always = Function::condition(|_: &Context, _: &Value| Ok(Value::from(true)));
        assert!(!eval(&Value::from("x"), &Value::from(always.clone()), State::Falsy));
        assert!(!eval(&Value::Null, &Value::from(always.clone()), State::Truthy));
        assert!(eval(&Value::Null, &Value::from(always), State::Falsy));
    }

    #[test]
    fn test_instance_of_classes() {
        assert!(eval(&Value::array([]), &Value::from(builtin::array()), State::Unset));
        assert!(eval(&Value::object::<&str>([]), &Value::from(builtin::object()), State::Unset));
        assert!(eval(&Value::from(true), &Value::from(builtin::boolean()), State::Unset));
        assert!(!eval(&Value::from("s"), &Value::from(builtin::number()), State::Unset));

        let shape = Function::class("Shape");
        let circle = Function::extends("Circle", &shape);
        let c = Value::instance(&circle, [("r", Value::from(1))]);
        assert!(eval(&c, &Value::from(shape.clone()), State::Unset));
        assert!(!eval(&Value::instance(&shape, [("r", Value::from(1))]), &Value::from(circle), State::Unset));
    }

    #[test]
    fn test_unrecognized_conditions_do_not_match() {
        assert!(!eval(&Value::from(1), &Value::object::<&str>([]), State::Unset));
        assert!(!eval(&Value::from(1), &Value::symbol("s"), State::Unset));
        assert!(!eval(&Value::from("abc"), &Value::from("Nope"), State::Unset));
        assert!(!eval(&Value::from(0), &Value::from("0"), State::Falsy));
    }

    #[test]
    fn test_evaluator_accessors() {
        let evaluator = Evaluator::new().with_state(true);
        assert_eq!(evaluator.state(), State::Truthy);
        assert!(evaluator.context().this().is_object());
    }
}
