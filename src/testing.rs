//! Testing utilities for code that evaluates conditions
//!
//! Assertion macros that report the entity, condition and state on failure,
//! plus property-based testing support behind the `proptest` feature.
//!
//! # Examples
//!
//! ```rust
//! use condev::{assert_rejects, assert_satisfies, State, Value, STRING};
//!
//! assert_satisfies!(Value::from("yeah"), Value::from(STRING));
//! assert_rejects!(Value::from(123), Value::from(STRING));
//! assert_rejects!(Value::from("yeah"), Value::from(STRING), State::Falsy);
//! ```

/// Assert that an entity satisfies a condition.
///
/// Panics if the condition does not match or if evaluation fails. The state
/// defaults to [`State::Unset`](crate::State).
///
/// # Example
///
/// ```rust
/// use condev::{assert_satisfies, Value, OBJECT};
///
/// assert_satisfies!(Value::Null, Value::from(OBJECT), false);
/// ```
#[macro_export]
macro_rules! assert_satisfies {
    ($entity:expr, $condition:expr) => {
        $crate::assert_satisfies!($entity, $condition, $crate::State::Unset)
    };
    ($entity:expr, $condition:expr, $state:expr) => {{
        let entity = $entity;
        let condition = $condition;
        let state = $state;
        match $crate::evaluate(&entity, &condition, state) {
            Ok(true) => {}
            Ok(false) => panic!(
                "Expected {} to satisfy {} (state {:?}), but it did not",
                entity, condition, state
            ),
            Err(e) => panic!("Expected a match, got error: {}", e),
        }
    }};
}

/// Assert that an entity does not satisfy a condition.
///
/// Panics if the condition matches or if evaluation fails.
///
/// # Example
///
/// ```rust
/// use condev::{assert_rejects, Value};
///
/// assert_rejects!(Value::Null, Value::Undefined);
/// ```
#[macro_export]
macro_rules! assert_rejects {
    ($entity:expr, $condition:expr) => {
        $crate::assert_rejects!($entity, $condition, $crate::State::Unset)
    };
    ($entity:expr, $condition:expr, $state:expr) => {{
        let entity = $entity;
        let condition = $condition;
        let state = $state;
        match $crate::evaluate(&entity, &condition, state) {
            Ok(false) => {}
            Ok(true) => panic!(
                "Expected {} to be rejected by {} (state {:?}), but it matched",
                entity, condition, state
            ),
            Err(e) => panic!("Expected a rejection, got error: {}", e),
        }
    }};
}

/// Assert that evaluation fails, and return the error.
///
/// # Example
///
/// ```rust
/// use condev::{assert_condition_error, Context, Function, Value};
///
/// let broken = Function::arrow(|_: &Context, _: &Value| Err("boom".into()));
/// let err = assert_condition_error!(Value::from(1), Value::from(broken));
/// assert!(err.is_execution_failure());
/// ```
#[macro_export]
macro_rules! assert_condition_error {
    ($entity:expr, $condition:expr) => {
        $crate::assert_condition_error!($entity, $condition, $crate::State::Unset)
    };
    ($entity:expr, $condition:expr, $state:expr) => {{
        match $crate::evaluate(&$entity, &$condition, $state) {
            Err(e) => e,
            Ok(matched) => panic!("Expected ConditionError, got Ok({})", matched),
        }
    }};
}

#[cfg(feature = "proptest")]
use crate::{type_name::TYPE_NAMES, Value};
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// Strategy over primitive values, weighted towards the falsy edge cases.
#[cfg(feature = "proptest")]
pub fn arb_primitive() -> BoxedStrategy<Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        Just(Value::from(0)),
        Just(Value::from(f64::NAN)),
        any::<i32>().prop_map(Value::from),
        Just(Value::from("")),
        "[a-z]{1,6}".prop_map(Value::from),
    ]
    .boxed()
}

/// Strategy over the type-name vocabulary.
#[cfg(feature = "proptest")]
pub fn arb_type_name() -> BoxedStrategy<Value> {
    proptest::sample::select(TYPE_NAMES.to_vec())
        .prop_map(Value::from)
        .boxed()
}

/// Strategy over data values: primitives, type names, symbols, and one
/// level of arrays and plain objects.
#[cfg(feature = "proptest")]
pub fn arb_value() -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        4 => arb_primitive(),
        1 => arb_type_name(),
        1 => "[a-z]{1,4}".prop_map(Value::symbol),
    ]
    .boxed();
    prop_oneof![
        3 => leaf.clone(),
        1 => prop::collection::vec(leaf.clone(), 0..4).prop_map(Value::from),
        1 => prop::collection::vec(("[a-z]{1,3}", leaf), 0..3).prop_map(Value::object),
    ]
    .boxed()
}

#[cfg(feature = "proptest")]
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        arb_value()
    }
}
