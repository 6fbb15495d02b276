//! Primitive checks the evaluator is built from
//!
//! Each function here answers one small question about a value and nothing
//! else. They are public so callers can reuse the exact semantics the
//! evaluator applies, e.g. the falsy set or shallow equality.
//!
//! # Example
//!
//! ```rust
//! use condev::primitives::*;
//! use condev::Value;
//!
//! assert!(is_falsy(&Value::from("")));
//! assert!(is_truthy(&Value::from(0)));
//! assert!(shallow_equal(
//!     &Value::array([Value::from(1), Value::from("a")]),
//!     &Value::array([Value::from(1), Value::from("a")]),
//! ));
//! ```

use crate::builtin;
use crate::context::Context;
use crate::function::{Function, PredicateFailure};
use crate::type_name::TypeName;
use crate::value::Value;

/// Declared name that marks a function as a user predicate.
pub const PREDICATE_NAME: &str = "condition";

/// Whether `value` is falsy: `undefined`, `null`, `false`, `""` or `NaN`.
///
/// Numeric zero is not falsy. Every other value, including empty arrays and
/// objects, is truthy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.is_nan(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Negation of [`is_falsy`].
pub fn is_truthy(value: &Value) -> bool {
    !is_falsy(value)
}

/// Whether `value` is an array.
pub fn is_ordered_sequence(value: &Value) -> bool {
    value.is_array()
}

/// Shallow equality.
///
/// - strict equality for primitives and reference values
/// - arrays of equal length whose elements are strictly equal pairwise
/// - functions sharing a declared name (two anonymous functions included)
///
/// Objects are never compared by content.
pub fn shallow_equal(a: &Value, b: &Value) -> bool {
    if a.strict_equals(b) {
        return true;
    }
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| l.strict_equals(r))
        }
        (Value::Function(f), Value::Function(g)) => {
            f.name().unwrap_or_default() == g.name().unwrap_or_default()
        }
        _ => false,
    }
}

/// Whether `value` is a string equal to one of `set`.
pub fn is_one_of(value: &Value, set: &[&str]) -> bool {
    value.as_str().is_some_and(|s| set.contains(&s))
}

/// Whether the runtime type of `value` is `name`.
pub fn matches_type_name(value: &Value, name: &str) -> bool {
    TypeName::of(value).as_str() == name
}

fn in_constructor_chain(value: &Value, mut test: impl FnMut(&Function) -> bool) -> bool {
    let Some(constructor) = value.constructor() else {
        return false;
    };
    // every constructed value ultimately inherits from Object
    constructor.lineage().any(&mut test) || test(&builtin::object())
}

/// Whether a class named `name` appears in the constructor chain of `value`.
///
/// ```rust
/// use condev::primitives::is_instance_of_named_class;
/// use condev::Value;
///
/// assert!(is_instance_of_named_class(&Value::array([]), "Array"));
/// assert!(is_instance_of_named_class(&Value::array([]), "Object"));
/// assert!(!is_instance_of_named_class(&Value::Null, "Object"));
/// ```
pub fn is_instance_of_named_class(value: &Value, name: &str) -> bool {
    in_constructor_chain(value, |class| class.name() == Some(name))
}

/// Whether `class` appears in the constructor chain of `value`.
pub fn is_instance_of(value: &Value, class: &Function) -> bool {
    in_constructor_chain(value, |candidate| Function::ptr_eq(candidate, class))
}

/// Whether `value` is a function declared with `name`.
///
/// Anonymous functions carry the empty name.
pub fn has_function_name(value: &Value, name: &str) -> bool {
    value
        .as_function()
        .is_some_and(|f| f.name().unwrap_or_default() == name)
}

/// Whether `value` is a function declared without a name.
pub fn is_anonymous_function(value: &Value) -> bool {
    value.as_function().is_some_and(Function::is_anonymous)
}

/// Call `function` with `context` bound and `argument` passed.
pub fn invoke_with_context(
    function: &Function,
    context: &Context,
    argument: &Value,
) -> Result<Value, PredicateFailure> {
    function.call(context, argument)
}

/// The bound context, or the global one when none is bound.
pub fn current_context(bound: Option<&Context>) -> &Context {
    bound.unwrap_or(Context::global_ref())
}
