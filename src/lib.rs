//! # Condev
//!
//! > *Evaluate condition over entity.*
//!
//! A small library that decides whether a dynamically typed value (the
//! *entity*) satisfies a *condition*. The condition is itself an untyped
//! value whose meaning is inferred from its shape:
//!
//! - an array: any of its conditions must match
//! - a type name (`"string"`, `"number"`, `"object"`, ...): `typeof` test
//! - any other string: class name or function name
//! - a regular expression: search inside a non-empty string entity
//! - a function named `condition`, or an anonymous one: a user predicate
//! - any other function: a class, tested for inheritance
//! - anything else: shallow equality
//!
//! An optional *state* restricts matches to falsy (`false`) or truthy
//! (`true`) entities.
//!
//! ## Quick Example
//!
//! ```rust
//! use condev::{builtin, evaluate, Context, Function, State, Value, STRING};
//!
//! let entity = Value::from("yeah");
//!
//! assert!(evaluate(&entity, &Value::from(STRING), State::Unset).unwrap());
//! assert!(evaluate(&entity, &Value::regex("eah").unwrap(), State::Unset).unwrap());
//! assert!(evaluate(&entity, &Value::from(builtin::string()), State::Unset).unwrap());
//!
//! let is_yeah = Function::condition(|_: &Context, entity: &Value| {
//!     Ok(Value::from(entity.as_str() == Some("yeah")))
//! });
//! assert!(evaluate(&entity, &Value::from(is_yeah), State::Unset).unwrap());
//!
//! // state `false` only admits falsy entities
//! assert!(!evaluate(&entity, &Value::from(STRING), false).unwrap());
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace!` events naming the rule that decided each
//!   evaluation, and `debug!` events when a user predicate fails
//! - `serde`: `Serialize`/`Deserialize` for [`Value`]
//! - `proptest`: `Arbitrary` for [`Value`] and strategies in [`testing`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod builtin;
pub mod context;
pub mod error;
pub mod evaluate;
pub mod function;
pub mod primitives;
pub mod testing;
pub mod type_name;
pub mod value;

// Re-exports
pub use context::Context;
pub use error::ConditionError;
pub use evaluate::{evaluate, Evaluator, State};
pub use function::{Function, PredicateFailure};
pub use type_name::{TypeName, BOOLEAN, FUNCTION, NUMBER, OBJECT, STRING, SYMBOL, UNDEFINED};
pub use value::Value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builtin;
    pub use crate::context::Context;
    pub use crate::error::ConditionError;
    pub use crate::evaluate::{evaluate, Evaluator, State};
    pub use crate::function::{Function, PredicateFailure};
    pub use crate::type_name::{
        TypeName, BOOLEAN, FUNCTION, NUMBER, OBJECT, STRING, SYMBOL, UNDEFINED,
    };
    pub use crate::value::Value;
}
