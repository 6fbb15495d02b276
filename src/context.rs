//! Call context for user predicates
//!
//! Predicates receive the context they were evaluated in as their first
//! argument, so a predicate can consult whatever the caller bound as `self`.
//! When nothing is bound, evaluation uses [`Context::global`], a process-wide
//! empty object.
//!
//! # Example
//!
//! ```rust
//! use condev::{Context, Evaluator, Function, Value};
//!
//! let limits = Value::object([("max", Value::from(10))]);
//! let within = Function::condition(|ctx: &Context, entity: &Value| {
//!     let max = ctx.this().get("max").and_then(Value::as_f64).unwrap_or(0.0);
//!     Ok(Value::from(entity.as_f64().is_some_and(|n| n <= max)))
//! });
//!
//! let evaluator = Evaluator::new().with_context(Context::new(limits));
//! assert!(evaluator.evaluate(&Value::from(7), &Value::from(within.clone())).unwrap());
//! assert!(!evaluator.evaluate(&Value::from(12), &Value::from(within)).unwrap());
//! ```

use std::sync::LazyLock;

use crate::value::Value;

static GLOBAL: LazyLock<Context> = LazyLock::new(|| Context::new(Value::object::<&str>([])));

/// The value bound as `self` while predicates run.
#[derive(Clone, Debug)]
pub struct Context {
    this: Value,
}

impl Context {
    /// Bind `this` as the context.
    pub fn new(this: Value) -> Self {
        Context { this }
    }

    /// The process-wide default context: an empty plain object.
    ///
    /// Every call returns the same underlying object.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    pub(crate) fn global_ref() -> &'static Context {
        &GLOBAL
    }

    /// The bound value.
    pub fn this(&self) -> &Value {
        &self.this
    }

    /// Consume the context and return the bound value.
    pub fn into_inner(self) -> Value {
        self.this
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::global()
    }
}

impl From<Value> for Context {
    fn from(this: Value) -> Self {
        Context::new(this)
    }
}
