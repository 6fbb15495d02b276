//! Functions and classes
//!
//! A [`Function`] is the callable value of the model. It carries an optional
//! declared name, an optional parent (`extends`) and an optional body. Every
//! function can also act as a class: objects remember the function that
//! constructed them, and instance checks walk that function's parent chain.
//!
//! Functions are reference values. Cloning a `Function` shares the same
//! underlying declaration, so identity survives clones.
//!
//! # Example
//!
//! ```rust
//! use condev::{Context, Function, Value};
//!
//! let shout = Function::declare("shout", |_ctx: &Context, value: &Value| {
//!     Ok(Value::from(format!("{}!", value)))
//! });
//!
//! let out = shout.call(&Context::global(), &Value::from("hey")).unwrap();
//! assert_eq!(out, Value::from("hey!"));
//! assert_eq!(shout.name(), Some("shout"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::value::Value;

/// Error type returned by function bodies.
///
/// Any error a user predicate produces is carried as the `source()` of
/// [`ConditionError::PredicateExecutionFailure`](crate::ConditionError).
pub type PredicateFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

type Body = dyn Fn(&Context, &Value) -> Result<Value, PredicateFailure> + Send + Sync;

/// A callable value that doubles as a class.
#[derive(Clone)]
pub struct Function {
    inner: Arc<Declaration>,
}

struct Declaration {
    name: Option<String>,
    parent: Option<Function>,
    body: Option<Box<Body>>,
}

impl Function {
    fn build(name: Option<String>, parent: Option<Function>, body: Option<Box<Body>>) -> Self {
        Function {
            inner: Arc::new(Declaration { name, parent, body }),
        }
    }

    /// A declared function with an empty body, like `function hello() {}`.
    ///
    /// Calling it returns `undefined`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::build(Some(name.into()), None, None)
    }

    /// An anonymous function with an empty body, like `function () {}`.
    pub fn anonymous() -> Self {
        Self::build(None, None, None)
    }

    /// A declared function with a body.
    pub fn declare<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Context, &Value) -> Result<Value, PredicateFailure> + Send + Sync + 'static,
    {
        Self::build(Some(name.into()), None, Some(Box::new(body)))
    }

    /// An anonymous function with a body, like an arrow function.
    pub fn arrow<F>(body: F) -> Self
    where
        F: Fn(&Context, &Value) -> Result<Value, PredicateFailure> + Send + Sync + 'static,
    {
        Self::build(None, None, Some(Box::new(body)))
    }

    /// A function declared with the name `condition`.
    ///
    /// This is the named-predicate form the evaluator invokes directly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use condev::{evaluate, Context, Function, State, Value};
    ///
    /// let is_yeah = Function::condition(|_ctx: &Context, entity: &Value| {
    ///     Ok(Value::from(entity.as_str() == Some("yeah")))
    /// });
    ///
    /// let entity = Value::from("yeah");
    /// let condition = Value::from(is_yeah);
    /// assert!(evaluate(&entity, &condition, State::Unset).unwrap());
    /// ```
    pub fn condition<F>(body: F) -> Self
    where
        F: Fn(&Context, &Value) -> Result<Value, PredicateFailure> + Send + Sync + 'static,
    {
        Self::declare(crate::primitives::PREDICATE_NAME, body)
    }

    /// A class with an empty constructor extending `Object`.
    pub fn class(name: impl Into<String>) -> Self {
        Self::build(Some(name.into()), Some(crate::builtin::object()), None)
    }

    /// A class extending `parent`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use condev::Function;
    ///
    /// let animal = Function::class("Animal");
    /// let dog = Function::extends("Dog", &animal);
    /// assert!(dog.inherits_from(&animal));
    /// assert!(!animal.inherits_from(&dog));
    /// ```
    pub fn extends(name: impl Into<String>, parent: &Function) -> Self {
        Self::build(Some(name.into()), Some(parent.clone()), None)
    }

    /// The declared name, if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Whether the function was declared without a name.
    pub fn is_anonymous(&self) -> bool {
        self.inner.name.as_deref().is_none_or(str::is_empty)
    }

    /// The class this function extends, if any.
    pub fn parent(&self) -> Option<&Function> {
        self.inner.parent.as_ref()
    }

    /// Iterate over this function followed by its ancestors.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }

    /// Whether `ancestor` is this function or one of its parents.
    pub fn inherits_from(&self, ancestor: &Function) -> bool {
        self.lineage().any(|f| Function::ptr_eq(f, ancestor))
    }

    /// Call the function with `context` bound as `self`.
    ///
    /// A function without a body returns `undefined`.
    pub fn call(&self, context: &Context, argument: &Value) -> Result<Value, PredicateFailure> {
        match &self.inner.body {
            Some(body) => body(context, argument),
            None => Ok(Value::Undefined),
        }
    }

    /// Reference identity.
    pub fn ptr_eq(a: &Function, b: &Function) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

/// Iterator returned by [`Function::lineage`].
#[derive(Debug)]
pub struct Lineage<'a> {
    next: Option<&'a Function>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Function;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.inner.name)
            .field("parent", &self.parent().and_then(Function::name))
            .field("has_body", &self.inner.body.is_some())
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) if !name.is_empty() => write!(f, "[Function: {}]", name),
            _ => f.write_str("[Function (anonymous)]"),
        }
    }
}
