//! Dynamic values
//!
//! [`Value`] models the runtime values of a dynamically typed language: the
//! two empty values (`undefined` and `null`), booleans, numbers, strings,
//! symbols, arrays, plain or class-constructed objects, regular expressions
//! and functions. Both entities and conditions are values.
//!
//! Primitives compare by content. Arrays, objects, regular expressions,
//! symbols and functions are reference values: cloning shares the
//! allocation, and [`Value::strict_equals`] compares them by identity.
//!
//! # Example
//!
//! ```rust
//! use condev::Value;
//!
//! let a = Value::object([("id", Value::from(1))]);
//! let b = Value::object([("id", Value::from(1))]);
//!
//! assert!(a.strict_equals(&a.clone()));
//! assert!(!a.strict_equals(&b)); // same content, different object
//! assert_eq!(Value::from("x"), Value::from("x"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

use crate::builtin;
use crate::function::Function;
use crate::type_name::TypeName;

#[cfg(feature = "serde")]
mod serde_impl;

/// A dynamically typed value.
///
/// `PartialEq` is strict equality (see [`Value::strict_equals`]), so like
/// `f64` it is not reflexive for `NaN`.
#[derive(Clone, Debug)]
pub enum Value {
    /// The absent value.
    Undefined,
    /// The empty reference.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    String(Arc<str>),
    /// A unique symbol.
    Symbol(Symbol),
    /// An ordered sequence.
    Array(Array),
    /// A key-value object with a constructor.
    Object(Object),
    /// A compiled regular expression.
    RegExp(RegExp),
    /// A function or class.
    Function(Function),
}

/// A unique symbol, optionally described.
#[derive(Clone, Debug)]
pub struct Symbol(Arc<Option<String>>);

impl Symbol {
    /// The description given at creation.
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// An immutable, shared array.
#[derive(Clone, Debug)]
pub struct Array(Arc<Vec<Value>>);

impl Array {
    /// The elements.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Reference identity.
    pub fn ptr_eq(a: &Array, b: &Array) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

/// An immutable, shared object.
#[derive(Clone, Debug)]
pub struct Object(Arc<ObjectData>);

#[derive(Debug)]
struct ObjectData {
    constructor: Function,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// The function that constructed this object.
    pub fn constructor(&self) -> &Function {
        &self.0.constructor
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.fields.get(key)
    }

    /// Iterate over fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.fields.len()
    }

    /// Whether the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.fields.is_empty()
    }

    /// Reference identity.
    pub fn ptr_eq(a: &Object, b: &Object) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

/// A shared regular expression.
#[derive(Clone, Debug)]
pub struct RegExp(Arc<Regex>);

impl RegExp {
    /// Unanchored search.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Reference identity.
    pub fn ptr_eq(a: &RegExp, b: &RegExp) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Value {
    /// Build an array from its elements.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Array(Arc::new(items.into_iter().collect())))
    }

    /// Build a plain object, constructed by `Object`.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::instance(&builtin::object(), fields)
    }

    /// Build an object constructed by `class`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use condev::{Function, Value};
    ///
    /// let point = Function::class("Point");
    /// let origin = Value::instance(&point, [("x", Value::from(0)), ("y", Value::from(0))]);
    /// assert_eq!(origin.constructor().and_then(|c| c.name().map(String::from)), Some("Point".into()));
    /// ```
    pub fn instance<K: Into<String>>(
        class: &Function,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Value::Object(Object(Arc::new(ObjectData {
            constructor: class.clone(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })))
    }

    /// Compile a regular expression.
    ///
    /// Flags can be written inline (`(?i)eah`), or passed separately with
    /// [`Value::regex_with_flags`].
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Value::from)
    }

    /// Compile a regular expression with literal-style flags, as in `/eah/i`.
    ///
    /// `i`, `m` and `s` set case-insensitive, multi-line and dot-all
    /// matching. `g` and `u` are accepted and change nothing: matching is
    /// always a single unanchored search over Unicode text.
    ///
    /// # Errors
    ///
    /// Fails on an invalid pattern or an unknown flag.
    ///
    /// # Example
    ///
    /// ```rust
    /// use condev::{evaluate, State, Value};
    ///
    /// let shout = Value::regex_with_flags("eah", "i").unwrap();
    /// assert!(evaluate(&Value::from("YEAH"), &shout, State::Unset).unwrap());
    /// assert!(Value::regex_with_flags("eah", "x").is_err());
    /// ```
    pub fn regex_with_flags(pattern: &str, flags: &str) -> Result<Self, regex::Error> {
        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'g' | 'u' => continue,
                other => {
                    return Err(regex::Error::Syntax(format!(
                        "unsupported regular expression flag `{}`",
                        other
                    )))
                }
            };
        }
        builder.build().map(Value::from)
    }

    /// Create a new symbol, distinct from every other symbol.
    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Symbol(Arc::new(Some(description.into()))))
    }

    /// Whether this is `undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Whether this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Whether this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Whether this is a key-value object (not an array or regex).
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Whether this is a function.
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// The array, if this is one.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The object, if this is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The regular expression, if this is one.
    pub fn as_regexp(&self) -> Option<&RegExp> {
        match self {
            Value::RegExp(r) => Some(r),
            _ => None,
        }
    }

    /// The function, if this is one.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Field lookup on objects; `None` for every other value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Runtime type classification.
    pub fn type_name(&self) -> TypeName {
        TypeName::of(self)
    }

    /// The function that constructed this value.
    ///
    /// Primitives report their wrapper class. `undefined` and `null` have no
    /// constructor.
    pub fn constructor(&self) -> Option<Function> {
        match self {
            Value::Undefined | Value::Null => None,
            Value::Bool(_) => Some(builtin::boolean()),
            Value::Number(_) => Some(builtin::number()),
            Value::String(_) => Some(builtin::string()),
            Value::Symbol(_) => Some(builtin::symbol()),
            Value::Array(_) => Some(builtin::array()),
            Value::Object(o) => Some(o.constructor().clone()),
            Value::RegExp(_) => Some(builtin::regexp()),
            Value::Function(_) => Some(builtin::function()),
        }
    }

    /// Strict equality.
    ///
    /// Primitives compare by value (`NaN` never equals itself, `0` equals
    /// `-0`); reference values compare by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => Arc::ptr_eq(&a.0, &b.0),
            (Value::Array(a), Value::Array(b)) => Array::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Object::ptr_eq(a, b),
            (Value::RegExp(a), Value::RegExp(b)) => RegExp::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Function::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        write!(f, "{:.0}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => format_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Symbol(s) => write!(f, "Symbol({})", s.description().unwrap_or_default()),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    // empty slots and absent values render as nothing
                    if !matches!(item, Value::Undefined | Value::Null) {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::RegExp(r) => write!(f, "/{}/", r.as_str()),
            Value::Function(func) => write!(f, "{}", func),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array(Arc::new(items)))
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::RegExp(RegExp(Arc::new(re)))
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::array(iter)
    }
}
