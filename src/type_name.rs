//! Primitive type names
//!
//! The seven strings a condition can use to ask "what kind of value is this?".
//! Classification follows the familiar `typeof` rules of dynamic languages:
//! `null` reports `"object"`, and functions are their own category.
//!
//! # Example
//!
//! ```rust
//! use condev::{TypeName, Value, OBJECT, STRING};
//!
//! assert_eq!(TypeName::of(&Value::from("yeah")).as_str(), STRING);
//! assert_eq!(TypeName::of(&Value::Null).as_str(), OBJECT);
//! assert_eq!(TypeName::parse("number"), Some(TypeName::Number));
//! assert_eq!(TypeName::parse("Array"), None);
//! ```

use std::fmt;

use crate::value::Value;

/// Type name of booleans.
pub const BOOLEAN: &str = "boolean";
/// Type name of functions and classes.
pub const FUNCTION: &str = "function";
/// Type name of numbers.
pub const NUMBER: &str = "number";
/// Type name of objects, arrays, regular expressions and `null`.
pub const OBJECT: &str = "object";
/// Type name of strings.
pub const STRING: &str = "string";
/// Type name of `undefined`.
pub const UNDEFINED: &str = "undefined";
/// Type name of symbols.
pub const SYMBOL: &str = "symbol";

/// The fixed type-name vocabulary, in declaration order.
pub const TYPE_NAMES: [&str; 7] = [BOOLEAN, FUNCTION, NUMBER, OBJECT, STRING, UNDEFINED, SYMBOL];

/// Runtime classification of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// `"boolean"`
    Boolean,
    /// `"function"`
    Function,
    /// `"number"`
    Number,
    /// `"object"`
    Object,
    /// `"string"`
    String,
    /// `"undefined"`
    Undefined,
    /// `"symbol"`
    Symbol,
}

impl TypeName {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Undefined => TypeName::Undefined,
            Value::Null => TypeName::Object,
            Value::Bool(_) => TypeName::Boolean,
            Value::Number(_) => TypeName::Number,
            Value::String(_) => TypeName::String,
            Value::Symbol(_) => TypeName::Symbol,
            Value::Function(_) => TypeName::Function,
            Value::Array(_) | Value::Object(_) | Value::RegExp(_) => TypeName::Object,
        }
    }

    /// Look up a name in the vocabulary. Matching is case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            BOOLEAN => Some(TypeName::Boolean),
            FUNCTION => Some(TypeName::Function),
            NUMBER => Some(TypeName::Number),
            OBJECT => Some(TypeName::Object),
            STRING => Some(TypeName::String),
            UNDEFINED => Some(TypeName::Undefined),
            SYMBOL => Some(TypeName::Symbol),
            _ => None,
        }
    }

    /// The literal name.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Boolean => BOOLEAN,
            TypeName::Function => FUNCTION,
            TypeName::Number => NUMBER,
            TypeName::Object => OBJECT,
            TypeName::String => STRING,
            TypeName::Undefined => UNDEFINED,
            TypeName::Symbol => SYMBOL,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
