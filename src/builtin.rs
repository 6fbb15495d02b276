//! Built-in classes
//!
//! Process-wide class functions every value's constructor chain is rooted in.
//! Each accessor returns a clone of a lazily created singleton, so identity
//! checks against them are stable for the life of the process.
//!
//! ```rust
//! use condev::{builtin, evaluate, State, Value};
//!
//! let array = Value::array([]);
//! let class = Value::from(builtin::array());
//! assert!(evaluate(&array, &class, State::Unset).unwrap());
//! ```

use std::sync::LazyLock;

use crate::function::Function;

static OBJECT: LazyLock<Function> = LazyLock::new(|| Function::named("Object"));
static ARRAY: LazyLock<Function> = LazyLock::new(|| Function::extends("Array", &OBJECT));
static FUNCTION: LazyLock<Function> = LazyLock::new(|| Function::extends("Function", &OBJECT));
static REGEXP: LazyLock<Function> = LazyLock::new(|| Function::extends("RegExp", &OBJECT));
static STRING: LazyLock<Function> = LazyLock::new(|| Function::extends("String", &OBJECT));
static NUMBER: LazyLock<Function> = LazyLock::new(|| Function::extends("Number", &OBJECT));
static BOOLEAN: LazyLock<Function> = LazyLock::new(|| Function::extends("Boolean", &OBJECT));
static SYMBOL: LazyLock<Function> = LazyLock::new(|| Function::extends("Symbol", &OBJECT));

/// The root class.
pub fn object() -> Function {
    OBJECT.clone()
}

/// Constructor of arrays.
pub fn array() -> Function {
    ARRAY.clone()
}

/// Constructor of functions.
pub fn function() -> Function {
    FUNCTION.clone()
}

/// Constructor of regular expressions.
pub fn regexp() -> Function {
    REGEXP.clone()
}

/// Wrapper class of strings.
pub fn string() -> Function {
    STRING.clone()
}

/// Wrapper class of numbers.
pub fn number() -> Function {
    NUMBER.clone()
}

/// Wrapper class of booleans.
pub fn boolean() -> Function {
    BOOLEAN.clone()
}

/// Wrapper class of symbols.
pub fn symbol() -> Function {
    SYMBOL.clone()
}
