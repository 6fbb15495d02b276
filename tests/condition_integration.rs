//! Integration tests for condition evaluation
//!
//! These cover the calibration cases of the evaluator end to end, through
//! the public API only.

use condev::prelude::*;
use condev::{assert_condition_error, assert_rejects, assert_satisfies};

fn anonymous_body() -> Function {
    Function::arrow(|_: &Context, _: &Value| Ok(Value::Undefined))
}

#[test]
fn test_null_is_an_object_under_falsy_state() {
    assert_satisfies!(Value::Null, Value::from(OBJECT), false);
    assert_satisfies!(Value::Null, Value::array([Value::from(OBJECT), Value::from(STRING)]), false);
}

#[test]
fn test_primitives_match_their_wrapper_classes() {
    assert_satisfies!(Value::from("yeah"), Value::from(builtin::string()));
    assert_satisfies!(Value::from(true), Value::from(builtin::boolean()));
    assert_satisfies!(Value::from(123), Value::from(builtin::number()));
    assert_satisfies!(Value::symbol("id"), Value::from(builtin::symbol()));
}

#[test]
fn test_zero_is_truthy() {
    assert_satisfies!(Value::from(0), Value::from(0), true);
    assert_rejects!(Value::from(0), Value::from("0"));
    assert_rejects!(Value::from(0), Value::from("0"), false);
}

#[test]
fn test_functions_compare_by_declared_name() {
    assert_satisfies!(Value::from(Function::anonymous()), Value::from(Function::anonymous()));
    assert_satisfies!(Value::from(anonymous_body()), Value::from(anonymous_body()));

    let hello = Function::declare("Hello", |_: &Context, _: &Value| Ok(Value::from("hello")));
    let hello_again = Function::declare("Hello", |_: &Context, _: &Value| Ok(Value::from("hi")));
    assert_satisfies!(Value::from(hello.clone()), Value::from(hello_again));

    assert_rejects!(Value::from(hello), Value::from(Function::named("Hi")));
}

#[test]
fn test_regex_conditions() {
    assert_satisfies!(Value::from("yeah"), Value::regex("eah").unwrap());
    assert_rejects!(Value::from(""), Value::regex("eah").unwrap());
    assert_rejects!(Value::from(123), Value::regex("1").unwrap());

    assert_rejects!(Value::from("YEAH"), Value::regex("eah").unwrap());
    assert_satisfies!(Value::from("YEAH"), Value::regex_with_flags("eah", "i").unwrap());
}

#[test]
fn test_class_conditions() {
    assert_satisfies!(Value::object::<&str>([]), Value::from(builtin::object()));
    assert_satisfies!(Value::array([]), Value::from(builtin::array()));
    assert_satisfies!(Value::from(builtin::array()), Value::from("Array"));
    assert_satisfies!(Value::from(builtin::array()), Value::from(builtin::array()));
}

#[test]
fn test_class_hierarchy() {
    let entity_class = Function::class("Entity");
    let user = Function::extends("User", &entity_class);
    let admin = Function::extends("Admin", &user);
    let root = Value::instance(&admin, [("name", Value::from("root"))]);

    assert_satisfies!(root.clone(), Value::from(user.clone()));
    assert_satisfies!(root.clone(), Value::from("Entity"));
    assert_satisfies!(root.clone(), Value::from(builtin::object()));
    assert_rejects!(root, Value::from(builtin::array()));

    let guest = Value::instance(&user, [("name", Value::from("guest"))]);
    assert_rejects!(guest.clone(), Value::from(admin));
    assert_rejects!(guest, Value::from("Admin"));
}

#[test]
fn test_predicate_conditions() {
    let is_yeah =
        Function::condition(|_: &Context, v: &Value| Ok(Value::from(v.as_str() == Some("yeah"))));
    let is_number =
        Function::condition(|_: &Context, v: &Value| Ok(Value::from(v.as_f64().is_some())));
    let is_string = Function::arrow(|_: &Context, v: &Value| Ok(Value::from(v.is_string())));

    assert_satisfies!(Value::from("yeah"), Value::from(is_yeah));
    assert_satisfies!(Value::from("yeah"), Value::from(is_string));
    assert_rejects!(Value::from("yeah"), Value::from(is_number));
    assert_rejects!(Value::from("yeah"), Value::from(Function::named("hello")));
}

#[test]
fn test_function_name_conditions() {
    assert_satisfies!(Value::from(Function::named("constructor")), Value::from("constructor"));
}

#[test]
fn test_array_conditions() {
    assert_satisfies!(Value::from("yeah"), Value::array([Value::from(STRING), Value::from("yeah")]));
    assert_rejects!(Value::array([]), Value::array([]));
    assert_rejects!(Value::from(123), Value::array([Value::from(STRING), Value::from("yeah")]));
}

#[test]
fn test_objects_compare_by_reference() {
    assert_rejects!(Value::object::<&str>([]), Value::object::<&str>([]));

    let shared = Value::object([("k", Value::from(1))]);
    assert_satisfies!(shared.clone(), shared);
}

#[test]
fn test_falsy_equality_is_strict() {
    assert_rejects!(Value::Null, Value::Undefined);
    assert_rejects!(Value::Null, Value::Undefined, false);
    assert_satisfies!(Value::Undefined, Value::Undefined);
    assert_rejects!(Value::from(""), Value::Null);
}

#[test]
fn test_type_name_table() {
    let cases = [
        (Value::from(true), BOOLEAN),
        (Value::from(Function::named("f")), FUNCTION),
        (Value::from(1.5), NUMBER),
        (Value::array([]), OBJECT),
        (Value::from("s"), STRING),
        (Value::Undefined, UNDEFINED),
        (Value::symbol("s"), SYMBOL),
    ];

    for (entity, name) in cases {
        assert_satisfies!(entity.clone(), Value::from(name));
        for other in condev::type_name::TYPE_NAMES.iter().filter(|n| **n != name) {
            assert_rejects!(entity.clone(), Value::from(*other));
        }
    }
}

#[test]
fn test_predicate_errors() {
    let sloppy = Function::condition(|_: &Context, _: &Value| Ok(Value::from("not a bool")));
    let err = assert_condition_error!(Value::from("yeah"), Value::from(sloppy));
    assert!(err.is_invalid_result());
    assert!(err.to_string().contains("not a bool"));

    let failing = Function::arrow(|_: &Context, _: &Value| Err("lookup failed".into()));
    let err = assert_condition_error!(Value::from("yeah"), Value::from(failing));
    assert!(err.is_execution_failure());
    assert!(err.to_string().contains("lookup failed"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_evaluation_is_repeatable() {
    let entity = Value::from("yeah");
    let condition = Value::array([Value::from(NUMBER), Value::regex("y").unwrap()]);
    let evaluator = Evaluator::new().with_state(State::Truthy);

    let first = evaluator.evaluate(&entity, &condition).unwrap();
    let second = evaluator.evaluate(&entity, &condition).unwrap();
    assert!(first);
    assert_eq!(first, second);
}

#[test]
fn test_evaluator_context_is_forwarded() {
    let owner = Value::object([("owner", Value::from("ops"))]);
    let owned = Function::condition(|ctx: &Context, entity: &Value| {
        Ok(Value::from(entity.get("owner") == ctx.this().get("owner")))
    });

    let evaluator = Evaluator::new().with_context(owner);
    let job = Value::object([("owner", Value::from("ops"))]);
    let other = Value::object([("owner", Value::from("dev"))]);

    assert!(evaluator.evaluate(&job, &Value::from(owned.clone())).unwrap());
    assert!(!evaluator.evaluate(&other, &Value::from(owned)).unwrap());
}
