//! Conditions Example
//!
//! Demonstrates evaluating conditions over entities:
//! - Type names, class names and regular expressions
//! - Arrays of conditions (any of)
//! - User predicates with a bound context
//! - State gating
//! - Handling predicate errors
//!
//! Run with `--features tracing` to see which rule decided each evaluation.

use condev::prelude::*;

fn show(label: &str, entity: &Value, condition: &Value, state: State) {
    match evaluate(entity, condition, state) {
        Ok(matched) => println!("{:<40} {}", label, matched),
        Err(e) => println!("{:<40} error: {}", label, e),
    }
}

// ==================== Shapes ====================

/// Example 1: Condition shapes
///
/// The same entity tested against each kind of condition.
fn example_shapes() {
    println!("\n=== Example 1: Condition Shapes ===");

    let entity = Value::from("yeah");

    show("type name \"string\"", &entity, &Value::from(STRING), State::Unset);
    show("type name \"number\"", &entity, &Value::from(NUMBER), State::Unset);
    show("class name \"String\"", &entity, &Value::from("String"), State::Unset);
    show("class String", &entity, &Value::from(builtin::string()), State::Unset);
    if let Ok(pattern) = Value::regex("e+a") {
        show("regex /e+a/", &entity, &pattern, State::Unset);
    }
    show("equal \"yeah\"", &entity, &Value::from("yeah"), State::Unset);
}

// ==================== Any Of ====================

/// Example 2: Arrays of conditions
///
/// An array matches when any of its elements does.
fn example_any_of() {
    println!("\n=== Example 2: Any Of ===");

    let id_like = Value::array([Value::from(NUMBER), Value::from(STRING)]);
    for entity in [Value::from(42), Value::from("abc-1"), Value::Null] {
        show(&format!("{} is number or string", entity), &entity, &id_like, State::Unset);
    }
    show("anything in []", &Value::from(1), &Value::array([]), State::Unset);
}

// ==================== Predicates ====================

/// Example 3: User predicates
///
/// Functions named `condition`, or anonymous ones, are called with the
/// entity and the evaluator's bound context.
fn example_predicates() {
    println!("\n=== Example 3: Predicates ===");

    let policy = Value::object([("max_len", Value::from(5))]);
    let short_enough = Function::condition(|ctx: &Context, entity: &Value| {
        let max = ctx.this().get("max_len").and_then(Value::as_f64).unwrap_or(0.0);
        Ok(Value::from(entity.as_str().is_some_and(|s| s.len() as f64 <= max)))
    });

    let evaluator = Evaluator::new().with_context(policy);
    for word in ["tiny", "enormous"] {
        let matched = evaluator.evaluate(&Value::from(word), &Value::from(short_enough.clone()));
        println!("{:<40} {:?}", format!("{} is short enough", word), matched.ok());
    }
}

// ==================== State ====================

/// Example 4: State gating
///
/// `false` admits only falsy entities, `true` only truthy ones.
fn example_state() {
    println!("\n=== Example 4: State ===");

    let object = Value::from(OBJECT);
    show("null is object", &Value::Null, &object, State::Unset);
    show("null is object (state false)", &Value::Null, &object, State::Falsy);
    show("null is object (state true)", &Value::Null, &object, State::Truthy);
    show("0 equals 0 (state true)", &Value::from(0), &Value::from(0), State::Truthy);
}

// ==================== Errors ====================

/// Example 5: Predicate errors
///
/// A predicate that returns a non-boolean, or fails, aborts evaluation.
fn example_errors() {
    println!("\n=== Example 5: Errors ===");

    let sloppy = Function::condition(|_: &Context, _: &Value| Ok(Value::from("maybe")));
    let failing = Function::arrow(|_: &Context, _: &Value| Err("lookup timed out".into()));

    show("non-boolean predicate", &Value::from(1), &Value::from(sloppy), State::Unset);
    show("failing predicate", &Value::from(1), &Value::from(failing), State::Unset);
}

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("Condev Examples");
    println!("===============");

    example_shapes();
    example_any_of();
    example_predicates();
    example_state();
    example_errors();
}
