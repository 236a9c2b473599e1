//! Scenario tests from spec.md §8, driven only through the public
//! `evaluate` API, mirroring the teacher's `tests/test.rs` style of
//! one test per documented language scenario.

mod common;

use common::{run, run_with_context, Value};

#[test]
fn scenario_1_simple_arithmetic() {
    assert_eq!(run("1 + 2;"), Value::Number(3.0));
}

#[test]
fn scenario_2_function_call() {
    assert_eq!(run("function add(a,b){ return a+b; } add(1,2);"), Value::Number(3.0));
}

#[test]
fn scenario_3_while_loop_accumulation() {
    assert_eq!(
        run("let i=0; let s=0; while(i<5){ s+=i; i+=1; } s;"),
        Value::Number(10.0)
    );
}

#[test]
fn scenario_4_closures_share_no_state_across_distinct_calls() {
    let result = run(
        r#"
        function createCounter(n) {
            let c = n;
            return function() { c = c + 1; return c; };
        }
        const a = createCounter(0);
        const b = createCounter(10);
        a(); b();
        [a(), b()];
        "#,
    );
    assert_eq!(result, Value::from(vec![Value::Number(2.0), Value::Number(12.0)]));
}

#[test]
fn scenario_5_nested_delete() {
    let result = run("const obj = { a: { b: 1 } }; delete obj.a.b; obj;");
    match result {
        Value::Object(obj) => match obj.borrow().own.get("a").cloned().unwrap() {
            Value::Object(a) => assert!(a.borrow().own.is_empty()),
            other => panic!("expected obj.a to be an object, got {:?}", other),
        },
        other => panic!("expected an object, got {:?}", other),
    }
}

#[test]
fn scenario_6_optional_chaining_returns_undefined_without_error() {
    assert_eq!(run("const o = null; o?.a?.b;"), Value::Undefined);
}

#[test]
fn two_evaluations_of_the_same_program_are_independent() {
    let first = run("let x = 1; x = x + 1; x;");
    let second = run("let x = 1; x = x + 1; x;");
    assert_eq!(first, second);
    assert_eq!(first, Value::Number(2.0));
}

#[test]
fn block_scope_shadowing_does_not_leak_writes_outward() {
    let result = run(
        r#"
        let x = 1;
        {
            let x = 2;
            x = 3;
        }
        x;
        "#,
    );
    assert_eq!(result, Value::Number(1.0));
}

#[test]
fn writes_to_an_unshadowed_name_update_the_enclosing_binding() {
    let result = run(
        r#"
        let x = 1;
        {
            x = 9;
        }
        x;
        "#,
    );
    assert_eq!(result, Value::Number(9.0));
}

#[test]
fn const_rejects_every_form_of_mutation() {
    for source in [
        "const x = 1; x = 2;",
        "const x = 1; x += 1;",
        "const x = 1; x++;",
        "const x = 1; x--;",
    ] {
        let err = common::run_err(source);
        assert!(
            matches!(err, common::EvalError::TypeError(ref msg) if msg.contains("Cannot redefine property")),
            "{}: {:?}",
            source,
            err
        );
    }
}

#[test]
fn arguments_binding_matches_the_actual_call() {
    let result = run("function f() { return arguments; } f(1, 2, 3);");
    assert_eq!(
        result,
        Value::from(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
    );
    let result = run("function f() { return arguments.length; } f(1, 2, 3);");
    assert_eq!(result, Value::Number(3.0));
}

#[test]
fn seeded_context_is_visible_as_top_level_bindings() {
    let mut context = std::collections::HashMap::new();
    context.insert("seed".to_string(), Value::Number(41.0));
    assert_eq!(run_with_context("seed + 1;", context), Value::Number(42.0));
}
