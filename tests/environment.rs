//! Scope-chain invariants from spec.md §8, exercised through nested
//! blocks, function frames, and closures via the public API.

mod common;

use common::{run, Value};

#[test]
fn nested_blocks_each_get_their_own_frame() {
    let result = run(
        r#"
        let x = 1;
        {
            let x = 2;
            {
                let x = 3;
                x = 30;
            }
            x;
        }
        "#,
    );
    assert_eq!(result, Value::Number(2.0));
}

#[test]
fn function_parameters_shadow_outer_bindings() {
    let result = run(
        r#"
        let x = 1;
        function f(x) { return x + 1; }
        f(10);
        "#,
    );
    assert_eq!(result, Value::Number(11.0));
}

#[test]
fn function_body_assignment_without_declaration_updates_the_closed_over_binding() {
    let result = run(
        r#"
        let total = 0;
        function add(n) { total = total + n; }
        add(3); add(4);
        total;
        "#,
    );
    assert_eq!(result, Value::Number(7.0));
}

#[test]
fn distinct_closures_over_the_same_function_capture_independent_frames() {
    let result = run(
        r#"
        function makeAdder(n) { return function(x) { return x + n; }; }
        const addFive = makeAdder(5);
        const addTen = makeAdder(10);
        [addFive(1), addTen(1)];
        "#,
    );
    assert_eq!(result, Value::from(vec![Value::Number(6.0), Value::Number(11.0)]));
}

#[test]
fn redeclaring_a_name_in_the_same_frame_is_rejected() {
    let err = common::run_err("let x = 1; let x = 2;");
    assert!(matches!(err, common::EvalError::NameError(ref msg) if msg.contains("already declared")));
}

#[test]
fn assigning_an_unbound_name_is_rejected() {
    let err = common::run_err("missing = 1;");
    assert!(matches!(err, common::EvalError::NameError(ref msg) if msg.contains("Unknown variable")));
}

#[test]
fn var_and_let_are_both_mutable_const_is_not() {
    assert_eq!(run("var x = 1; x = 2; x;"), Value::Number(2.0));
    assert_eq!(run("let x = 1; x = 2; x;"), Value::Number(2.0));
    let err = common::run_err("const x = 1; x = 2;");
    assert!(matches!(err, common::EvalError::TypeError(_)));
}
