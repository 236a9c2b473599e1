//! Resource guard scenarios from spec.md §8 (max call depth, timeout)
//! plus the `disableWhileStatements` flag, exercised through the public
//! `evaluate` API.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{run_err_with_opts, EvalError, EvalOptions};

#[test]
fn scenario_7_max_call_depth_reports_stack_exceeded() {
    let opts = EvalOptions { max_call_depth: 3, ..EvalOptions::default() };
    let err = run_err_with_opts("function f(){ f(); } f();", opts);
    assert!(matches!(err, EvalError::ResourceError(ref msg) if msg.contains("Maximum stack size exceeded")));
}

#[test]
fn scenario_8_timeout_reports_execution_timed_out() {
    let opts = EvalOptions {
        timeout: Some(Duration::from_millis(100)),
        ..EvalOptions::default()
    };
    let err = run_err_with_opts("while(true){}", opts);
    assert!(matches!(err, EvalError::ResourceError(ref msg) if msg.contains("Execution timed out")));
}

#[test]
fn disabled_while_statements_are_rejected_before_the_loop_runs() {
    let opts = EvalOptions { disable_while_statements: true, ..EvalOptions::default() };
    let err = run_err_with_opts("let i = 0; while (i < 1000000) { i += 1; } i;", opts);
    assert!(matches!(err, EvalError::ResourceError(ref msg) if msg.contains("While statements")));
}

#[test]
fn abort_flag_halts_execution_mid_loop() {
    let flag = Arc::new(AtomicBool::new(false));
    flag.store(true, Ordering::Relaxed);
    let opts = EvalOptions { abort_flag: Some(flag), ..EvalOptions::default() };
    let err = run_err_with_opts("while (true) {}", opts);
    assert!(matches!(err, EvalError::ResourceError(ref msg) if msg.contains("aborted")));
}

#[test]
fn recursion_within_the_call_depth_budget_succeeds() {
    let opts = EvalOptions { max_call_depth: 64, ..EvalOptions::default() };
    let result =
        common::run_with_opts("function fact(n) { return n <= 1 ? 1 : n * fact(n - 1); } fact(10);", opts);
    assert_eq!(result, common::Value::Number(3628800.0));
}
