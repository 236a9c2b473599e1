//! Shared helpers for the integration test suite, driving the crate
//! only through its public API (`sandrift::evaluate`/`validate`),
//! mirroring the teacher's `tests/common.rs` role of a thin
//! `run_program` wrapper shared by `tests/test.rs`.

use std::collections::HashMap;

pub use sandrift::{evaluate, validate, EvalError, EvalOptions, Value, ValidateOptions};

pub fn run(source: &str) -> Value {
    evaluate(source, HashMap::new(), EvalOptions::default()).unwrap_or_else(|err| panic!("{}: {}", source, err))
}

pub fn run_with_opts(source: &str, opts: EvalOptions) -> Value {
    evaluate(source, HashMap::new(), opts).unwrap_or_else(|err| panic!("{}: {}", source, err))
}

pub fn run_with_context(source: &str, context: HashMap<String, Value>) -> Value {
    evaluate(source, context, EvalOptions::default()).unwrap_or_else(|err| panic!("{}: {}", source, err))
}

pub fn run_err(source: &str) -> EvalError {
    evaluate(source, HashMap::new(), EvalOptions::default()).expect_err(source)
}

pub fn run_err_with_opts(source: &str, opts: EvalOptions) -> EvalError {
    evaluate(source, HashMap::new(), opts).expect_err(source)
}
