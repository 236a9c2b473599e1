//! Public embedding API. `validate` parses and statically checks a
//! script without running it; `evaluate` additionally runs it against a
//! host-supplied context map under the given resource limits. Neither
//! function initializes logging -- that is left to whoever embeds this
//! crate (the `sandrift` binary does it once, in `main`), matching the
//! teacher's split between library and binary.

#[macro_use]
extern crate pest_derive;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub mod ast;
pub mod error;
pub mod guard;
pub mod interpreter;
pub mod parser;
pub mod repl;

pub use error::EvalError;
pub use guard::{EvalOptions, ValidateOptions};
pub use interpreter::{Environment, Value};
pub use parser::Rule;

/// Parses `source` and statically rejects constructs the evaluator
/// cannot run: a bare `return` outside any function, unless
/// `opts.allow_return_outside_function` is set. Returns the parsed
/// program so a caller can inspect or cache it before evaluating.
pub fn validate(source: &str, opts: ValidateOptions) -> Result<ast::node::Program, EvalError> {
    let program = ast::build_program(parser::parse_program(source)?)?;
    if !opts.allow_return_outside_function && interpreter::contains_top_level_return(&program.body) {
        return Err(EvalError::SyntaxError {
            message: "Illegal return statement".to_string(),
            at: None,
        });
    }
    Ok(program)
}

/// Parses, validates, and evaluates `source` against a fresh top-level
/// frame seeded with `context`, under the resource limits in `opts`.
pub fn evaluate(source: &str, context: HashMap<String, Value>, opts: EvalOptions) -> Result<Value, EvalError> {
    let validate_opts = ValidateOptions {
        allow_return_outside_function: opts.allow_return_outside_function,
    };
    let program = validate(source, validate_opts)?;

    let env = Rc::new(RefCell::new(Environment::new()));
    for (name, value) in context {
        env.borrow_mut().declare(&name, value, true)?;
    }

    log::debug!("evaluate: starting program with {} top-level statement(s)", program.body.len());
    let guard = guard::ResourceGuard::new(&opts);
    let result = interpreter::eval_program(&program, &env, &guard);
    match &result {
        Ok(_) => log::debug!("evaluate: completed"),
        Err(err) => log::debug!("evaluate: failed: {}", err),
    }
    result
}
