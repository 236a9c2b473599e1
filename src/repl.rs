//! A line-at-a-time REPL: one persistent `Environment` shared across
//! statements, mirroring the teacher's `interpreter::repl::Repl` (which
//! wraps a single `Rc<RefCell<Environment>>` and re-evaluates each
//! parsed statement against it) generalized to this crate's guard and
//! signal-based evaluator.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::ast;
use crate::error::EvalError;
use crate::guard::{EvalOptions, ResourceGuard};
use crate::interpreter::{self, Environment, Value};
use crate::parser;

/// Holds the environment that persists across repeated calls to
/// `eval_line`, so bindings made on one line are visible on the next.
pub struct Repl {
    environment: Rc<RefCell<Environment>>,
}

impl Repl {
    pub fn new() -> Repl {
        Repl {
            environment: Rc::new(RefCell::new(Environment::new())),
        }
    }

    /// Parses and evaluates one statement against the persistent
    /// environment. A fresh `ResourceGuard` is used per line: call depth
    /// and loop-disable state do not carry over between lines, but a
    /// timeout/abort flag supplied in `opts` still applies to each line
    /// individually.
    pub fn eval_line(&self, source: &str, opts: &EvalOptions) -> Result<Value, EvalError> {
        let pair = parser::parse_statement(source)?;
        let statement = ast::build_statement(pair)?;
        let guard = ResourceGuard::new(opts);
        interpreter::eval_top_level_statement(&statement, &self.environment, &guard)
    }
}

impl Default for Repl {
    fn default() -> Self {
        Repl::new()
    }
}

/// Runs an interactive read-eval-print loop against stdin/stdout until
/// EOF, printing each non-`undefined` result and any error encountered.
pub fn start_repl() {
    let repl = Repl::new();
    let opts = EvalOptions {
        allow_return_outside_function: true,
        ..EvalOptions::default()
    };
    let stdin = io::stdin();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => return,
            Ok(_) => {}
            Err(_) => return,
        }

        if line.trim().is_empty() {
            continue;
        }

        match repl.eval_line(&line, &opts) {
            Ok(Value::Undefined) => {}
            Ok(value) => println!("{}", value),
            Err(err) => eprintln!("{}", err),
        }
    }
}
