//! Main entrypoint of the sandrift binary.
//!
//! With no arguments, starts a REPL session. With a file path argument,
//! runs the file and prints a non-undefined top-level result.

use std::collections::HashMap;
use std::fs;
use std::process;

use sandrift::{repl, EvalOptions, Value};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        repl::start_repl();
        return;
    }

    let path = &args[1];
    let source = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Failed to read {}: {}", path, err);
        process::exit(1);
    });

    let opts = EvalOptions { allow_return_outside_function: true, ..EvalOptions::default() };

    match sandrift::evaluate(&source, HashMap::new(), opts) {
        Ok(Value::Undefined) => {}
        Ok(value) => println!("{}", value),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
