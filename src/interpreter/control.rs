//! Non-local control flow. The teacher threads a single `Option<Value>`
//! "did a return happen" flag through every `eval_*` function's
//! `Result`; this evaluator needs two independent carriers (return,
//! safe-navigation short-circuit) instead of one, so it generalizes
//! that shape to a `Signal` enum carried in the `Err` arm alongside
//! real errors.

use crate::error::EvalError;
use crate::interpreter::value::Value;

#[derive(Debug, Clone)]
pub enum Signal {
    /// A real, user-visible error. Propagates all the way to the host
    /// boundary.
    Error(EvalError),
    /// A `return` statement unwinding to the nearest function call
    /// boundary, or the top-level program when permitted.
    Return(Value),
    /// An optional (`?.`) link short-circuited on a null/undefined
    /// receiver. Caught by the enclosing chain expression; must never
    /// escape one.
    SafeNavigation,
}

impl From<EvalError> for Signal {
    fn from(err: EvalError) -> Self {
        Signal::Error(err)
    }
}

pub type EvalResult = Result<Value, Signal>;
