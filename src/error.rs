//! The error module defines the single error type surfaced across the
//! parser, evaluator, and host boundary. There is no recovery path inside
//! a script (no try/catch in the language subset), so every error that
//! escapes evaluation is one of these variants.

use std::fmt::{self, Display};

/// A source position used to annotate syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// EvalError is the taxonomy of every user-visible error this crate can
/// produce. Internal non-local control signals (return, safe-navigation)
/// are never represented here; see `interpreter::control::Signal`.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The parser rejected the source text.
    SyntaxError { message: String, at: Option<Position> },
    /// A construct exists in the grammar but is explicitly unsupported by
    /// this subset: async functions, destructuring patterns, or an AST
    /// node kind the evaluator does not recognize.
    UnsupportedFeature(String),
    /// Name resolution failures: unbound identifiers, redeclaration, or
    /// unknown member names surfaced by host interop.
    NameError(String),
    /// Type errors: calling a non-callable, reading through
    /// null/undefined, or redefining an immutable property.
    TypeError(String),
    /// Resource guard trips: timeout, abort, stack depth, or disabled
    /// loop constructs.
    ResourceError(String),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::SyntaxError { message, at: Some(pos) } => {
                write!(f, "SyntaxError: {} at {}", message, pos)
            }
            EvalError::SyntaxError { message, at: None } => {
                write!(f, "SyntaxError: {}", message)
            }
            EvalError::UnsupportedFeature(msg) => write!(f, "{}", msg),
            EvalError::NameError(msg) => write!(f, "{}", msg),
            EvalError::TypeError(msg) => write!(f, "{}", msg),
            EvalError::ResourceError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

impl EvalError {
    pub fn unknown_variable(name: &str) -> EvalError {
        EvalError::NameError(format!("Unknown variable {}", name))
    }

    pub fn already_declared(name: &str) -> EvalError {
        EvalError::NameError(format!("{} is already declared", name))
    }

    pub fn unknown_name(name: &str) -> EvalError {
        EvalError::NameError(format!("{} is unknown", name))
    }

    pub fn not_a_function(name: &str) -> EvalError {
        EvalError::TypeError(format!("{} is not a function", name))
    }

    pub fn read_through_nullish(key: &str) -> EvalError {
        EvalError::TypeError(format!(
            "Cannot read properties of null/undefined (reading '{}')",
            key
        ))
    }

    pub fn cannot_redefine(name: &str) -> EvalError {
        EvalError::TypeError(format!("Cannot redefine property: {}", name))
    }

    pub fn unsupported_pattern(kind: &str) -> EvalError {
        EvalError::UnsupportedFeature(format!("Unknown variable declaration {}", kind))
    }

    pub fn timed_out() -> EvalError {
        EvalError::ResourceError("Execution timed out".to_string())
    }

    pub fn aborted() -> EvalError {
        EvalError::ResourceError("Execution aborted".to_string())
    }

    pub fn stack_exceeded(max: usize) -> EvalError {
        EvalError::ResourceError(format!("Maximum stack size exceeded: {}", max))
    }

    pub fn while_disabled() -> EvalError {
        EvalError::ResourceError("While statements are not available".to_string())
    }

    pub fn async_unsupported() -> EvalError {
        EvalError::UnsupportedFeature("Async functions are not supported".to_string())
    }
}
