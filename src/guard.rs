//! One context per evaluation holding the start timestamp, time budget,
//! abort flag, call-depth counter, and loop-disable flag. Grounded on
//! `ouros`'s `resource.rs` (`ResourceError` with `Time`/`Recursion`
//! variants, `Instant`-based elapsed checks), narrowed from ouros's full
//! allocation/operation/memory budget down to the four mechanisms this
//! evaluator needs.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::EvalError;

/// Options accepted by `evaluate`.
#[derive(Clone)]
pub struct EvalOptions {
    pub timeout: Option<Duration>,
    pub abort_flag: Option<Arc<AtomicBool>>,
    pub disable_while_statements: bool,
    pub max_call_depth: usize,
    pub allow_return_outside_function: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            timeout: None,
            abort_flag: None,
            disable_while_statements: false,
            max_call_depth: 512,
            allow_return_outside_function: false,
        }
    }
}

/// Options accepted by `validate`.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub allow_return_outside_function: bool,
}

/// Checked at script-function entry and each while-iteration -- nowhere
/// else, so a sufficiently long straight-line expression can outrun the
/// budget by one step (see spec §5 and §9's timeout-precision note).
pub struct ResourceGuard {
    start: Instant,
    timeout: Option<Duration>,
    abort_flag: Option<Arc<AtomicBool>>,
    max_call_depth: usize,
    call_depth: Cell<usize>,
    disable_while_statements: bool,
}

/// Decrements the call-depth counter on every exit path (success,
/// error, or a propagating return) via `Drop`, rather than the
/// teacher's manual decrement on each branch. Holds a shared
/// reference rather than `&mut ResourceGuard` so the guard can still
/// be threaded into the recursive call the `CallGuard` is protecting;
/// `call_depth` is a `Cell` precisely to make that safe.
pub struct CallGuard<'a> {
    guard: &'a ResourceGuard,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.guard.call_depth.set(self.guard.call_depth.get() - 1);
    }
}

impl ResourceGuard {
    pub fn new(opts: &EvalOptions) -> ResourceGuard {
        ResourceGuard {
            start: Instant::now(),
            timeout: opts.timeout,
            abort_flag: opts.abort_flag.clone(),
            max_call_depth: opts.max_call_depth,
            call_depth: Cell::new(0),
            disable_while_statements: opts.disable_while_statements,
        }
    }

    /// Time budget and abort flag. Does not touch call depth.
    pub fn check(&self) -> Result<(), EvalError> {
        if let Some(timeout) = self.timeout {
            if self.start.elapsed() >= timeout {
                log::warn!("evaluation timed out after {:?}", self.start.elapsed());
                return Err(EvalError::timed_out());
            }
        }
        if let Some(flag) = &self.abort_flag {
            if flag.load(Ordering::Relaxed) {
                log::warn!("evaluation aborted by host");
                return Err(EvalError::aborted());
            }
        }
        Ok(())
    }

    /// Checked once before a while loop's condition is evaluated at
    /// all, not per iteration -- this is a static gate, not a resource
    /// check.
    pub fn while_allowed(&self) -> Result<(), EvalError> {
        if self.disable_while_statements {
            return Err(EvalError::while_disabled());
        }
        Ok(())
    }

    /// Increments call depth, checks it against the configured maximum,
    /// then yields to the resource guard. The returned `CallGuard`
    /// decrements on drop.
    pub fn enter_call(&self) -> Result<CallGuard<'_>, EvalError> {
        let depth = self.call_depth.get() + 1;
        self.call_depth.set(depth);
        if depth > self.max_call_depth {
            self.call_depth.set(depth - 1);
            return Err(EvalError::stack_exceeded(self.max_call_depth));
        }
        self.check()?;
        Ok(CallGuard { guard: self })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_call_depth_decrements_on_drop() {
        let opts = EvalOptions { max_call_depth: 2, ..EvalOptions::default() };
        let guard = ResourceGuard::new(&opts);
        {
            let _first = guard.enter_call().unwrap();
            let _second = guard.enter_call().unwrap();
            assert!(guard.enter_call().is_err());
        }
        assert!(guard.enter_call().is_ok());
    }

    #[test]
    fn test_timeout_trips_after_budget() {
        let opts = EvalOptions {
            timeout: Some(Duration::from_millis(0)),
            ..EvalOptions::default()
        };
        let guard = ResourceGuard::new(&opts);
        std::thread::sleep(Duration::from_millis(1));
        assert!(guard.check().is_err());
    }

    #[test]
    fn test_abort_flag_trips_guard() {
        let flag = Arc::new(AtomicBool::new(false));
        let opts = EvalOptions { abort_flag: Some(flag.clone()), ..EvalOptions::default() };
        let guard = ResourceGuard::new(&opts);
        assert!(guard.check().is_ok());
        flag.store(true, Ordering::Relaxed);
        assert!(guard.check().is_err());
    }

    #[test]
    fn test_while_disabled_flag() {
        let opts = EvalOptions { disable_while_statements: true, ..EvalOptions::default() };
        let guard = ResourceGuard::new(&opts);
        assert!(guard.while_allowed().is_err());
    }
}
