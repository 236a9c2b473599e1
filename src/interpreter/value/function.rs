//! Function values: host-supplied native callables and script-defined
//! closures. Both need hand-written `Debug`/`PartialEq` because neither
//! can derive through an `Rc<dyn Fn>` or an `Rc<RefCell<Environment>>`.

use std::fmt::{self, Debug};
use std::rc::Rc;

use crate::ast::node::{FunctionBody, ParamPattern};
use crate::error::EvalError;
use crate::interpreter::value::{Environment, Value};

use std::cell::RefCell;

/// A host-supplied callable. `receiver` carries the bound object for
/// method-style calls (`obj.method()`); it is `None` for plain calls.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    func: Rc<dyn Fn(Option<Value>, &[Value]) -> Result<Value, EvalError>>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(Option<Value>, &[Value]) -> Result<Value, EvalError> + 'static,
    ) -> NativeFunction {
        NativeFunction {
            name: name.into(),
            func: Rc::new(func),
        }
    }

    pub fn call(&self, receiver: Option<Value>, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(receiver, args)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

/// A script-defined function or arrow expression. Holds its captured
/// environment by strong reference, matching the teacher's closures
/// keeping `Rc<RefCell<Environment>>` alive as long as the closure is.
pub struct ScriptFunction {
    pub name: Option<String>,
    pub params: Vec<ParamPattern>,
    pub body: FunctionBody,
    pub env: Rc<RefCell<Environment>>,
    pub is_arrow: bool,
}

impl Debug for ScriptFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptFunction")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .field("is_arrow", &self.is_arrow)
            .finish()
    }
}
