//! Lexical scope chain. Generalizes the teacher's `Environment::{new,
//! new_sub, bind, get}` from a single flat `bind` (which silently
//! overwrites) into the spec's four-operation contract
//! (`lookup`/`declare`/`assign`/`has_any`) plus `redefine_owner_cell`,
//! with an explicit writable flag per binding instead of the teacher's
//! bare `HashMap<String, Value>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::EvalError;
use crate::interpreter::value::Value;

/// An environment's per-binding storage: a value plus whether it may be
/// reassigned.
#[derive(Debug, Clone)]
pub struct Cell {
    pub value: Value,
    pub writable: bool,
}

#[derive(Debug)]
pub struct Environment {
    parent: Option<Rc<RefCell<Environment>>>,
    bindings: HashMap<String, Cell>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            parent: None,
            bindings: HashMap::new(),
        }
    }

    pub fn new_sub(parent: &Rc<RefCell<Environment>>) -> Environment {
        Environment {
            parent: Some(Rc::clone(parent)),
            bindings: HashMap::new(),
        }
    }

    /// Creates the binding in the innermost (this) frame. Fails if this
    /// frame already owns `name` -- declaration never shadows within
    /// the same frame, only across frames.
    pub fn declare(&mut self, name: &str, value: Value, writable: bool) -> Result<(), EvalError> {
        if self.bindings.contains_key(name) {
            return Err(EvalError::already_declared(name));
        }
        self.bindings.insert(name.to_string(), Cell { value, writable });
        Ok(())
    }

    /// Nearest-frame resolution: this frame's own bindings, then each
    /// parent in turn.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(cell) = self.bindings.get(name) {
            return Some(cell.value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.borrow().lookup(name))
    }

    pub fn has_any(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self
                .parent
                .as_ref()
                .map(|parent| parent.borrow().has_any(name))
                .unwrap_or(false)
    }

    /// Ascends the chain to the frame owning `name` and overwrites its
    /// cell, preserving the writable flag. Fails if the cell is
    /// immutable or the name is unbound anywhere on the chain.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if let Some(cell) = self.bindings.get_mut(name) {
            if !cell.writable {
                return Err(EvalError::cannot_redefine(name));
            }
            cell.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(EvalError::unknown_variable(name)),
        }
    }

    /// Same read-modify-write target resolution as `assign`, named
    /// separately per the data model's compound-assignment contract: it
    /// is the primitive compound assignment and pre/post increment
    /// build on top of, after computing the new value from the old one.
    pub fn redefine_owner_cell(&mut self, name: &str, new_value: Value) -> Result<(), EvalError> {
        self.assign(name, new_value)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
