//! Host objects: the representation for values whose storage is owned
//! by the embedding program. Own keys are insertion-ordered
//! (`indexmap::IndexMap`, unlike the teacher's plain `HashMap`-backed
//! `Structure`, because the data model requires stable key order);
//! an optional parent link provides the "inherited keys" ancestry the
//! spec calls for without modelling a full prototype chain.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::interpreter::value::Value;

#[derive(Debug, Clone)]
pub struct HostObject {
    pub own: IndexMap<String, Value>,
    pub parent: Option<Rc<RefCell<HostObject>>>,
}

impl HostObject {
    pub fn new() -> HostObject {
        HostObject {
            own: IndexMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: Rc<RefCell<HostObject>>) -> HostObject {
        HostObject {
            own: IndexMap::new(),
            parent: Some(parent),
        }
    }
}

impl Default for HostObject {
    fn default() -> Self {
        HostObject::new()
    }
}

/// Own keys first, then ancestry. Returns `None` if the key is missing
/// everywhere on the chain.
pub fn read(object: &Rc<RefCell<HostObject>>, key: &str) -> Option<Value> {
    if let Some(value) = object.borrow().own.get(key) {
        return Some(value.clone());
    }
    let parent = object.borrow().parent.clone();
    match parent {
        Some(parent) => read(&parent, key),
        None => None,
    }
}

/// Finds the holder that already owns `key` on the ancestry chain, if
/// any.
fn find_owner(object: &Rc<RefCell<HostObject>>, key: &str) -> Option<Rc<RefCell<HostObject>>> {
    if object.borrow().own.contains_key(key) {
        return Some(Rc::clone(object));
    }
    let parent = object.borrow().parent.clone();
    match parent {
        Some(parent) => find_owner(&parent, key),
        None => None,
    }
}

fn root(object: &Rc<RefCell<HostObject>>) -> Rc<RefCell<HostObject>> {
    let parent = object.borrow().parent.clone();
    match parent {
        Some(parent) => root(&parent),
        None => Rc::clone(object),
    }
}

/// Writes go to whichever holder already owns the key; if it is nowhere
/// on the chain, the key is created on the root holder.
pub fn write(object: &Rc<RefCell<HostObject>>, key: &str, value: Value) {
    let holder = find_owner(object, key).unwrap_or_else(|| root(object));
    holder.borrow_mut().own.insert(key.to_string(), value);
}

/// Deletion only ever touches the receiver's own keys, matching the
/// reference language's `delete` (it never reaches into inherited
/// data). Succeeds even when the key was never own, same as `delete`
/// on a non-existent property returning `true`.
pub fn delete_own(object: &Rc<RefCell<HostObject>>, key: &str) {
    object.borrow_mut().own.shift_remove(key);
}
