use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::Value;

/// Chained name→value frames. `get` searches the local frame and then
/// delegates outward; `set` always writes the local frame, so inner bindings
/// shadow outer ones and never mutate them.
///
/// Frames are shared (`Rc<RefCell<_>>`) rather than owned: a closure keeps
/// its defining frame alive after the call that created it has returned.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            outer: None
        }
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            outer: Some(outer)
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref()
                .and_then(|outer| outer.borrow().get(name))
        }
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.store.insert(name, value);
    }
}
