use crate::eval::object::Object;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// One lexical scope: local bindings plus an optional enclosing scope.
/// Scopes are shared (`Rc`) because any number of closures may capture the
/// same one, and a scope outlives the call that created it for as long as
/// some closure still holds it.
#[derive(Clone, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_outer(outer: Rc<RefCell<Environment>>) -> Self {
        Self {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match self.outer {
                Some(ref outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    // Writes are always local; rebinding a name shadows, never walks outward.
    pub fn set(&mut self, name: &str, value: Object) -> Object {
        self.store.insert(name.to_string(), value.clone());
        value
    }
}
