use crate::object::Object;
use std::collections::HashMap;

/// The mutable name-to-value mapping one evaluation runs against.
///
/// An environment is owned by exactly one in-flight module evaluation:
/// created fresh at the start, mutated in place by `Assign` and `ForRange`,
/// read by name references, and discarded at the end. There are no
/// enclosing scopes and no sharing.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
        }
    }

    /// Look up a name. Absence is a lookup failure for the caller to
    /// surface, never a silent default.
    pub fn get(&self, name: &str) -> Option<Object> {
        self.store.get(name).copied()
    }

    pub fn set(&mut self, name: String, value: Object) {
        self.store.insert(name, value);
    }
}
