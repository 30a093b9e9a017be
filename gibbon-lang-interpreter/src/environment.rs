use crate::object::Object;
use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;

#[derive(Debug, PartialEq, Trace, Finalize)]
pub struct EnvironmentCore {
    store: HashMap<String, Gc<Object>>,
    outer: Option<Environment>,
}

/// A frame in the scope chain. Cloning shares the frame; closures and
/// macros capture their definition environment this way. Frames are
/// garbage collected, so a closure keeping its own defining frame alive
/// (directly or through a cycle) is fine.
#[derive(Debug, PartialEq, Clone, Trace, Finalize)]
pub struct Environment {
    environment: Gc<GcCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    pub fn get(&self, key: &str) -> Option<Gc<Object>> {
        let env = self.environment.borrow();
        env.store
            .get(key)
            .cloned()
            .or_else(|| env.outer.as_ref().and_then(|outer| outer.get(key)))
    }

    /// Binds in the innermost frame only; there is no assignment that
    /// reaches outer frames.
    pub fn set(&mut self, key: &str, value: Gc<Object>) {
        self.environment
            .borrow_mut()
            .store
            .insert(key.to_owned(), value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Gc::ptr_eq(&self.environment, &other.environment)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
