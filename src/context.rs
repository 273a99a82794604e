use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::{self, Debug},
    sync::Arc,
};

use parking_lot::Mutex;

/// Shared per-spec execution context.
///
/// The framework creates one context per spec run and passes it to every
/// bridged function it invokes. Bridges re-propagate it into the user
/// function, so a setup hook can stash values that the spec body reads later.
/// Cloning the handle shares the underlying storage.
#[derive(Clone, Default)]
pub struct SpecContext {
    values: Arc<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl Debug for SpecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecContext")
            .field("values", &self.values.lock().len())
            .finish()
    }
}

impl SpecContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Send + Sync + 'static>(&self, value: T) {
        self.values.lock().insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.values
            .lock()
            .get(&TypeId::of::<T>())?
            .downcast_ref()
            .cloned()
    }

    pub fn take<T: Send + Sync + 'static>(&self) -> Option<T> {
        self.values
            .lock()
            .remove(&TypeId::of::<T>())?
            .downcast()
            .ok()
            .map(|b| *b)
    }
}
