use std::{
    borrow::Cow,
    collections::HashMap,
    fmt::{self, Debug},
    sync::Arc,
    time::Duration,
};

use parking_lot::Mutex;

use crate::{error::BridgeError, spec::SpecFnHandle};

/// A single positional argument of a registration call.
///
/// The underlying framework's registration protocol is positional: an
/// optional leading description, the spec function, then trailing
/// configuration that must be forwarded untouched (typically a timeout).
#[derive(Debug)]
#[non_exhaustive]
pub enum CallArg {
    Name(Cow<'static, str>),
    Spec(SpecFnHandle),
    Timeout(Duration),
}

impl CallArg {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_timeout(&self) -> Option<Duration> {
        match self {
            Self::Timeout(timeout) => Some(*timeout),
            _ => None,
        }
    }
}

/// The raw argument list of one registration call. Built fresh per call and
/// never retained.
#[derive(Debug, Default)]
pub struct SpecCall {
    pub args: Vec<CallArg>,
}

impl SpecCall {
    pub fn new(args: Vec<CallArg>) -> Self {
        Self { args }
    }
}

/// A registration entry point of the underlying framework.
pub type RegisterFn = Arc<dyn Fn(SpecCall) + Send + Sync>;

/// The framework's registration surface, modeled as an explicit table
/// instead of ambient global bindings.
///
/// The table is a cheaply cloneable handle; clones share the same entries.
/// The framework binds its entry points here, and the adapter replaces them
/// with bridged versions while installed. Isolated tables can coexist, which
/// the crate's own tests rely on.
#[derive(Clone, Default)]
pub struct RegistrationTable {
    entries: Arc<Mutex<HashMap<Cow<'static, str>, RegisterFn>>>,
}

impl Debug for RegistrationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.lock().keys().cloned().collect();
        names.sort();
        f.debug_tuple("RegistrationTable").field(&names).finish()
    }
}

impl RegistrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an entry point, replacing any previous binding for the name.
    pub fn bind(&self, name: impl Into<Cow<'static, str>>, f: RegisterFn) {
        self.entries.lock().insert(name.into(), f);
    }

    /// Replace a binding and hand back the previous one.
    pub fn rebind(&self, name: impl Into<Cow<'static, str>>, f: RegisterFn) -> Option<RegisterFn> {
        self.entries.lock().insert(name.into(), f)
    }

    pub fn lookup(&self, name: &str) -> Option<RegisterFn> {
        self.entries.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    /// Invoke the entry bound for `name` with the given argument list.
    ///
    /// The entry runs outside the table lock, so registrations may re-enter
    /// the table.
    pub fn call(&self, name: &str, call: SpecCall) -> Result<(), BridgeError> {
        let f = self
            .lookup(name)
            .ok_or_else(|| BridgeError::Unbound(name.to_string()))?;
        f(call);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calls_reach_the_bound_entry() {
        let table = RegistrationTable::new();
        let (tx, rx) = crossbeam_channel::bounded(1);
        table.bind(
            "it",
            Arc::new(move |call: SpecCall| {
                let _ = tx.send(call.args.len());
            }),
        );

        table
            .call("it", SpecCall::new(vec![CallArg::name("desc")]))
            .unwrap();
        assert_eq!(rx.recv().unwrap(), 1);
    }

    #[test]
    fn unbound_names_error() {
        let table = RegistrationTable::new();
        let err = table.call("nope", SpecCall::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no registration function bound for `nope`"
        );
    }

    #[test]
    fn rebind_returns_the_previous_binding() {
        let table = RegistrationTable::new();
        let first: RegisterFn = Arc::new(|_| {});
        table.bind("it", Arc::clone(&first));

        let previous = table.rebind("it", Arc::new(|_| {})).unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
    }
}
