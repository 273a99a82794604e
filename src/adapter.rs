use std::{borrow::Cow, collections::HashMap, sync::Arc};

use tracing::{debug, warn};

use crate::{
    bridge,
    driver::{BlockOnDriver, FutureDriver},
    shape::CallShape,
    table::{RegisterFn, RegistrationTable, SpecCall},
};

/// Registration names intercepted by default: the setup/teardown hooks plus
/// the spec declarations, standard and focused. The skip variant (`xit`)
/// stays untouched so skipped bodies never run through the bridge.
pub const DEFAULT_METHODS: &[&str] = &[
    "after_all",
    "after_each",
    "before_all",
    "before_each",
    "it",
    "fit",
];

/// Installs and removes the bridging interception on a [`RegistrationTable`].
///
/// While installed, every configured registration method accepts any
/// [`SpecFnHandle`](crate::spec::SpecFnHandle) kind: the adapter classifies
/// the call, bridges the user function into the framework's
/// completion-callback shape, and forwards the rebuilt call to the captured
/// original entry. Uninstalling restores the original entries exactly.
///
/// Each adapter owns its override registry, so isolated tables and adapters
/// can coexist within one process.
pub struct Adapter {
    table: RegistrationTable,
    originals: HashMap<Cow<'static, str>, RegisterFn>,
    methods: Vec<Cow<'static, str>>,
    installed: bool,
    driver: Arc<dyn FutureDriver + Send + Sync>,
}

impl Adapter {
    pub fn new(table: RegistrationTable) -> Self {
        Self {
            table,
            originals: HashMap::new(),
            methods: default_methods(),
            installed: false,
            driver: Arc::new(BlockOnDriver),
        }
    }

    /// Replace the driver used for bridging future bodies.
    pub fn with_driver(self, driver: impl FutureDriver + Send + Sync + 'static) -> Self {
        Self {
            driver: Arc::new(driver),
            ..self
        }
    }

    /// Intercept every configured method currently bound on the table.
    ///
    /// Idempotent: methods captured by an earlier install stay untouched, so
    /// repeated installs never double-wrap. Methods with no binding are
    /// skipped silently.
    pub fn install(&mut self) {
        for method in &self.methods {
            if self.originals.contains_key(method) {
                continue; // first capture wins
            }
            let Some(original) = self.table.lookup(method) else {
                debug!(method = %method, "no binding to intercept, skipping");
                continue;
            };
            let intercepted = intercept(
                method.clone(),
                Arc::clone(&original),
                Arc::clone(&self.driver),
            );
            self.table.rebind(method.clone(), intercepted);
            self.originals.insert(method.clone(), original);
            debug!(method = %method, "installed bridge");
        }
        self.installed = true;
    }

    /// Restore every captured original binding. No-op when nothing is
    /// installed.
    pub fn uninstall(&mut self) {
        for (method, original) in self.originals.drain() {
            debug!(method = %method, "restored original binding");
            self.table.rebind(method, original);
        }
        self.installed = false;
    }

    /// Whether [`install`](Adapter::install) was called more recently than
    /// [`uninstall`](Adapter::uninstall). Introspection only.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Replace the set of intercepted methods.
    ///
    /// `None` or an empty list resets to [`DEFAULT_METHODS`]. Takes effect on
    /// the next [`install`](Adapter::install); already installed bindings are
    /// left as they are.
    pub fn set_override_methods(&mut self, methods: Option<Vec<Cow<'static, str>>>) {
        self.methods = match methods {
            Some(methods) if !methods.is_empty() => methods,
            _ => default_methods(),
        };
    }
}

fn default_methods() -> Vec<Cow<'static, str>> {
    DEFAULT_METHODS.iter().copied().map(Cow::Borrowed).collect()
}

fn intercept(
    method: Cow<'static, str>,
    original: RegisterFn,
    driver: Arc<dyn FutureDriver + Send + Sync>,
) -> RegisterFn {
    Arc::new(move |call: SpecCall| match CallShape::from_call(&method, call) {
        Ok(shape) => {
            let call =
                shape.into_bridged_call(|func| bridge::wrap_with(func, Arc::clone(&driver)));
            original(call);
        }
        Err((error, call)) => {
            warn!(method = %method, %error, "unclassifiable call, forwarding unmodified");
            original(call);
        }
    })
}
