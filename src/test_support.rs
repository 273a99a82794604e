use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use parking_lot::{Mutex, MutexGuard};

use crate::{
    context::SpecContext,
    done::{Done, SpecOutcome},
    shape::CallShape,
    spec::{BridgedFn, SpecFnHandle},
    table::{CallArg, RegisterFn, RegistrationTable, SpecCall},
};

/// A registration call as the fake framework received it.
pub struct Recorded {
    pub method: &'static str,
    pub name: Option<String>,
    pub func: BridgedFn,
    pub rest: Vec<CallArg>,
}

/// Minimal stand-in for the underlying framework.
///
/// Every bound method classifies its call, requires the native
/// completion-callback convention, and queues the received function for a
/// later [`run_all`](FakeFramework::run_all). Calls that do not match the
/// native layout are counted instead of recorded.
#[derive(Clone, Default)]
pub struct FakeFramework {
    pub table: RegistrationTable,
    recorded: Arc<Mutex<Vec<Recorded>>>,
    malformed: Arc<AtomicUsize>,
}

impl FakeFramework {
    pub fn with_methods(methods: &[&'static str]) -> Self {
        let framework = Self::default();
        for &method in methods {
            framework.table.bind(method, framework.entry(method));
        }
        framework
    }

    fn entry(&self, method: &'static str) -> RegisterFn {
        let recorded = Arc::clone(&self.recorded);
        let malformed = Arc::clone(&self.malformed);
        Arc::new(move |call: SpecCall| {
            let Ok(shape) = CallShape::from_call(method, call) else {
                malformed.fetch_add(1, Ordering::SeqCst);
                return;
            };
            let SpecFnHandle::SelfManaged(func) = shape.func else {
                malformed.fetch_add(1, Ordering::SeqCst);
                return;
            };
            recorded.lock().push(Recorded {
                method,
                name: shape.name.map(|name| name.into_owned()),
                func,
                rest: shape.rest,
            });
        })
    }

    pub fn recorded(&self) -> MutexGuard<'_, Vec<Recorded>> {
        self.recorded.lock()
    }

    pub fn malformed(&self) -> usize {
        self.malformed.load(Ordering::SeqCst)
    }

    /// Run every queued function against one shared context, in registration
    /// order, collecting the reported outcomes.
    pub fn run_all(&self, ctx: &SpecContext) -> Vec<(Option<String>, SpecOutcome)> {
        let queued: Vec<_> = self.recorded.lock().drain(..).collect();
        queued
            .into_iter()
            .map(|call| {
                let (done, rx) = Done::channel();
                (call.func)(ctx.clone(), done);
                let outcome = rx.recv().expect("queued function must signal completion");
                (call.name, outcome)
            })
            .collect()
    }
}
