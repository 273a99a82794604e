use std::fmt::{self, Debug};

use crossbeam_channel::Receiver;

use crate::error::SpecError;

/// Terminal state of a bridged spec or hook.
#[derive(Debug)]
#[non_exhaustive]
pub enum SpecOutcome {
    Passed,
    Failed(SpecError),
}

impl SpecOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, SpecOutcome::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, SpecOutcome::Failed(_))
    }
}

/// The single-use completion handle the framework hands to a bridged
/// function.
///
/// [`finish`](Done::finish) signals success, [`fail`](Done::fail) signals
/// failure with the causing error. Both consume the handle, so a completion
/// can be signaled at most once. Dropping the handle without calling either
/// leaves the spec pending; enforcing a timeout on pending specs is the
/// framework's job, not the bridge's.
pub struct Done {
    notify: Box<dyn FnOnce(SpecOutcome) + Send>,
}

impl Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Done(...)")
    }
}

impl Done {
    pub fn new<F>(notify: F) -> Self
    where
        F: FnOnce(SpecOutcome) + Send + 'static,
    {
        Self {
            notify: Box::new(notify),
        }
    }

    /// A handle paired with a receiver that observes the outcome.
    ///
    /// Useful for frameworks that invoke bridged functions on worker threads
    /// and collect completions elsewhere.
    pub fn channel() -> (Self, Receiver<SpecOutcome>) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let done = Self::new(move |outcome| {
            let _ = tx.send(outcome);
        });
        (done, rx)
    }

    pub fn finish(self) {
        (self.notify)(SpecOutcome::Passed);
    }

    pub fn fail(self, err: impl Into<SpecError>) {
        (self.notify)(SpecOutcome::Failed(err.into()));
    }
}
