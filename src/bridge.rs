//! Synthesis of framework-compatible completion-callback functions.
//!
//! One rule per function kind: future bodies are handed to the
//! [`FutureDriver`], plain bodies complete in the same turn unless they hand
//! back a pending future, and self-managed bodies pass through untouched.
//! User failures of any flavor (returned errors, rejected futures, panics)
//! surface through the completion handle's failure path and never escape as
//! unwinds.

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use futures::{FutureExt, future::BoxFuture};

use crate::{
    driver::{BlockOnDriver, FutureDriver},
    error::SpecError,
    spec::{BridgedFn, SpecFnHandle, SpecResult, SpecReturn},
};

/// Wrap `func` into the completion-callback shape the framework invokes,
/// driving futures with the default [`BlockOnDriver`].
///
/// This is the direct entry point for callers that register bridged
/// functions themselves instead of installing an [`Adapter`](crate::Adapter).
pub fn wrap(func: SpecFnHandle) -> BridgedFn {
    wrap_with(func, Arc::new(BlockOnDriver))
}

/// Like [`wrap`], with an explicit [`FutureDriver`].
pub fn wrap_with(func: SpecFnHandle, driver: Arc<dyn FutureDriver + Send + Sync>) -> BridgedFn {
    match func {
        // already speaks the framework convention, forward untouched
        SpecFnHandle::SelfManaged(func) => func,
        SpecFnHandle::Future(func) => Arc::new(move |ctx, done| {
            match catch_unwind(AssertUnwindSafe(|| func(ctx))) {
                Ok(fut) => driver.drive(guard(fut), done),
                Err(payload) => done.fail(SpecError::panicked(payload)),
            }
        }),
        SpecFnHandle::Plain(func) => Arc::new(move |ctx, done| {
            match catch_unwind(AssertUnwindSafe(|| func(ctx))) {
                Ok(SpecReturn::Settled(SpecResult(Ok(())))) => done.finish(),
                Ok(SpecReturn::Settled(SpecResult(Err(err)))) => done.fail(err),
                Ok(SpecReturn::Pending(fut)) => driver.drive(guard(fut), done),
                Err(payload) => done.fail(SpecError::panicked(payload)),
            }
        }),
    }
}

/// Convert a panic inside the future into a reported failure.
fn guard(fut: BoxFuture<'static, SpecResult>) -> BoxFuture<'static, SpecResult> {
    Box::pin(AssertUnwindSafe(fut).catch_unwind().map(|result| {
        result.unwrap_or_else(|payload| SpecResult(Err(SpecError::panicked(payload))))
    }))
}
