use std::{
    fmt::{self, Debug},
    future::Future,
    sync::Arc,
};

use futures::future::BoxFuture;

use crate::{context::SpecContext, done::Done, error::SpecError};

/// The function shape the underlying framework invokes: the per-spec context
/// plus a single-use completion handle.
pub type BridgedFn = Arc<dyn Fn(SpecContext, Done) + Send + Sync>;

pub type FutureFn = Arc<dyn Fn(SpecContext) -> BoxFuture<'static, SpecResult> + Send + Sync>;
pub type PlainFn = Arc<dyn Fn(SpecContext) -> SpecReturn + Send + Sync>;

/// A user-supplied spec or hook function, tagged by kind.
///
/// The kind is fixed at construction through the typed constructors, so the
/// bridge never has to guess what a function value is at call time:
///
/// - [`Future`](SpecFnHandle::Future) bodies are asynchronous tasks. The
///   bridge drives the produced future to its terminal state before
///   signaling completion.
/// - [`Plain`](SpecFnHandle::Plain) bodies run synchronously. A body that
///   hands back a pending future is still awaited before the spec counts as
///   finished; anything else completes in the same turn.
/// - [`SelfManaged`](SpecFnHandle::SelfManaged) bodies already speak the
///   framework's completion-callback convention and are forwarded untouched.
#[non_exhaustive]
pub enum SpecFnHandle {
    Future(FutureFn),
    Plain(PlainFn),
    SelfManaged(BridgedFn),
}

impl Debug for SpecFnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future(_) => write!(f, "Future(...)"),
            Self::Plain(_) => write!(f, "Plain(...)"),
            Self::SelfManaged(_) => write!(f, "SelfManaged(...)"),
        }
    }
}

impl SpecFnHandle {
    pub fn from_future<F, Fut, T>(f: F) -> Self
    where
        F: Fn(SpecContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<SpecResult>,
    {
        Self::Future(Arc::new(move |ctx| -> BoxFuture<'static, SpecResult> {
            let fut = f(ctx);
            Box::pin(async move { fut.await.into() })
        }))
    }

    pub fn from_plain<F, T>(f: F) -> Self
    where
        F: Fn(SpecContext) -> T + Send + Sync + 'static,
        T: Into<SpecReturn>,
    {
        Self::Plain(Arc::new(move |ctx| f(ctx).into()))
    }

    pub fn from_self_managed<F>(f: F) -> Self
    where
        F: Fn(SpecContext, Done) + Send + Sync + 'static,
    {
        Self::SelfManaged(Arc::new(f))
    }
}

/// Result of a fully settled spec body.
#[derive(Debug)]
pub struct SpecResult(pub Result<(), SpecError>);

impl From<()> for SpecResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Into<SpecError>> From<Result<(), E>> for SpecResult {
    fn from(v: Result<(), E>) -> Self {
        Self(v.map_err(Into::into))
    }
}

/// What a plain spec body handed back: either an already settled result, or
/// a pending future that has to be driven before completion may be signaled.
pub enum SpecReturn {
    Settled(SpecResult),
    Pending(BoxFuture<'static, SpecResult>),
}

impl Debug for SpecReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settled(result) => f.debug_tuple("Settled").field(result).finish(),
            Self::Pending(_) => write!(f, "Pending(...)"),
        }
    }
}

impl SpecReturn {
    pub fn pending<Fut, T>(fut: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        T: Into<SpecResult>,
    {
        Self::Pending(Box::pin(async move { fut.await.into() }))
    }
}

impl From<()> for SpecReturn {
    fn from(_: ()) -> Self {
        Self::Settled(().into())
    }
}

impl<E: Into<SpecError>> From<Result<(), E>> for SpecReturn {
    fn from(v: Result<(), E>) -> Self {
        Self::Settled(v.into())
    }
}

impl From<SpecResult> for SpecReturn {
    fn from(result: SpecResult) -> Self {
        Self::Settled(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_settles_ok() {
        let SpecReturn::Settled(SpecResult(result)) = SpecReturn::from(()) else {
            panic!("unit must settle immediately")
        };
        assert!(result.is_ok());
    }

    #[test]
    fn errors_settle_failed() {
        let SpecReturn::Settled(SpecResult(result)) =
            SpecReturn::from(Err::<(), _>("kaput")) else {
            panic!("results must settle immediately")
        };
        assert_eq!(result.unwrap_err().to_string(), "kaput");
    }

    #[test]
    fn pending_defers() {
        let ret = SpecReturn::pending(std::future::ready(()));
        assert!(matches!(ret, SpecReturn::Pending(_)));
    }
}
