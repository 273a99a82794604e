use futures::{executor, future::BoxFuture};

use crate::{done::Done, spec::SpecResult};

/// A strategy for draining a spec body's future into its single completion
/// signal.
///
/// The bridge hands the driver the boxed future of a spec body together with
/// the completion handle. Running the future to completion signals success
/// through `done`; its first error signals failure. The driver decides where
/// and when the future runs, the bridge only cares about the terminal state.
pub trait FutureDriver {
    fn drive(&self, fut: BoxFuture<'static, SpecResult>, done: Done);
}

/// The default driver: drives the future to completion on the calling
/// thread, then signals.
#[derive(Debug, Default, Clone)]
pub struct BlockOnDriver;

impl FutureDriver for BlockOnDriver {
    fn drive(&self, fut: BoxFuture<'static, SpecResult>, done: Done) {
        match executor::block_on(fut).0 {
            Ok(()) => done.finish(),
            Err(err) => done.fail(err),
        }
    }
}
