//! Bridges asynchronous and future-returning spec functions onto a
//! callback-based test registration protocol.
//!
//! Spec bodies written as async tasks (or plain functions that hand back a
//! future) are driven to completion and reported through the framework's
//! native `done`/`done.fail(err)` contract. Interception happens on an
//! explicit [`RegistrationTable`](table::RegistrationTable) via an
//! [`Adapter`], or per function through [`wrap`].

pub mod context;
pub mod done;
pub mod error;
pub mod shape;
pub mod spec;
pub mod table;

mod adapter;
pub use adapter::*;

mod bridge;
pub use bridge::*;

mod driver;
pub use driver::*;

#[cfg(test)]
mod test_support;
