//! Classification of raw registration calls.
//!
//! Every registration method has a fixed argument layout: spec declarations
//! carry a leading description, setup/teardown hooks do not. The layout is
//! keyed by the method name rather than inferred from the argument count, so
//! a call with and without trailing configuration classifies identically and
//! rest forwarding stays positional no matter how many trailing arguments
//! are present.

use std::borrow::Cow;

use crate::{
    error::ShapeError,
    spec::{BridgedFn, SpecFnHandle},
    table::{CallArg, SpecCall},
};

/// Registration names whose first argument is a human-readable description.
///
/// Includes the skip variant: it is never intercepted by default, but when a
/// caller opts it in, its calls still carry a description.
pub const NAMED_METHODS: &[&str] = &["it", "fit", "xit"];

pub fn expects_name(method: &str) -> bool {
    NAMED_METHODS.contains(&method)
}

/// A classified registration call: the optional description, the user
/// function, and the trailing arguments to forward unchanged.
#[derive(Debug)]
pub struct CallShape {
    pub name: Option<Cow<'static, str>>,
    pub func: SpecFnHandle,
    pub rest: Vec<CallArg>,
}

impl CallShape {
    /// Classify `call` according to the fixed argument layout of `method`.
    ///
    /// Malformed calls are handed back untouched so the caller can forward
    /// them to the original binding instead of dropping them.
    pub fn from_call(method: &str, call: SpecCall) -> Result<Self, (ShapeError, SpecCall)> {
        let named = expects_name(method);
        let func_at = usize::from(named);

        if named && !matches!(call.args.first(), Some(CallArg::Name(_))) {
            let error = ShapeError::MissingName {
                method: method.to_string(),
            };
            return Err((error, call));
        }
        if !matches!(call.args.get(func_at), Some(CallArg::Spec(_))) {
            let error = ShapeError::MissingFunction {
                method: method.to_string(),
                position: func_at,
            };
            return Err((error, call));
        }

        let mut args = call.args;
        let rest = args.split_off(func_at + 1);
        let Some(CallArg::Spec(func)) = args.pop() else {
            unreachable!("argument layout checked above")
        };
        let name = match args.pop() {
            Some(CallArg::Name(name)) => Some(name),
            _ => None,
        };

        Ok(Self { name, func, rest })
    }

    /// Bridge the user function and rebuild the positional argument list:
    /// the description (if any) first, the bridged function in the spec-fn
    /// slot, the rest forwarded verbatim.
    pub fn into_bridged_call(self, bridge: impl FnOnce(SpecFnHandle) -> BridgedFn) -> SpecCall {
        let Self { name, func, rest } = self;
        let mut args = Vec::with_capacity(rest.len() + 2);
        if let Some(name) = name {
            args.push(CallArg::Name(name));
        }
        args.push(CallArg::Spec(SpecFnHandle::SelfManaged(bridge(func))));
        args.extend(rest);
        SpecCall::new(args)
    }
}
