use std::any::Any;

use thiserror::Error;

/// Failure carried by a spec or hook that did not complete cleanly.
///
/// The error information supplied by the user function is kept as-is so the
/// framework reports the failure exactly as if the spec had signaled it
/// through the completion callback itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpecError {
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Source(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("panicked: {0}")]
    Panicked(String),
}

impl SpecError {
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    pub fn source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }

    /// Convert a panic payload into a reportable failure.
    ///
    /// This matches the common payload types produced by `panic!`
    /// (`&'static str` and `String`). Other payload types are formatted as a
    /// generic placeholder.
    pub fn panicked(payload: Box<dyn Any + Send + 'static>) -> Self {
        let msg = payload
            .downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|payload| payload.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("Box<dyn Any>"));
        Self::Panicked(msg)
    }
}

impl From<String> for SpecError {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<&str> for SpecError {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

/// Misuse of the registration surface itself, as opposed to a failing spec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("no registration function bound for `{0}`")]
    Unbound(String),
}

/// A registration call whose argument list does not match the fixed layout
/// of the invoked method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("`{method}` expects a description as its first argument")]
    MissingName { method: String },
    #[error("`{method}` expects a spec function at position {position}")]
    MissingFunction { method: String, position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_keep_their_message() {
        let err = SpecError::panicked(Box::new("static str"));
        assert_eq!(err.to_string(), "panicked: static str");

        let err = SpecError::panicked(Box::new(String::from("owned")));
        assert_eq!(err.to_string(), "panicked: owned");

        let err = SpecError::panicked(Box::new(42_u8));
        assert_eq!(err.to_string(), "panicked: Box<dyn Any>");
    }

    #[test]
    fn sources_stay_transparent() {
        let io = std::io::Error::other("disk gone");
        let err = SpecError::source(io);
        assert_eq!(err.to_string(), "disk gone");
    }
}
