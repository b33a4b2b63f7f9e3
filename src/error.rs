use std::borrow::Cow;

use thiserror::Error;

/// A failure while reading or writing a field of an operation's target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The object owning the field is gone.
    #[error("target of `{key}` no longer exists")]
    Missing { key: Cow<'static, str> },
    /// The setter refused the value it was given.
    #[error("target refused a write to `{key}`: {reason}")]
    Rejected {
        key: Cow<'static, str>,
        reason: String,
    },
}

impl TargetError {
    pub fn missing(key: impl Into<Cow<'static, str>>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn rejected(key: impl Into<Cow<'static, str>>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by reversible operations and, unchanged, by the histories that run them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// `revert` was called on an operation that was never applied.
    #[error("cannot revert `{description}` before it has been applied")]
    NotApplied { description: String },
    #[error(transparent)]
    Target(#[from] TargetError),
}

pub type Result<T, E = OperationError> = std::result::Result<T, E>;
