//! Error types
//!
//! Configuration gaps in a validation graph are not errors: they are logged
//! and the affected branch is skipped. The errors here cover the few
//! operations that can genuinely fail.

use std::any::type_name;
use std::borrow::Cow;

/// Failure to narrow a value from one type to another.
///
/// # Examples
///
/// ```rust,ignore
/// use rulegraph::foundation::CastError;
///
/// let error = CastError::new::<i64, u8>("out of range integral type conversion attempted");
/// assert_eq!(error.to_type(), "u8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot cast `{from}` to `{to}`: {reason}")]
pub struct CastError {
    from: &'static str,
    to: &'static str,
    reason: Cow<'static, str>,
}

impl CastError {
    /// Creates a cast error from `I` to `O`.
    pub fn new<I, O>(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            from: type_name::<I>(),
            to: type_name::<O>(),
            reason: reason.into(),
        }
    }

    /// Name of the source type.
    pub fn from_type(&self) -> &'static str {
        self.from
    }

    /// Name of the target type.
    pub fn to_type(&self) -> &'static str {
        self.to
    }

    /// Why the conversion was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A value could not be narrowed to the requested type.
    #[error(transparent)]
    Cast(#[from] CastError),

    /// Configuration could not be parsed.
    #[error("invalid rulegraph configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias using the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
