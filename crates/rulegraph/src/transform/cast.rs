//! CAST transformer - type narrowing at graph boundaries
//!
//! [`CastTransformer`] converts `Option<I>` into `Option<O>` through
//! [`TryFrom`]. An absent input stays absent. A failed conversion is handled
//! according to its [`CastPolicy`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulegraph::foundation::CastPolicy;
//! use rulegraph::transform::CastTransformer;
//!
//! let narrow = CastTransformer::<i64, u8>::with_policy(CastPolicy::LogWarning);
//! assert_eq!(narrow.transform(Some(200)), Some(200));
//! assert_eq!(narrow.transform(Some(-1)), None); // logged at WARN
//! ```

use std::fmt;
use std::marker::PhantomData;

use tracing::{error, warn};

use crate::foundation::{CastError, CastPolicy, Result, Transformer};

/// Narrowing transformer from `I` to `O`.
///
/// With [`CastPolicy::Propagate`], the infallible [`Transformer`] path panics
/// with the [`CastError`] as payload; use
/// [`try_transform`](Self::try_transform) to receive it as a value instead.
pub struct CastTransformer<I, O> {
    policy: CastPolicy,
    _types: PhantomData<fn(I) -> O>,
}

impl<I, O> CastTransformer<I, O> {
    /// Creates a transformer that silently yields `None` on failure.
    pub fn new() -> Self {
        Self::with_policy(CastPolicy::Ignore)
    }

    /// Creates a transformer with the given failure policy.
    pub fn with_policy(policy: CastPolicy) -> Self {
        Self {
            policy,
            _types: PhantomData,
        }
    }

    /// Returns the failure policy.
    pub fn policy(&self) -> CastPolicy {
        self.policy
    }
}

impl<I, O> Default for CastTransformer<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> Clone for CastTransformer<I, O> {
    fn clone(&self) -> Self {
        Self::with_policy(self.policy)
    }
}

impl<I, O> fmt::Debug for CastTransformer<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CastTransformer")
            .field("from", &std::any::type_name::<I>())
            .field("to", &std::any::type_name::<O>())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<I, O> CastTransformer<I, O>
where
    O: TryFrom<I>,
    O::Error: fmt::Display,
{
    /// Converts `input`, ignoring the policy.
    pub fn try_cast(&self, input: I) -> Result<O> {
        O::try_from(input).map_err(|e| CastError::new::<I, O>(e.to_string()).into())
    }

    /// Converts `input` applying the policy.
    ///
    /// Only [`CastPolicy::Propagate`] turns a failed conversion into an error;
    /// the other policies return `Ok(None)`.
    pub fn try_transform(&self, input: Option<I>) -> Result<Option<O>> {
        Ok(self.apply_policy(input)?)
    }

    fn apply_policy(&self, input: Option<I>) -> Result<Option<O>, CastError> {
        let Some(input) = input else {
            return Ok(None);
        };

        match O::try_from(input) {
            Ok(output) => Ok(Some(output)),
            Err(e) => {
                let cast_error = CastError::new::<I, O>(e.to_string());
                match self.policy {
                    CastPolicy::Ignore => Ok(None),
                    CastPolicy::LogWarning => {
                        warn!(error = %cast_error, "cast failed, value dropped");
                        Ok(None)
                    }
                    CastPolicy::LogError => {
                        error!(error = %cast_error, "cast failed, value dropped");
                        Ok(None)
                    }
                    CastPolicy::Propagate => Err(cast_error),
                }
            }
        }
    }
}

impl<I, O> Transformer<Option<I>, Option<O>> for CastTransformer<I, O>
where
    O: TryFrom<I>,
    O::Error: fmt::Display,
{
    fn transform(&self, input: Option<I>) -> Option<O> {
        match self.apply_policy(input) {
            Ok(output) => output,
            Err(cast_error) => std::panic::panic_any(cast_error),
        }
    }
}
