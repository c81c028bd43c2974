//! Transformers and aggregators
//!
//! Pure conversions used between graph stages and inside bonds:
//!
//! - [`Identity`], [`Negate`], [`ToDisplayString`]: small stateless transformers
//! - [`ChainedTransformer`]: sequential, type-changing composition
//! - [`CastTransformer`]: policy-driven type narrowing
//! - [`AndBooleanAggregator`], [`OrBooleanAggregator`]: reduce collected results

pub mod aggregate;
pub mod basic;
pub mod cast;
pub mod chained;

pub use aggregate::{AndBooleanAggregator, OrBooleanAggregator};
pub use basic::{Identity, Negate, ToDisplayString};
pub use cast::CastTransformer;
pub use chained::ChainedTransformer;
