//! Rules
//!
//! - [`CompositeRule`]: AND/OR (or any aggregator) over sub-rules
//! - [`NotNullRule`]: presence check
//! - [`StringLengthGreaterThanRule`], [`StringLengthEqualToRule`]: string length checks
//!
//! Any `Fn(&D) -> R` closure is a rule too.

pub mod composite;
pub mod object;
pub mod string;

pub use composite::CompositeRule;
pub use object::NotNullRule;
pub use string::{StringLengthEqualToRule, StringLengthGreaterThanRule};
