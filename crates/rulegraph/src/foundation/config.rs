//! Configuration types
//!
//! Edge-case policies of the engine are named, serializable values rather
//! than constants buried in the algorithms:
//!
//! - what a boolean aggregation returns for an empty collection,
//! - what an absent element counts as,
//! - what a failed cast does.
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulegraph::foundation::RuleGraphConfig;
//!
//! let config = RuleGraphConfig::from_json(r#"{ "cast_failure": "log_warning" }"#)?;
//! let all_valid = config.and_aggregator();
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::transform::{AndBooleanAggregator, CastTransformer, OrBooleanAggregator};

/// Value of a boolean aggregation over an empty collection, unless configured otherwise.
pub const DEFAULT_EMPTY_COLLECTION_VALUE: bool = true;

/// Value substituted for an absent element before aggregation, unless configured otherwise.
pub const DEFAULT_NULL_ELEMENT_VALUE: bool = false;

// ============================================================================
// AGGREGATION DEFAULTS
// ============================================================================

/// Edge-case values of a boolean aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationDefaults {
    /// Result for an empty collection.
    pub empty_collection_value: bool,
    /// Value an absent (`None`) element counts as.
    pub null_element_value: bool,
}

impl AggregationDefaults {
    /// Creates defaults with explicit values.
    pub const fn new(empty_collection_value: bool, null_element_value: bool) -> Self {
        Self {
            empty_collection_value,
            null_element_value,
        }
    }
}

impl Default for AggregationDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_EMPTY_COLLECTION_VALUE, DEFAULT_NULL_ELEMENT_VALUE)
    }
}

// ============================================================================
// CAST POLICY
// ============================================================================

/// What a [`CastTransformer`] does when a value cannot be narrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastPolicy {
    /// Produce an absent result silently.
    #[default]
    Ignore,
    /// Produce an absent result and log at WARN.
    LogWarning,
    /// Produce an absent result and log at ERROR.
    LogError,
    /// Hand the [`CastError`](super::CastError) to the caller.
    Propagate,
}

// ============================================================================
// ENGINE CONFIGURATION
// ============================================================================

/// Engine-wide policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleGraphConfig {
    /// Edge-case values for AND aggregation.
    pub and_defaults: AggregationDefaults,
    /// Edge-case values for OR aggregation.
    pub or_defaults: AggregationDefaults,
    /// Behavior of cast transformers on failure.
    pub cast_failure: CastPolicy,
}

impl RuleGraphConfig {
    /// Parses a configuration from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds an AND aggregator with the configured edge-case values.
    pub fn and_aggregator(&self) -> AndBooleanAggregator {
        AndBooleanAggregator::with_defaults(self.and_defaults)
    }

    /// Builds an OR aggregator with the configured edge-case values.
    pub fn or_aggregator(&self) -> OrBooleanAggregator {
        OrBooleanAggregator::with_defaults(self.or_defaults)
    }

    /// Builds a cast transformer with the configured failure policy.
    pub fn cast_transformer<I, O>(&self) -> CastTransformer<I, O> {
        CastTransformer::with_policy(self.cast_failure)
    }
}
