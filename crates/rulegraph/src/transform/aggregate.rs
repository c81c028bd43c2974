//! Boolean aggregators - AND/OR reduction of collected results
//!
//! Both aggregators accept any result convertible into `Option<bool>`, so
//! plain `bool` results and possibly-absent `Option<bool>` results reduce
//! the same way. The two edge cases are explicit [`AggregationDefaults`]:
//!
//! - an empty collection yields `empty_collection_value`,
//! - an absent element counts as `null_element_value`.
//!
//! Aggregation short-circuits over the collected values: AND stops at the
//! first `false`, OR at the first `true`.
//!
//! Each aggregator is also a [`Rule`] over `Vec<R>`, which lets a group
//! validator reduce collected field results directly.

use crate::foundation::{AggregationDefaults, Rule, Transformer};

/// Reduces `results`, stopping at the first value equal to `absorbing`.
fn reduce<I>(defaults: AggregationDefaults, results: I, absorbing: bool) -> bool
where
    I: IntoIterator,
    I::Item: Into<Option<bool>>,
{
    let mut results = results.into_iter().peekable();
    if results.peek().is_none() {
        return defaults.empty_collection_value;
    }

    let hit = results.any(|result| {
        result.into().unwrap_or(defaults.null_element_value) == absorbing
    });
    if hit { absorbing } else { !absorbing }
}

// ============================================================================
// AND
// ============================================================================

/// Logical conjunction of boolean results.
///
/// # Examples
///
/// ```rust,ignore
/// use rulegraph::transform::AndBooleanAggregator;
///
/// let and = AndBooleanAggregator::new();
/// assert!(and.aggregate([true, true]));
/// assert!(!and.aggregate([Some(true), None]));
/// assert!(and.aggregate(Vec::<bool>::new()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AndBooleanAggregator {
    defaults: AggregationDefaults,
}

impl AndBooleanAggregator {
    /// Creates an aggregator with the default edge-case values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator with explicit edge-case values.
    pub const fn with_defaults(defaults: AggregationDefaults) -> Self {
        Self { defaults }
    }

    /// Returns the edge-case values.
    pub fn defaults(&self) -> AggregationDefaults {
        self.defaults
    }

    /// Returns `true` iff no result is `false`.
    pub fn aggregate<I>(&self, results: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Option<bool>>,
    {
        reduce(self.defaults, results, false)
    }
}

impl<R: Into<Option<bool>>> Transformer<Vec<R>, bool> for AndBooleanAggregator {
    fn transform(&self, input: Vec<R>) -> bool {
        self.aggregate(input)
    }
}

impl<R: Into<Option<bool>> + Clone> Rule<Vec<R>, bool> for AndBooleanAggregator {
    fn validate(&self, data: &Vec<R>) -> bool {
        self.aggregate(data.iter().cloned())
    }
}

// ============================================================================
// OR
// ============================================================================

/// Logical disjunction of boolean results.
///
/// With the default edge-case values an empty collection is `true`, like
/// AND; configure [`AggregationDefaults`] for the classic `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrBooleanAggregator {
    defaults: AggregationDefaults,
}

impl OrBooleanAggregator {
    /// Creates an aggregator with the default edge-case values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator with explicit edge-case values.
    pub const fn with_defaults(defaults: AggregationDefaults) -> Self {
        Self { defaults }
    }

    /// Returns the edge-case values.
    pub fn defaults(&self) -> AggregationDefaults {
        self.defaults
    }

    /// Returns `true` iff at least one result is `true`.
    pub fn aggregate<I>(&self, results: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Option<bool>>,
    {
        reduce(self.defaults, results, true)
    }
}

impl<R: Into<Option<bool>>> Transformer<Vec<R>, bool> for OrBooleanAggregator {
    fn transform(&self, input: Vec<R>) -> bool {
        self.aggregate(input)
    }
}

impl<R: Into<Option<bool>> + Clone> Rule<Vec<R>, bool> for OrBooleanAggregator {
    fn validate(&self, data: &Vec<R>) -> bool {
        self.aggregate(data.iter().cloned())
    }
}
