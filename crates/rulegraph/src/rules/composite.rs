//! COMPOSITE rule - several rules reduced to one result
//!
//! A [`CompositeRule`] evaluates every sub-rule against the same datum, in
//! insertion order, then hands the collected results to its aggregator.
//! Sub-rules are not short-circuited; the aggregator may short-circuit over
//! the collected values.
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulegraph::rules::{CompositeRule, StringLengthGreaterThanRule};
//!
//! let rule = CompositeRule::and()
//!     .with_rule(StringLengthGreaterThanRule::new(2))
//!     .with_rule(|name: &String| name.chars().all(char::is_alphanumeric));
//!
//! assert!(rule.validate(&"alice".to_owned()));
//! assert!(!rule.validate(&"al".to_owned()));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

use crate::foundation::identity::remove_by_identity;
use crate::foundation::{AggregationDefaults, BoxTransformer, Disposable, Rule, RuleRef, Transformer};
use crate::transform::{AndBooleanAggregator, OrBooleanAggregator};

/// Rule aggregating the results of its sub-rules.
pub struct CompositeRule<D, R = bool, O = bool> {
    rules: RefCell<Vec<RuleRef<D, R>>>,
    aggregator: BoxTransformer<Vec<R>, O>,
    disposed: Cell<bool>,
}

impl<D: 'static, R: Into<Option<bool>> + 'static> CompositeRule<D, R, bool> {
    /// Creates an AND composite with the default edge-case values.
    pub fn and() -> Self {
        Self::new(AndBooleanAggregator::new())
    }

    /// Creates an AND composite with explicit edge-case values.
    pub fn and_with(defaults: AggregationDefaults) -> Self {
        Self::new(AndBooleanAggregator::with_defaults(defaults))
    }

    /// Creates an OR composite with the default edge-case values.
    pub fn or() -> Self {
        Self::new(OrBooleanAggregator::new())
    }

    /// Creates an OR composite with explicit edge-case values.
    pub fn or_with(defaults: AggregationDefaults) -> Self {
        Self::new(OrBooleanAggregator::with_defaults(defaults))
    }
}

impl<D: 'static, R: 'static, O: 'static> CompositeRule<D, R, O> {
    /// Creates an empty composite reducing results with `aggregator`.
    pub fn new(aggregator: impl Transformer<Vec<R>, O> + 'static) -> Self {
        Self {
            rules: RefCell::new(Vec::new()),
            aggregator: Box::new(aggregator),
            disposed: Cell::new(false),
        }
    }

    /// Adds a sub-rule, builder style.
    #[must_use]
    pub fn with_rule(self, rule: impl Rule<D, R> + 'static) -> Self {
        self.add_rule(Rc::new(rule));
        self
    }

    /// Appends a shared sub-rule.
    pub fn add_rule(&self, rule: RuleRef<D, R>) {
        self.rules.borrow_mut().push(rule);
    }

    /// Removes one occurrence of `rule`, compared by identity.
    pub fn remove_rule(&self, rule: &RuleRef<D, R>) -> bool {
        remove_by_identity(&mut self.rules.borrow_mut(), rule)
    }

    /// Returns the sub-rules in evaluation order.
    pub fn rules(&self) -> Vec<RuleRef<D, R>> {
        self.rules.borrow().clone()
    }

    /// Number of sub-rules.
    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    /// Returns `true` when there is no sub-rule.
    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }
}

impl<D, R, O> Rule<D, O> for CompositeRule<D, R, O> {
    fn validate(&self, data: &D) -> O {
        // A sub-rule may itself reach this composite; do not hold the borrow.
        let rules = self.rules.borrow().clone();
        trace!(rules = rules.len(), "evaluating composite rule");
        let results = rules.iter().map(|rule| rule.validate(data)).collect();
        self.aggregator.transform(results)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<D, R, O> Disposable for CompositeRule<D, R, O> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(aggregator) = self.aggregator.as_disposable() {
            aggregator.dispose();
        }
        let rules = std::mem::take(&mut *self.rules.borrow_mut());
        for rule in &rules {
            if let Some(rule) = rule.as_disposable() {
                rule.dispose();
            }
        }
    }
}
