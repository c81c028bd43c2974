//! SIMPLE validator - every trigger, every provider, every rule
//!
//! A [`SimpleValidator`] holds plain ordered lists of its four roles. Any
//! registered trigger firing runs a full pass: each data provider is pulled
//! once and every rule validates that datum. What reaches the result
//! handlers is decided by the [`ResultStrategy`]:
//!
//! - [`EachResult`]: every rule result, one by one
//! - [`Aggregate`]: the results of one datum reduced to a single value
//!
//! A validator without data providers logs a warning and does nothing. With
//! [`EachResult`], a missing rule or result handler does the same.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use rulegraph::prelude::*;
//!
//! let form = ResultAggregationValidator::aggregating(AndBooleanAggregator::new());
//! form.add_trigger(submit.clone());
//! form.add_data_provider(Rc::new(move || name.value()));
//! form.add_rule(Rc::new(StringLengthGreaterThanRule::new(0)));
//! form.add_rule(Rc::new(|name: &String| name.is_ascii()));
//! form.add_result_handler(Rc::new(|ok: &bool| println!("form valid: {ok}")));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use super::{ProcessTrigger, TriggerAdapter};
use crate::foundation::{
    BoxTransformer, DataProviderRef, Disposable, NodeId, ResultHandlerRef, RuleRef, Transformer,
    TriggerEvent, TriggerListener, TriggerRef, identity::remove_by_identity,
};

// ============================================================================
// STRATEGIES
// ============================================================================

/// How rule results of one datum reach the result handlers.
pub trait ResultStrategy<D, R> {
    /// Value handed to the result handlers.
    type Output;

    /// Validates `data` with `rules` and emits the handler inputs.
    fn process(&self, data: &D, rules: &[RuleRef<D, R>], emit: &mut dyn FnMut(&Self::Output));

    /// Returns `false`, after logging the gap, when a pass over these lists
    /// would have no effect and should be skipped.
    fn is_ready(&self, _rules: usize, _handlers: usize) -> bool {
        true
    }

    /// Returns this strategy as a disposable component, if it is one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

/// Emits every rule result as soon as it is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EachResult;

impl<D, R> ResultStrategy<D, R> for EachResult {
    type Output = R;

    fn process(&self, data: &D, rules: &[RuleRef<D, R>], emit: &mut dyn FnMut(&R)) {
        for rule in rules {
            emit(&rule.validate(data));
        }
    }

    fn is_ready(&self, rules: usize, handlers: usize) -> bool {
        if rules == 0 {
            warn!("no rule in validator");
            return false;
        }
        if handlers == 0 {
            warn!("no result handler in validator");
            return false;
        }
        true
    }
}

/// Collects all rule results of a datum and emits their aggregate.
///
/// A pass always runs: with no rule, the aggregator receives an empty
/// collection and its empty-collection value reaches the handlers.
pub struct Aggregate<R, O> {
    aggregator: BoxTransformer<Vec<R>, O>,
}

impl<R: 'static, O: 'static> Aggregate<R, O> {
    /// Creates a strategy reducing results with `aggregator`.
    pub fn new(aggregator: impl Transformer<Vec<R>, O> + 'static) -> Self {
        Self {
            aggregator: Box::new(aggregator),
        }
    }
}

impl<D, R, O> ResultStrategy<D, R> for Aggregate<R, O> {
    type Output = O;

    fn process(&self, data: &D, rules: &[RuleRef<D, R>], emit: &mut dyn FnMut(&O)) {
        let results = rules.iter().map(|rule| rule.validate(data)).collect();
        emit(&self.aggregator.transform(results));
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        self.aggregator.as_disposable()
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validator wiring every trigger to every data provider and rule.
pub struct SimpleValidator<D, R, S: ResultStrategy<D, R> = EachResult> {
    triggers: RefCell<Vec<TriggerRef>>,
    providers: RefCell<Vec<DataProviderRef<D>>>,
    rules: RefCell<Vec<RuleRef<D, R>>>,
    handlers: RefCell<Vec<ResultHandlerRef<S::Output>>>,
    strategy: S,
    listener: Rc<dyn TriggerListener>,
    disposed: Cell<bool>,
}

/// Simple validator dispatching one aggregated result per datum.
pub type ResultAggregationValidator<D, R, O> = SimpleValidator<D, R, Aggregate<R, O>>;

impl<D: 'static, R: 'static> SimpleValidator<D, R, EachResult> {
    /// Creates a validator dispatching every result.
    pub fn new() -> Rc<Self> {
        Self::with_strategy(EachResult)
    }
}

impl<D: 'static, R: 'static, O: 'static> SimpleValidator<D, R, Aggregate<R, O>> {
    /// Creates a validator dispatching the aggregate of each datum's results.
    pub fn aggregating(aggregator: impl Transformer<Vec<R>, O> + 'static) -> Rc<Self> {
        Self::with_strategy(Aggregate::new(aggregator))
    }
}

impl<D, R, S> SimpleValidator<D, R, S>
where
    D: 'static,
    R: 'static,
    S: ResultStrategy<D, R> + 'static,
    S::Output: 'static,
{
    /// Creates a validator with an explicit dispatch strategy.
    pub fn with_strategy(strategy: S) -> Rc<Self> {
        Rc::new_cyclic(|validator| Self {
            triggers: RefCell::new(Vec::new()),
            providers: RefCell::new(Vec::new()),
            rules: RefCell::new(Vec::new()),
            handlers: RefCell::new(Vec::new()),
            strategy,
            listener: Rc::new(TriggerAdapter::new(validator.clone())),
            disposed: Cell::new(false),
        })
    }

    /// Adds a trigger and registers the validator on it.
    pub fn add_trigger(&self, trigger: TriggerRef) {
        trigger.add_trigger_listener(Rc::clone(&self.listener));
        self.triggers.borrow_mut().push(trigger);
    }

    /// Removes `trigger` and detaches the validator from it.
    pub fn remove_trigger(&self, trigger: &TriggerRef) -> bool {
        let removed = remove_by_identity(&mut self.triggers.borrow_mut(), trigger);
        if removed {
            trigger.remove_trigger_listener(&self.listener);
        }
        removed
    }

    /// Adds a data provider.
    pub fn add_data_provider(&self, provider: DataProviderRef<D>) {
        self.providers.borrow_mut().push(provider);
    }

    /// Removes `provider`, compared by identity.
    pub fn remove_data_provider(&self, provider: &DataProviderRef<D>) -> bool {
        remove_by_identity(&mut self.providers.borrow_mut(), provider)
    }

    /// Adds a rule.
    pub fn add_rule(&self, rule: RuleRef<D, R>) {
        self.rules.borrow_mut().push(rule);
    }

    /// Removes `rule`, compared by identity.
    pub fn remove_rule(&self, rule: &RuleRef<D, R>) -> bool {
        remove_by_identity(&mut self.rules.borrow_mut(), rule)
    }

    /// Adds a result handler.
    pub fn add_result_handler(&self, handler: ResultHandlerRef<S::Output>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Removes `handler`, compared by identity.
    pub fn remove_result_handler(&self, handler: &ResultHandlerRef<S::Output>) -> bool {
        remove_by_identity(&mut self.handlers.borrow_mut(), handler)
    }

    /// Runs a full validation pass.
    pub fn process(&self) {
        let providers = self.providers.borrow().clone();
        if providers.is_empty() {
            warn!("no data provider in validator");
            return;
        }
        let rules = self.rules.borrow().clone();
        let handlers = self.handlers.borrow().clone();
        if !self.strategy.is_ready(rules.len(), handlers.len()) {
            return;
        }

        debug!(
            data_providers = providers.len(),
            rules = rules.len(),
            result_handlers = handlers.len(),
            "processing simple validator"
        );
        for provider in &providers {
            let data = provider.data();
            self.strategy.process(&data, &rules, &mut |output| {
                for handler in &handlers {
                    handler.handle_result(output);
                }
            });
        }
    }
}

impl<D, R, S> ProcessTrigger for SimpleValidator<D, R, S>
where
    D: 'static,
    R: 'static,
    S: ResultStrategy<D, R> + 'static,
    S::Output: 'static,
{
    fn process_trigger_event(&self, _event: &TriggerEvent) {
        self.process();
    }
}

impl<D, R, S: ResultStrategy<D, R>> Disposable for SimpleValidator<D, R, S> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }

        let triggers = std::mem::take(&mut *self.triggers.borrow_mut());
        let providers = std::mem::take(&mut *self.providers.borrow_mut());
        let rules = std::mem::take(&mut *self.rules.borrow_mut());
        let handlers = std::mem::take(&mut *self.handlers.borrow_mut());

        for trigger in &triggers {
            trigger.remove_trigger_listener(&self.listener);
        }

        let mut disposed = std::collections::HashSet::new();
        let mut dispose_once = |id: NodeId, disposable: Option<&dyn Disposable>| {
            if let Some(disposable) = disposable
                && disposed.insert(id)
            {
                disposable.dispose();
            }
        };
        for trigger in &triggers {
            dispose_once(NodeId::of_rc(trigger), trigger.as_disposable());
        }
        for provider in &providers {
            dispose_once(NodeId::of_rc(provider), provider.as_disposable());
        }
        for rule in &rules {
            dispose_once(NodeId::of_rc(rule), rule.as_disposable());
        }
        for handler in &handlers {
            dispose_once(NodeId::of_rc(handler), handler.as_disposable());
        }
        if let Some(strategy) = self.strategy.as_disposable() {
            strategy.dispose();
        }
    }
}
