//! MAPPABLE validator - explicit mapping tables between roles
//!
//! Three ordered one-to-many tables route a validation pass:
//!
//! ```text
//! trigger ──► [data provider] ──► [rule] ──► (rule | result) ──► [result handler]
//! ```
//!
//! When a mapped trigger fires, every data provider mapped to it is pulled
//! once, every rule mapped to that provider validates the same datum, and
//! each result goes to the handlers mapped under its key. Everything runs in
//! mapping-insertion order.
//!
//! A gap in the graph (no provider, no rule, or no handler) is not an error:
//! it is logged at WARN and the branch is skipped.
//!
//! # Absent arguments
//!
//! The `map_*` methods take `Option`s. A missing side turns the call into a
//! removal instead of failing:
//!
//! | key | value | effect |
//! |-----|-------|--------|
//! | `Some` | `Some` | append the mapping |
//! | `Some` | `None` | remove the key with all its values |
//! | `None` | `Some` | remove the value from every key |
//! | `None` | `None` | nothing; logged at WARN |
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use rulegraph::prelude::*;
//!
//! let validator = MappableValidator::<String, bool>::new();
//! let trigger = Rc::new(ManualTrigger::new());
//! let provider: DataProviderRef<String> = Rc::new(|| "alice".to_owned());
//! let rule: RuleRef<String, bool> = Rc::new(StringLengthGreaterThanRule::new(3));
//! let handler: ResultHandlerRef<bool> = Rc::new(|valid: &bool| println!("valid: {valid}"));
//!
//! validator.map_trigger(Some(&(trigger.clone() as TriggerRef)), Some(&provider));
//! validator.map_data_provider(Some(&provider), Some(&rule));
//! validator.map_rule(Some(&rule), Some(&handler));
//!
//! trigger.trigger(); // prints "valid: true"
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::keying::{ByResult, ByRule, HandlerKeying};
use super::{ProcessTrigger, TriggerAdapter};
use crate::foundation::{
    DataProvider, DataProviderRef, Disposable, Node, NodeId, ResultHandler, ResultHandlerRef,
    Rule, RuleRef, Trigger, TriggerEvent, TriggerListener, TriggerRef,
};
use crate::mapping::MappingTable;

type TriggerNode = Node<dyn Trigger>;
type ProviderNode<D> = Node<dyn DataProvider<D>>;
type RuleNode<D, R> = Node<dyn Rule<D, R>>;
type HandlerNode<R> = Node<dyn ResultHandler<R>>;

const BOTH_ABSENT: &str = "mapping call has no effect since both arguments are absent";

/// Validator routing triggers through explicit mapping tables.
pub struct MappableValidator<D, R, K: HandlerKeying<D, R> = ByRule> {
    triggers: RefCell<MappingTable<TriggerNode, ProviderNode<D>>>,
    rules: RefCell<MappingTable<ProviderNode<D>, RuleNode<D, R>>>,
    handlers: RefCell<MappingTable<K::Key, HandlerNode<R>>>,
    listener: Rc<dyn TriggerListener>,
    disposed: Cell<bool>,
}

/// Mappable validator dispatching by result value.
pub type ResultMappableValidator<D, R> = MappableValidator<D, R, ByResult>;

/// Identity-level copy of the three mapping tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSnapshot<K> {
    /// Trigger id to data provider ids.
    pub triggers: Vec<(NodeId, Vec<NodeId>)>,
    /// Data provider id to rule ids.
    pub data_providers: Vec<(NodeId, Vec<NodeId>)>,
    /// Handler key to result handler ids.
    pub result_handlers: Vec<(K, Vec<NodeId>)>,
}

fn ids<K: Clone, T: ?Sized>(table: &MappingTable<K, Node<T>>) -> Vec<(K, Vec<NodeId>)>
where
    K: Hash + Eq,
{
    table
        .iter()
        .map(|(key, values)| (key.clone(), values.iter().map(Node::id).collect()))
        .collect()
}

fn dispatch<R>(handlers: &[HandlerNode<R>], result: &R) {
    for handler in handlers {
        handler.handle_result(result);
    }
}

impl<D, R, K> MappableValidator<D, R, K>
where
    D: 'static,
    R: 'static,
    K: HandlerKeying<D, R> + 'static,
{
    /// Creates a validator with empty tables.
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|validator| Self {
            triggers: RefCell::new(MappingTable::new()),
            rules: RefCell::new(MappingTable::new()),
            handlers: RefCell::new(MappingTable::new()),
            listener: Rc::new(TriggerAdapter::new(validator.clone())),
            disposed: Cell::new(false),
        })
    }

    // ------------------------------------------------------------------------
    // trigger -> data provider
    // ------------------------------------------------------------------------

    /// Maps `provider` to `trigger`, or removes a side when the other is absent.
    ///
    /// The first mapping of a trigger registers the validator on it.
    pub fn map_trigger(&self, trigger: Option<&TriggerRef>, provider: Option<&DataProviderRef<D>>) {
        match (trigger, provider) {
            (Some(trigger), Some(provider)) => {
                let created = self
                    .triggers
                    .borrow_mut()
                    .insert(Node::from(trigger), Node::from(provider));
                if created {
                    trigger.add_trigger_listener(Rc::clone(&self.listener));
                }
                trace!(
                    trigger = ?NodeId::of_rc(trigger),
                    data_provider = ?NodeId::of_rc(provider),
                    "trigger mapped"
                );
            }
            (Some(trigger), None) => self.unmap_trigger(trigger),
            (None, Some(provider)) => self.unmap_data_provider_from_triggers(provider),
            (None, None) => warn!("{BOTH_ABSENT}"),
        }
    }

    /// Removes `trigger` with all its data providers and detaches from it.
    pub fn unmap_trigger(&self, trigger: &TriggerRef) {
        let removed = self.triggers.borrow_mut().remove_key(&NodeId::of_rc(trigger));
        if removed.is_some() {
            trigger.remove_trigger_listener(&self.listener);
            trace!(trigger = ?NodeId::of_rc(trigger), "trigger unmapped");
        }
    }

    /// Removes one mapping of `provider` under `trigger`.
    ///
    /// The trigger stays mapped, possibly to nothing.
    pub fn unmap_trigger_data_provider(
        &self,
        trigger: &TriggerRef,
        provider: &DataProviderRef<D>,
    ) -> bool {
        self.triggers
            .borrow_mut()
            .remove_mapping(&NodeId::of_rc(trigger), &Node::from(provider))
    }

    /// Removes `provider` from the list of every trigger.
    pub fn unmap_data_provider_from_triggers(&self, provider: &DataProviderRef<D>) {
        let count = self.triggers.borrow_mut().remove_value(&Node::from(provider));
        trace!(
            data_provider = ?NodeId::of_rc(provider),
            triggers = count,
            "data provider unmapped from triggers"
        );
    }

    // ------------------------------------------------------------------------
    // data provider -> rule
    // ------------------------------------------------------------------------

    /// Maps `rule` to `provider`, or removes a side when the other is absent.
    pub fn map_data_provider(
        &self,
        provider: Option<&DataProviderRef<D>>,
        rule: Option<&RuleRef<D, R>>,
    ) {
        match (provider, rule) {
            (Some(provider), Some(rule)) => {
                self.rules
                    .borrow_mut()
                    .insert(Node::from(provider), Node::from(rule));
                trace!(
                    data_provider = ?NodeId::of_rc(provider),
                    rule = ?NodeId::of_rc(rule),
                    "data provider mapped"
                );
            }
            (Some(provider), None) => self.unmap_data_provider(provider),
            (None, Some(rule)) => self.unmap_rule_from_data_providers(rule),
            (None, None) => warn!("{BOTH_ABSENT}"),
        }
    }

    /// Removes `provider` with all its rules.
    pub fn unmap_data_provider(&self, provider: &DataProviderRef<D>) {
        self.rules.borrow_mut().remove_key(&NodeId::of_rc(provider));
    }

    /// Removes one mapping of `rule` under `provider`.
    pub fn unmap_data_provider_rule(
        &self,
        provider: &DataProviderRef<D>,
        rule: &RuleRef<D, R>,
    ) -> bool {
        self.rules
            .borrow_mut()
            .remove_mapping(&NodeId::of_rc(provider), &Node::from(rule))
    }

    /// Removes `rule` from the list of every data provider.
    pub fn unmap_rule_from_data_providers(&self, rule: &RuleRef<D, R>) {
        self.rules.borrow_mut().remove_value(&Node::from(rule));
    }

    // ------------------------------------------------------------------------
    // key -> result handler
    // ------------------------------------------------------------------------

    /// Maps `handler` under `key`, or removes a side when the other is absent.
    pub fn map_key(&self, key: Option<K::Key>, handler: Option<&ResultHandlerRef<R>>) {
        match (key, handler) {
            (Some(key), Some(handler)) => {
                trace!(key = ?key, result_handler = ?NodeId::of_rc(handler), "result handler mapped");
                self.handlers.borrow_mut().insert(key, Node::from(handler));
            }
            (Some(key), None) => self.unmap_key(&key),
            (None, Some(handler)) => self.unmap_result_handler(handler),
            (None, None) => warn!("{BOTH_ABSENT}"),
        }
    }

    /// Removes `key` with all its result handlers.
    pub fn unmap_key(&self, key: &K::Key) {
        self.handlers.borrow_mut().remove_key(key);
    }

    /// Removes one mapping of `handler` under `key`.
    pub fn unmap_key_handler(&self, key: &K::Key, handler: &ResultHandlerRef<R>) -> bool {
        self.handlers
            .borrow_mut()
            .remove_mapping(key, &Node::from(handler))
    }

    /// Removes `handler` from the list of every key.
    pub fn unmap_result_handler(&self, handler: &ResultHandlerRef<R>) {
        self.handlers.borrow_mut().remove_value(&Node::from(handler));
    }

    // ------------------------------------------------------------------------
    // processing
    // ------------------------------------------------------------------------

    /// Runs a validation pass as if `trigger` had fired.
    pub fn process_trigger(&self, trigger: &TriggerRef) {
        self.process_trigger_id(NodeId::of_rc(trigger));
    }

    fn process_trigger_id(&self, trigger: NodeId) {
        let providers = self.triggers.borrow().snapshot_values(&trigger);
        if providers.is_empty() {
            warn!(trigger = ?trigger, "no data provider mapped to trigger");
            return;
        }
        debug!(trigger = ?trigger, data_providers = providers.len(), "processing trigger");
        for provider in &providers {
            self.process_provider(provider);
        }
    }

    /// Pulls `provider` once and validates the datum with every mapped rule.
    pub fn process_data_provider(&self, provider: &DataProviderRef<D>) {
        self.process_provider(&Node::from(provider));
    }

    fn process_provider(&self, provider: &ProviderNode<D>) {
        let rules = self.rules.borrow().snapshot_values(provider);
        if rules.is_empty() {
            warn!(data_provider = ?provider.id(), "no rule mapped to data provider");
            return;
        }

        let data = provider.data();
        for rule in &rules {
            if let Some(key) = K::key_before_validation(rule) {
                let Some(handlers) = self.handlers_for(&key) else {
                    continue;
                };
                let result = rule.validate(&data);
                dispatch(&handlers, &result);
            } else {
                let result = rule.validate(&data);
                self.process_result(&K::key_for(rule, &result), &result);
            }
        }
    }

    /// Hands `result` to every handler mapped under `key`.
    pub fn process_result(&self, key: &K::Key, result: &R) {
        if let Some(handlers) = self.handlers_for(key) {
            dispatch(&handlers, result);
        }
    }

    fn handlers_for(&self, key: &K::Key) -> Option<Vec<HandlerNode<R>>> {
        let handlers = self.handlers.borrow().snapshot_values(key);
        if handlers.is_empty() {
            warn!(key = ?key, "no result handler mapped to {}", K::LABEL);
            return None;
        }
        Some(handlers)
    }

    /// Copies the identities held by the three tables.
    pub fn snapshot(&self) -> MappingSnapshot<K::Key> {
        MappingSnapshot {
            triggers: ids(&self.triggers.borrow())
                .into_iter()
                .map(|(trigger, providers)| (trigger.id(), providers))
                .collect(),
            data_providers: ids(&self.rules.borrow())
                .into_iter()
                .map(|(provider, rules)| (provider.id(), rules))
                .collect(),
            result_handlers: ids(&self.handlers.borrow()),
        }
    }
}

impl<D: 'static, R: 'static> MappableValidator<D, R, ByRule> {
    /// Maps `handler` to `rule`, or removes a side when the other is absent.
    pub fn map_rule(&self, rule: Option<&RuleRef<D, R>>, handler: Option<&ResultHandlerRef<R>>) {
        self.map_key(rule.map(Node::from), handler);
    }

    /// Removes `rule` with all its result handlers.
    pub fn unmap_rule(&self, rule: &RuleRef<D, R>) {
        self.unmap_key(&Node::from(rule));
    }

    /// Removes one mapping of `handler` under `rule`.
    pub fn unmap_rule_handler(&self, rule: &RuleRef<D, R>, handler: &ResultHandlerRef<R>) -> bool {
        self.unmap_key_handler(&Node::from(rule), handler)
    }
}

impl<D, R> MappableValidator<D, R, ByResult>
where
    D: 'static,
    R: Hash + Eq + Clone + Debug + 'static,
{
    /// Maps `handler` to `result`, or removes a side when the other is absent.
    pub fn map_result(&self, result: Option<R>, handler: Option<&ResultHandlerRef<R>>) {
        self.map_key(result, handler);
    }

    /// Removes `result` with all its result handlers.
    pub fn unmap_result(&self, result: &R) {
        self.unmap_key(result);
    }
}

impl<D, R, K> ProcessTrigger for MappableValidator<D, R, K>
where
    D: 'static,
    R: 'static,
    K: HandlerKeying<D, R> + 'static,
{
    fn process_trigger_event(&self, event: &TriggerEvent) {
        self.process_trigger_id(event.source());
    }
}

impl<D, R, K: HandlerKeying<D, R>> Disposable for MappableValidator<D, R, K> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }

        let triggers = std::mem::take(&mut *self.triggers.borrow_mut());
        let rules = std::mem::take(&mut *self.rules.borrow_mut());
        let handlers = std::mem::take(&mut *self.handlers.borrow_mut());

        for trigger in triggers.keys() {
            trigger.remove_trigger_listener(&self.listener);
        }

        let mut disposed = HashSet::new();
        let mut dispose_once = |id: NodeId, disposable: Option<&dyn Disposable>| {
            if let Some(disposable) = disposable
                && disposed.insert(id)
            {
                disposable.dispose();
            }
        };
        for trigger in triggers.keys() {
            dispose_once(trigger.id(), trigger.as_disposable());
        }
        for provider in triggers.all_values().chain(rules.keys()) {
            dispose_once(provider.id(), provider.as_disposable());
        }
        for rule in rules.all_values() {
            dispose_once(rule.id(), rule.as_disposable());
        }
        for (id, key) in handlers.keys().filter_map(K::disposable_key) {
            dispose_once(id, Some(key));
        }
        for handler in handlers.all_values() {
            dispose_once(handler.id(), handler.as_disposable());
        }
        debug!(disposed = disposed.len(), "mappable validator disposed");
    }
}
