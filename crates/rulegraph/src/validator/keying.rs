//! Result-handler keying strategies
//!
//! A [`MappableValidator`](super::MappableValidator) dispatches each result
//! to the handlers mapped under a key derived from the evaluation:
//!
//! - [`ByRule`]: the rule that produced the result (identity)
//! - [`ByResult`]: the result value itself (`Hash + Eq`, typically an enum)

use std::fmt::Debug;
use std::hash::Hash;

use crate::foundation::{Disposable, Node, NodeId, Rule};

/// Derives the handler-table key for a rule evaluation.
pub trait HandlerKeying<D, R> {
    /// Key of the rule-to-handler table.
    type Key: Hash + Eq + Clone + Debug;

    /// What the key denotes, for log messages.
    const LABEL: &'static str;

    /// Key under which the handlers for `result`, produced by `rule`, are mapped.
    fn key_for(rule: &Node<dyn Rule<D, R>>, result: &R) -> Self::Key;

    /// Key known before `rule` runs, so that a rule without handlers can be
    /// skipped. `None` when the key depends on the result.
    fn key_before_validation(_rule: &Node<dyn Rule<D, R>>) -> Option<Self::Key> {
        None
    }

    /// Identity and dispose hook of a key that is itself a graph node.
    fn disposable_key(_key: &Self::Key) -> Option<(NodeId, &dyn Disposable)> {
        None
    }
}

/// Handlers are mapped to rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByRule;

impl<D: 'static, R: 'static> HandlerKeying<D, R> for ByRule {
    type Key = Node<dyn Rule<D, R>>;

    const LABEL: &'static str = "rule";

    fn key_for(rule: &Node<dyn Rule<D, R>>, _result: &R) -> Self::Key {
        rule.clone()
    }

    fn key_before_validation(rule: &Node<dyn Rule<D, R>>) -> Option<Self::Key> {
        Some(rule.clone())
    }

    fn disposable_key(key: &Self::Key) -> Option<(NodeId, &dyn Disposable)> {
        key.as_disposable().map(|disposable| (key.id(), disposable))
    }
}

/// Handlers are mapped to result values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByResult;

impl<D, R> HandlerKeying<D, R> for ByResult
where
    R: Hash + Eq + Clone + Debug,
{
    type Key = R;

    const LABEL: &'static str = "result";

    fn key_for(_rule: &Node<dyn Rule<D, R>>, result: &R) -> Self::Key {
        result.clone()
    }
}
