//! Validators - the trigger / data provider / rule / result handler engines
//!
//! - [`MappableValidator`]: explicit many-to-many mapping tables between the
//!   four roles; handlers keyed by rule ([`ByRule`]) or by result
//!   ([`ByResult`]).
//! - [`SimpleValidator`]: every trigger processes every data provider with
//!   every rule; results dispatched one by one ([`EachResult`]) or reduced
//!   first ([`Aggregate`], see [`ResultAggregationValidator`]).
//!
//! Validators live in an `Rc` and register a shared listener on their
//! triggers. A validation pass runs synchronously on the thread that fired
//! the trigger; panics from rules or handlers are not caught.

pub mod keying;
pub mod mappable;
pub mod simple;

use std::rc::Weak;

use crate::foundation::{TriggerEvent, TriggerListener};

pub use keying::{ByResult, ByRule, HandlerKeying};
pub use mappable::{MappableValidator, MappingSnapshot, ResultMappableValidator};
pub use simple::{Aggregate, EachResult, ResultAggregationValidator, ResultStrategy, SimpleValidator};

/// Validator side of a trigger registration.
pub(crate) trait ProcessTrigger {
    fn process_trigger_event(&self, event: &TriggerEvent);
}

/// Listener registered on triggers; holds its validator weakly so that
/// triggers do not keep validators alive.
pub(crate) struct TriggerAdapter<V> {
    validator: Weak<V>,
}

impl<V> TriggerAdapter<V> {
    pub(crate) fn new(validator: Weak<V>) -> Self {
        Self { validator }
    }
}

impl<V: ProcessTrigger> TriggerListener for TriggerAdapter<V> {
    fn trigger_fired(&self, event: &TriggerEvent) {
        if let Some(validator) = self.validator.upgrade() {
            validator.process_trigger_event(event);
        }
    }
}
