//! Result handlers
//!
//! - [`ResultCollector`]: chains validators; a handler for one, a trigger
//!   and data provider for the next
//! - [`PropertyResultHandler`]: writes results into a writable property
//!
//! Any `Fn(&R)` closure is a result handler too.
//!
//! # Group validation
//!
//! Field validators each report into their own collector. A group validator
//! maps every collector as a trigger and as a data provider, so any field
//! result re-evaluates the group:
//!
//! ```rust,ignore
//! let collector = Rc::new(SimpleResultCollector::<bool>::new());
//! field_validator.map_rule(Some(&field_rule), Some(&(collector.clone() as ResultHandlerRef<bool>)));
//! group_inputs.add_data_provider(collector.clone());
//! group_validator.map_trigger(Some(&(collector.clone() as TriggerRef)), Some(&group_provider));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;

use tracing::trace;

use crate::binding::WritablePropertyRef;
use crate::foundation::{
    BoxTransformer, DataProvider, Disposable, ResultHandler, Transformer, Trigger, TriggerEvent,
    TriggerListener,
};
use crate::transform::CastTransformer;
use crate::trigger::TriggerSupport;

// ============================================================================
// RESULT COLLECTOR
// ============================================================================

/// Collects results of one validator and feeds them to another.
///
/// Handling a result stores it and fires an event naming the collector as
/// its source. Reading data transforms the last stored result; before any
/// result was handled, the transformer receives `None`.
pub struct ResultCollector<R, O> {
    support: TriggerSupport,
    last_result: RefCell<Option<R>>,
    transformer: BoxTransformer<Option<R>, O>,
    disposed: Cell<bool>,
}

/// Collector handing results through unchanged, wrapped in `Option`.
pub type SimpleResultCollector<T> = ResultCollector<T, Option<T>>;

impl<R: 'static, X: 'static> ResultCollector<R, Option<X>>
where
    X: TryFrom<R>,
    X::Error: Display,
{
    /// Creates a collector narrowing results with a silent [`CastTransformer`].
    pub fn new() -> Self {
        Self::with_transformer(CastTransformer::<R, X>::new())
    }
}

impl<R: 'static, X: 'static> Default for ResultCollector<R, Option<X>>
where
    X: TryFrom<R>,
    X::Error: Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static, O: 'static> ResultCollector<R, O> {
    /// Creates a collector applying `transformer` to the last result.
    pub fn with_transformer(transformer: impl Transformer<Option<R>, O> + 'static) -> Self {
        Self {
            support: TriggerSupport::new(),
            last_result: RefCell::new(None),
            transformer: Box::new(transformer),
            disposed: Cell::new(false),
        }
    }
}

impl<R: Clone, O> ResultCollector<R, O> {
    /// Returns the last handled result.
    pub fn last_result(&self) -> Option<R> {
        self.last_result.borrow().clone()
    }
}

impl<R: Clone, O> ResultHandler<R> for ResultCollector<R, O> {
    fn handle_result(&self, result: &R) {
        self.last_result.replace(Some(result.clone()));
        trace!("result collected");
        self.support.fire(&TriggerEvent::new(self));
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<R: Clone, O> DataProvider<O> for ResultCollector<R, O> {
    fn data(&self) -> O {
        let last = self.last_result.borrow().clone();
        self.transformer.transform(last)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<R, O> Trigger for ResultCollector<R, O> {
    fn add_trigger_listener(&self, listener: Rc<dyn TriggerListener>) {
        self.support.add(listener);
    }

    fn remove_trigger_listener(&self, listener: &Rc<dyn TriggerListener>) {
        self.support.remove(listener);
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<R, O> Disposable for ResultCollector<R, O> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(transformer) = self.transformer.as_disposable() {
            transformer.dispose();
        }
    }
}

// ============================================================================
// PROPERTY RESULT HANDLER
// ============================================================================

/// Writes every result into a writable property.
pub struct PropertyResultHandler<T> {
    property: WritablePropertyRef<T>,
}

impl<T> PropertyResultHandler<T> {
    /// Creates a handler writing into `property`.
    pub fn new(property: WritablePropertyRef<T>) -> Self {
        Self { property }
    }
}

impl<T: Clone> ResultHandler<T> for PropertyResultHandler<T> {
    fn handle_result(&self, result: &T) {
        self.property.set_value(result.clone());
    }
}
