//! Role traits of the validation graph
//!
//! A validation pass is wired from four roles:
//!
//! - [`Trigger`] fires [`TriggerEvent`]s at registered [`TriggerListener`]s.
//! - [`DataProvider`] is pulled for the value to validate.
//! - [`Rule`] computes a result from that value; it must be free of side effects.
//! - [`ResultHandler`] consumes the result; the only place side effects happen.
//!
//! [`Transformer`] and [`Aggregator`] convert values between stages, and
//! [`Disposable`] releases listeners and owned resources.
//!
//! All roles are single-threaded: nodes are shared through `Rc` and mutate
//! through interior mutability, so none of the graph types are `Send`.
//!
//! Closures implement the roles directly:
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use rulegraph::prelude::*;
//!
//! let provider: DataProviderRef<String> = Rc::new(|| String::from("alice"));
//! let rule: RuleRef<String, bool> = Rc::new(|name: &String| name.len() >= 3);
//! let handler: ResultHandlerRef<bool> = Rc::new(|valid: &bool| println!("valid: {valid}"));
//! ```

use std::rc::Rc;

use super::identity::NodeId;

// ============================================================================
// DISPOSAL
// ============================================================================

/// A component holding listeners or other resources that must be released.
///
/// `dispose` must be idempotent: calling it again is a no-op.
pub trait Disposable {
    /// Releases listeners and cascades to owned disposable components.
    fn dispose(&self);
}

// ============================================================================
// TRIGGER
// ============================================================================

/// Event fired by a [`Trigger`], naming its source by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    source: NodeId,
}

impl TriggerEvent {
    /// Creates an event whose source is `source`.
    ///
    /// Pass the trigger itself (`self`): when the trigger lives in an `Rc`,
    /// the id matches the one its mapping-table entry is keyed by.
    pub fn new<T: ?Sized>(source: &T) -> Self {
        Self {
            source: NodeId::of(source),
        }
    }

    /// Creates an event from an already known source id.
    pub fn from_id(source: NodeId) -> Self {
        Self { source }
    }

    /// Returns the identity of the trigger that fired.
    pub fn source(&self) -> NodeId {
        self.source
    }
}

/// Receives trigger events.
pub trait TriggerListener {
    /// Called synchronously every time a trigger the listener is registered on fires.
    fn trigger_fired(&self, event: &TriggerEvent);
}

impl<F> TriggerListener for F
where
    F: Fn(&TriggerEvent),
{
    fn trigger_fired(&self, event: &TriggerEvent) {
        self(event);
    }
}

/// Source of validation passes.
///
/// A trigger knows nothing about validation; it only notifies listeners.
pub trait Trigger {
    /// Registers a listener; the same listener may be registered more than once.
    fn add_trigger_listener(&self, listener: Rc<dyn TriggerListener>);

    /// Removes one registration of `listener`, compared by identity.
    fn remove_trigger_listener(&self, listener: &Rc<dyn TriggerListener>);

    /// Returns this trigger as a disposable component, if it is one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

// ============================================================================
// DATA PROVIDER
// ============================================================================

/// Pull-based source of the data to validate.
pub trait DataProvider<D> {
    /// Reads the current data. Called once per processed provider per pass.
    fn data(&self) -> D;

    /// Returns this provider as a disposable component, if it is one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

impl<D, F> DataProvider<D> for F
where
    F: Fn() -> D,
{
    fn data(&self) -> D {
        self()
    }
}

// ============================================================================
// RULE
// ============================================================================

/// Pure validation function.
///
/// Rules must be side-effect free: several rules see the same datum within
/// one pass, and composite rules are free to evaluate them in any order.
/// A panicking rule is a programming defect; the panic is not caught and
/// unwinds through the validator to whoever fired the trigger.
pub trait Rule<D, R> {
    /// Computes the validation result for `data`.
    fn validate(&self, data: &D) -> R;

    /// Returns this rule as a disposable component, if it is one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

impl<D, R, F> Rule<D, R> for F
where
    F: Fn(&D) -> R,
{
    fn validate(&self, data: &D) -> R {
        self(data)
    }
}

// ============================================================================
// RESULT HANDLER
// ============================================================================

/// Consumer of validation results (feedback).
pub trait ResultHandler<R> {
    /// Applies feedback for `result`.
    fn handle_result(&self, result: &R);

    /// Returns this handler as a disposable component, if it is one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

impl<R, F> ResultHandler<R> for F
where
    F: Fn(&R),
{
    fn handle_result(&self, result: &R) {
        self(result);
    }
}

// ============================================================================
// TRANSFORMER / AGGREGATOR
// ============================================================================

/// Pure conversion from `I` to `O`.
pub trait Transformer<I, O> {
    /// Converts `input`.
    fn transform(&self, input: I) -> O;

    /// Returns this transformer as a disposable component, if it is one.
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

impl<I, O, F> Transformer<I, O> for F
where
    F: Fn(I) -> O,
{
    fn transform(&self, input: I) -> O {
        self(input)
    }
}

/// Transformer reducing a collection of results to a single result.
pub trait Aggregator<R, O>: Transformer<Vec<R>, O> {}

impl<R, O, T> Aggregator<R, O> for T where T: Transformer<Vec<R>, O> + ?Sized {}

// ============================================================================
// SHARED HANDLES
// ============================================================================

/// Shared trigger handle.
pub type TriggerRef = Rc<dyn Trigger>;

/// Shared data provider handle.
pub type DataProviderRef<D> = Rc<dyn DataProvider<D>>;

/// Shared rule handle.
pub type RuleRef<D, R> = Rc<dyn Rule<D, R>>;

/// Shared result handler handle.
pub type ResultHandlerRef<R> = Rc<dyn ResultHandler<R>>;

/// Boxed transformer.
pub type BoxTransformer<I, O> = Box<dyn Transformer<I, O>>;
