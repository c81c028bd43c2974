//! Triggers
//!
//! - [`TriggerSupport`]: listener list that concrete triggers delegate to
//! - [`ManualTrigger`]: fires when told to
//! - [`PropertyChangeTrigger`]: fires whenever a readable property changes

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::binding::{ChangeListener, ChangeListenerRef, ReadableProperty, ReadablePropertyRef};
use crate::foundation::identity::remove_by_identity;
use crate::foundation::{Disposable, Trigger, TriggerEvent, TriggerListener};

// ============================================================================
// TRIGGER SUPPORT
// ============================================================================

/// Ordered list of trigger listeners.
///
/// Firing iterates over a snapshot, so listeners may register or remove
/// listeners while an event is being delivered.
#[derive(Default)]
pub struct TriggerSupport {
    listeners: RefCell<Vec<Rc<dyn TriggerListener>>>,
}

impl TriggerSupport {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener`.
    pub fn add(&self, listener: Rc<dyn TriggerListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Removes the first registration of `listener`, compared by identity.
    pub fn remove(&self, listener: &Rc<dyn TriggerListener>) -> bool {
        remove_by_identity(&mut self.listeners.borrow_mut(), listener)
    }

    /// Delivers `event` to every registered listener, in registration order.
    pub fn fire(&self, event: &TriggerEvent) {
        let listeners = self.listeners.borrow().clone();
        trace!(source = ?event.source(), listeners = listeners.len(), "trigger fired");
        for listener in &listeners {
            listener.trigger_fired(event);
        }
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Removes every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

// ============================================================================
// MANUAL TRIGGER
// ============================================================================

/// Trigger fired explicitly by the application.
///
/// # Examples
///
/// ```rust,ignore
/// use std::rc::Rc;
/// use rulegraph::trigger::ManualTrigger;
///
/// let submit = Rc::new(ManualTrigger::new());
/// validator.map_trigger(Some(&(submit.clone() as TriggerRef)), Some(&provider));
/// submit.trigger();
/// ```
#[derive(Default)]
pub struct ManualTrigger {
    support: TriggerSupport,
}

impl ManualTrigger {
    /// Creates a trigger without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires an event whose source is this trigger.
    pub fn trigger(&self) {
        self.support.fire(&TriggerEvent::new(self));
    }

    /// Fires a caller-supplied event.
    pub fn trigger_with(&self, event: &TriggerEvent) {
        self.support.fire(event);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.support.len()
    }
}

impl Trigger for ManualTrigger {
    fn add_trigger_listener(&self, listener: Rc<dyn TriggerListener>) {
        self.support.add(listener);
    }

    fn remove_trigger_listener(&self, listener: &Rc<dyn TriggerListener>) {
        self.support.remove(listener);
    }
}

// ============================================================================
// PROPERTY CHANGE TRIGGER
// ============================================================================

/// Trigger fired every time a readable property changes.
///
/// The property's current value is delivered when the trigger attaches, so
/// the trigger attaches before anyone can listen and the first event fired
/// is the first real change. Disposing detaches it from the property.
pub struct PropertyChangeTrigger<T> {
    support: TriggerSupport,
    property: ReadablePropertyRef<T>,
    listener: ChangeListenerRef<T>,
    disposed: Cell<bool>,
}

struct PropertyAdapter<T> {
    trigger: Weak<PropertyChangeTrigger<T>>,
}

impl<T> ChangeListener<T> for PropertyAdapter<T> {
    fn property_changed(&self, _property: &dyn ReadableProperty<T>, old: Option<&T>, _new: &T) {
        // Registration (no previous value) is not a change.
        if old.is_none() {
            return;
        }
        if let Some(trigger) = self.trigger.upgrade() {
            trigger.support.fire(&TriggerEvent::new(&*trigger));
        }
    }
}

impl<T: 'static> PropertyChangeTrigger<T> {
    /// Creates a trigger following `property`.
    pub fn new(property: ReadablePropertyRef<T>) -> Rc<Self> {
        let trigger = Rc::new_cyclic(|weak| Self {
            support: TriggerSupport::new(),
            property,
            listener: Rc::new(PropertyAdapter {
                trigger: weak.clone(),
            }),
            disposed: Cell::new(false),
        });
        trigger
            .property
            .add_change_listener(Rc::clone(&trigger.listener));
        trigger
    }
}

impl<T> Trigger for PropertyChangeTrigger<T> {
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

impl<T> Disposable for PropertyChangeTrigger<T> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.property.remove_change_listener(&self.listener);
        self.support.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{SimpleProperty, WritableProperty};
    use crate::foundation::{NodeId, TriggerRef};

    fn counting_listener() -> (Rc<dyn TriggerListener>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let listener: Rc<dyn TriggerListener> =
            Rc::new(move |_: &TriggerEvent| sink.set(sink.get() + 1));
        (listener, count)
    }

    #[test]
    fn test_manual_trigger_names_itself_as_source() {
        let trigger = Rc::new(ManualTrigger::new());
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        trigger.add_trigger_listener(Rc::new(move |event: &TriggerEvent| {
            sink.set(Some(event.source()));
        }));

        trigger.trigger();

        let as_dyn: TriggerRef = trigger;
        assert_eq!(seen.get(), Some(NodeId::of_rc(&as_dyn)));
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let trigger = ManualTrigger::new();
        let (listener, count) = counting_listener();
        trigger.add_trigger_listener(Rc::clone(&listener));
        trigger.trigger();
        trigger.remove_trigger_listener(&listener);
        trigger.trigger();

        assert_eq!(count.get(), 1);
        assert_eq!(trigger.listener_count(), 0);
    }

    #[test]
    fn test_property_change_trigger() {
        let property = Rc::new(SimpleProperty::new(1));
        let trigger = PropertyChangeTrigger::<i32>::new(property.clone());
        let (listener, count) = counting_listener();
        trigger.add_trigger_listener(listener);

        property.set_value(2);
        property.set_value(2);
        property.set_value(3);
        assert_eq!(count.get(), 2);

        trigger.dispose();
        property.set_value(4);
        assert_eq!(count.get(), 2);
        assert_eq!(property.listener_count(), 0);
    }
}
