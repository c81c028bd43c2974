//! Property contracts and the listener list shared by property implementations

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::identity::remove_by_identity;

/// Receives value changes of a [`ReadableProperty`].
pub trait ChangeListener<T> {
    /// Called with the property that changed, its previous value (`None` on
    /// registration) and the new one.
    ///
    /// `NodeId::of(property)` identifies the source when one listener is
    /// registered on several properties.
    fn property_changed(&self, property: &dyn ReadableProperty<T>, old: Option<&T>, new: &T);
}

impl<T, F> ChangeListener<T> for F
where
    F: Fn(&dyn ReadableProperty<T>, Option<&T>, &T),
{
    fn property_changed(&self, property: &dyn ReadableProperty<T>, old: Option<&T>, new: &T) {
        self(property, old, new);
    }
}

/// Shared change listener handle.
pub type ChangeListenerRef<T> = Rc<dyn ChangeListener<T>>;

/// Observable value.
pub trait ReadableProperty<T> {
    /// Returns the current value.
    fn value(&self) -> T;

    /// Registers `listener` and immediately delivers the current value to it,
    /// with no previous value.
    fn add_change_listener(&self, listener: ChangeListenerRef<T>);

    /// Removes one registration of `listener`, compared by identity.
    fn remove_change_listener(&self, listener: &ChangeListenerRef<T>);
}

/// Settable value.
pub trait WritableProperty<T> {
    /// Sets the value, notifying listeners when it changes.
    fn set_value(&self, value: T);
}

/// Shared readable property handle.
pub type ReadablePropertyRef<T> = Rc<dyn ReadableProperty<T>>;

/// Shared writable property handle.
pub type WritablePropertyRef<T> = Rc<dyn WritableProperty<T>>;

// ============================================================================
// LISTENER LIST
// ============================================================================

/// Ordered list of change listeners.
///
/// Notification iterates over a snapshot, so a listener may add or remove
/// listeners (itself included) while being notified.
pub struct ListenerList<T> {
    listeners: RefCell<Vec<ChangeListenerRef<T>>>,
}

impl<T> Default for ListenerList<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T> ListenerList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener`.
    pub fn add(&self, listener: ChangeListenerRef<T>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Removes the first registration of `listener`.
    pub fn remove(&self, listener: &ChangeListenerRef<T>) -> bool {
        remove_by_identity(&mut self.listeners.borrow_mut(), listener)
    }

    /// Notifies every listener of a change of `source`.
    pub fn notify(&self, source: &dyn ReadableProperty<T>, old: Option<&T>, new: &T) {
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            listener.property_changed(source, old, new);
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
