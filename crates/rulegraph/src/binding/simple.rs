//! Basic read/write property

use std::cell::RefCell;
use std::fmt;

use tracing::trace;

use super::guard::ReentrancyGuard;
use super::property::{ChangeListenerRef, ListenerList, ReadableProperty, WritableProperty};

/// Read/write property holding a single value.
///
/// Listeners are notified only when the new value differs from the current
/// one, and a write arriving while another write on the same property is
/// in progress is dropped. Together these make two opposing bonds between a
/// pair of properties settle instead of recursing.
///
/// # Examples
///
/// ```rust,ignore
/// use rulegraph::binding::{ReadableProperty, SimpleProperty, WritableProperty};
///
/// let count = SimpleProperty::new(1);
/// count.set_value(2);
/// assert_eq!(count.value(), 2);
/// ```
pub struct SimpleProperty<T> {
    value: RefCell<T>,
    listeners: ListenerList<T>,
    guard: ReentrancyGuard,
}

impl<T> SimpleProperty<T> {
    /// Creates a property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            listeners: ListenerList::new(),
            guard: ReentrancyGuard::new(),
        }
    }

    /// Number of registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Default> Default for SimpleProperty<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SimpleProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleProperty")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone> ReadableProperty<T> for SimpleProperty<T> {
    fn value(&self) -> T {
        self.value.borrow().clone()
    }

    fn add_change_listener(&self, listener: ChangeListenerRef<T>) {
        self.listeners.add(listener.clone());
        let current = self.value();
        listener.property_changed(self, None, &current);
    }

    fn remove_change_listener(&self, listener: &ChangeListenerRef<T>) {
        self.listeners.remove(listener);
    }
}

impl<T: Clone + PartialEq> WritableProperty<T> for SimpleProperty<T> {
    fn set_value(&self, value: T) {
        let Some(_token) = self.guard.enter() else {
            trace!("re-entrant write dropped");
            return;
        };

        if *self.value.borrow() == value {
            return;
        }
        let old = self.value.replace(value.clone());
        self.listeners.notify(self, Some(&old), &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::NodeId;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn recorder<T: Clone + 'static>() -> (ChangeListenerRef<T>, Rc<RefCell<Vec<(Option<T>, T)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: ChangeListenerRef<T> =
            Rc::new(move |_: &dyn ReadableProperty<T>, old: Option<&T>, new: &T| {
                sink.borrow_mut().push((old.cloned(), new.clone()));
            });
        (listener, seen)
    }

    #[test]
    fn test_registration_delivers_current_value() {
        let property = SimpleProperty::new(5);
        let (listener, seen) = recorder();

        property.add_change_listener(listener);

        assert_eq!(*seen.borrow(), vec![(None, 5)]);
    }

    #[test]
    fn test_equal_value_is_not_notified() {
        let property = SimpleProperty::new(String::from("a"));
        let (listener, seen) = recorder();
        property.add_change_listener(listener);

        property.set_value("a".into());
        property.set_value("b".into());

        assert_eq!(
            *seen.borrow(),
            vec![(None, "a".to_owned()), (Some("a".to_owned()), "b".to_owned())]
        );
    }

    #[test]
    fn test_removed_listener_is_silent() {
        let property = SimpleProperty::new(0);
        let (listener, seen) = recorder();
        property.add_change_listener(listener.clone());
        property.remove_change_listener(&listener);

        property.set_value(1);

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(property.listener_count(), 0);
    }

    #[test]
    fn test_reentrant_write_is_dropped() {
        let property = Rc::new(SimpleProperty::new(0));
        let weak = Rc::downgrade(&property);
        let echo: ChangeListenerRef<i32> =
            Rc::new(move |_: &dyn ReadableProperty<i32>, _: Option<&i32>, new: &i32| {
                if let Some(property) = weak.upgrade() {
                    property.set_value(new + 100);
                }
            });
        property.add_change_listener(echo);
        assert_eq!(property.value(), 100);

        property.set_value(1);
        assert_eq!(property.value(), 1);
    }

    #[test]
    fn test_shared_listener_sees_which_property_changed() {
        let width = Rc::new(SimpleProperty::new(1));
        let height = Rc::new(SimpleProperty::new(2));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: ChangeListenerRef<i32> =
            Rc::new(move |source: &dyn ReadableProperty<i32>, _: Option<&i32>, new: &i32| {
                sink.borrow_mut().push((NodeId::of(source), source.value(), *new));
            });
        width.add_change_listener(Rc::clone(&listener));
        height.add_change_listener(listener);
        seen.borrow_mut().clear();

        height.set_value(20);
        width.set_value(10);

        assert_eq!(
            *seen.borrow(),
            vec![
                (NodeId::of_rc(&height), 20, 20),
                (NodeId::of_rc(&width), 10, 10),
            ]
        );
    }
}
