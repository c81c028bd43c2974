//! Property written with one type and read as another

use std::cell::{Cell, RefCell};

use tracing::trace;

use super::guard::ReentrancyGuard;
use super::property::{ChangeListenerRef, ListenerList, ReadableProperty, WritableProperty};
use crate::foundation::{BoxTransformer, Disposable, Transformer};

/// Property accepting `I` and exposing the transformed `O`.
///
/// Writes are guarded like [`SimpleProperty`](super::SimpleProperty), and
/// listeners are notified only when the transformed value changes.
///
/// # Examples
///
/// ```rust,ignore
/// use rulegraph::binding::{ReadableProperty, TransformedProperty, WritableProperty};
///
/// let length = TransformedProperty::new(|s: String| s.len(), String::new());
/// length.set_value("four".into());
/// assert_eq!(length.value(), 4);
/// ```
pub struct TransformedProperty<I, O> {
    transformer: BoxTransformer<I, O>,
    value: RefCell<O>,
    listeners: ListenerList<O>,
    guard: ReentrancyGuard,
    disposed: Cell<bool>,
}

impl<I: 'static, O: 'static> TransformedProperty<I, O> {
    /// Creates a property whose value is `transformer(initial)`.
    pub fn new(transformer: impl Transformer<I, O> + 'static, initial: I) -> Self {
        let value = transformer.transform(initial);
        Self {
            transformer: Box::new(transformer),
            value: RefCell::new(value),
            listeners: ListenerList::new(),
            guard: ReentrancyGuard::new(),
            disposed: Cell::new(false),
        }
    }
}

impl<I, O: Clone> ReadableProperty<O> for TransformedProperty<I, O> {
    fn value(&self) -> O {
        self.value.borrow().clone()
    }

    fn add_change_listener(&self, listener: ChangeListenerRef<O>) {
        self.listeners.add(listener.clone());
        let current = self.value();
        listener.property_changed(self, None, &current);
    }

    fn remove_change_listener(&self, listener: &ChangeListenerRef<O>) {
        self.listeners.remove(listener);
    }
}

impl<I, O: Clone + PartialEq> WritableProperty<I> for TransformedProperty<I, O> {
    fn set_value(&self, value: I) {
        let Some(_token) = self.guard.enter() else {
            trace!("re-entrant write dropped");
            return;
        };

        let value = self.transformer.transform(value);
        if *self.value.borrow() == value {
            return;
        }
        let old = self.value.replace(value.clone());
        self.listeners.notify(self, Some(&old), &value);
    }
}

impl<I, O> Disposable for TransformedProperty<I, O> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.listeners.clear();
        if let Some(transformer) = self.transformer.as_disposable() {
            transformer.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Halve(Rc<Cell<u32>>);

    impl Transformer<i32, i32> for Halve {
        fn transform(&self, input: i32) -> i32 {
            input / 2
        }

        fn as_disposable(&self) -> Option<&dyn Disposable> {
            Some(self)
        }
    }

    impl Disposable for Halve {
        fn dispose(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_notifies_only_on_transformed_change() {
        let property = TransformedProperty::new(|n: i32| n / 10, 0);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        property.add_change_listener(Rc::new(
            move |_: &dyn ReadableProperty<i32>, _: Option<&i32>, _: &i32| {
                counter.set(counter.get() + 1);
            },
        ));

        property.set_value(5);
        assert_eq!(property.value(), 0);
        property.set_value(25);
        assert_eq!(property.value(), 2);

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_dispose_releases_transformer_once() {
        let disposals = Rc::new(Cell::new(0));
        let property = TransformedProperty::new(Halve(Rc::clone(&disposals)), 8);
        property.add_change_listener(Rc::new(
            |_: &dyn ReadableProperty<i32>, _: Option<&i32>, _: &i32| {},
        ));
        assert_eq!(property.value(), 4);

        property.dispose();
        property.dispose();

        assert_eq!(disposals.get(), 1);
        assert!(property.listeners.is_empty());
    }
}
