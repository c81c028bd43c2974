//! Composite properties - fan-in and fan-out over several properties
//!
//! - [`CompositeReadableProperty`] presents the values of its members as one
//!   `Vec<T>`, re-collected whenever any member changes.
//! - [`CompositeWritableProperty`] sets the same value on every member.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use super::guard::ReentrancyGuard;
use super::property::{
    ChangeListener, ChangeListenerRef, ListenerList, ReadableProperty, ReadablePropertyRef,
    WritableProperty, WritablePropertyRef,
};
use crate::foundation::Disposable;
use crate::foundation::identity::remove_by_identity;

// ============================================================================
// READABLE
// ============================================================================

/// Readable property whose value is the collection of its members' values.
///
/// Members can be added and removed at runtime. Disposing the composite
/// detaches it from every member.
pub struct CompositeReadableProperty<T> {
    members: RefCell<Vec<ReadablePropertyRef<T>>>,
    values: RefCell<Vec<T>>,
    listeners: ListenerList<Vec<T>>,
    member_listener: ChangeListenerRef<T>,
    disposed: Cell<bool>,
}

/// Re-collects the composite when a member changes.
struct MemberAdapter<T> {
    composite: Weak<CompositeReadableProperty<T>>,
}

impl<T: Clone + PartialEq + 'static> ChangeListener<T> for MemberAdapter<T> {
    fn property_changed(&self, _property: &dyn ReadableProperty<T>, _old: Option<&T>, _new: &T) {
        if let Some(composite) = self.composite.upgrade() {
            composite.refresh();
        }
    }
}

impl<T: Clone + PartialEq + 'static> CompositeReadableProperty<T> {
    /// Creates an empty composite.
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            members: RefCell::new(Vec::new()),
            values: RefCell::new(Vec::new()),
            listeners: ListenerList::new(),
            member_listener: Rc::new(MemberAdapter {
                composite: weak.clone(),
            }),
            disposed: Cell::new(false),
        })
    }

    /// Creates a composite over `members`, in order.
    pub fn with_members(members: impl IntoIterator<Item = ReadablePropertyRef<T>>) -> Rc<Self> {
        let composite = Self::new();
        for member in members {
            composite.add_property(member);
        }
        composite
    }

    /// Appends a member and starts following its changes.
    pub fn add_property(&self, member: ReadablePropertyRef<T>) {
        self.members.borrow_mut().push(Rc::clone(&member));
        // Registration delivers the member's current value, which refreshes us.
        member.add_change_listener(Rc::clone(&self.member_listener));
    }

    /// Removes one occurrence of `member`, compared by identity.
    pub fn remove_property(&self, member: &ReadablePropertyRef<T>) -> bool {
        let removed = remove_by_identity(&mut self.members.borrow_mut(), member);
        if removed {
            member.remove_change_listener(&self.member_listener);
            self.refresh();
        }
        removed
    }

    /// Returns the current members.
    pub fn properties(&self) -> Vec<ReadablePropertyRef<T>> {
        self.members.borrow().clone()
    }

    fn refresh(&self) {
        let members = self.members.borrow().clone();
        let values: Vec<T> = members.iter().map(|member| member.value()).collect();
        if *self.values.borrow() == values {
            return;
        }
        let old = self.values.replace(values.clone());
        trace!(members = values.len(), "composite property re-collected");
        self.listeners.notify(self, Some(&old), &values);
    }
}

impl<T: Clone> ReadableProperty<Vec<T>> for CompositeReadableProperty<T> {
    fn value(&self) -> Vec<T> {
        self.values.borrow().clone()
    }

    fn add_change_listener(&self, listener: ChangeListenerRef<Vec<T>>) {
        self.listeners.add(listener.clone());
        let current = self.value();
        listener.property_changed(self, None, &current);
    }

    fn remove_change_listener(&self, listener: &ChangeListenerRef<Vec<T>>) {
        self.listeners.remove(listener);
    }
}

impl<T> Disposable for CompositeReadableProperty<T> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let members = std::mem::take(&mut *self.members.borrow_mut());
        for member in &members {
            member.remove_change_listener(&self.member_listener);
        }
    }
}

// ============================================================================
// WRITABLE
// ============================================================================

/// Writable property forwarding every write to all of its members.
pub struct CompositeWritableProperty<T> {
    members: RefCell<Vec<WritablePropertyRef<T>>>,
    guard: ReentrancyGuard,
}

impl<T> Default for CompositeWritableProperty<T> {
    fn default() -> Self {
        Self {
            members: RefCell::new(Vec::new()),
            guard: ReentrancyGuard::new(),
        }
    }
}

impl<T> CompositeWritableProperty<T> {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composite over `members`, in order.
    pub fn with_members(members: impl IntoIterator<Item = WritablePropertyRef<T>>) -> Self {
        Self {
            members: RefCell::new(members.into_iter().collect()),
            guard: ReentrancyGuard::new(),
        }
    }

    /// Appends a member.
    pub fn add_property(&self, member: WritablePropertyRef<T>) {
        self.members.borrow_mut().push(member);
    }

    /// Removes one occurrence of `member`, compared by identity.
    pub fn remove_property(&self, member: &WritablePropertyRef<T>) -> bool {
        remove_by_identity(&mut self.members.borrow_mut(), member)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    /// Returns `true` without members.
    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }
}

impl<T: Clone> WritableProperty<T> for CompositeWritableProperty<T> {
    fn set_value(&self, value: T) {
        let Some(_token) = self.guard.enter() else {
            trace!("re-entrant composite write dropped");
            return;
        };
        let members = self.members.borrow().clone();
        for member in &members {
            member.set_value(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SimpleProperty;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_composite_readable_follows_members() {
        let a = Rc::new(SimpleProperty::new(1));
        let b = Rc::new(SimpleProperty::new(2));
        let composite = CompositeReadableProperty::with_members([
            a.clone() as ReadablePropertyRef<i32>,
            b.clone() as ReadablePropertyRef<i32>,
        ]);
        assert_eq!(composite.value(), vec![1, 2]);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        composite.add_change_listener(Rc::new(
            move |_: &dyn ReadableProperty<Vec<i32>>, _: Option<&Vec<i32>>, new: &Vec<i32>| {
                sink.borrow_mut().push(new.clone());
            },
        ));

        b.set_value(3);
        assert_eq!(*seen.borrow(), vec![vec![1, 2], vec![1, 3]]);
    }

    #[test]
    fn test_add_and_remove_members_at_runtime() {
        let a = Rc::new(SimpleProperty::new('a'));
        let b: ReadablePropertyRef<char> = Rc::new(SimpleProperty::new('b'));
        let composite = CompositeReadableProperty::<char>::new();

        composite.add_property(a.clone());
        composite.add_property(b.clone());
        assert_eq!(composite.value(), vec!['a', 'b']);

        assert!(composite.remove_property(&b));
        assert_eq!(composite.value(), vec!['a']);
        assert_eq!(composite.properties().len(), 1);
    }

    #[test]
    fn test_dispose_detaches_from_members() {
        let a = Rc::new(SimpleProperty::new(1));
        let composite = CompositeReadableProperty::with_members([a.clone() as ReadablePropertyRef<i32>]);
        assert_eq!(a.listener_count(), 1);

        composite.dispose();
        composite.dispose();

        assert_eq!(a.listener_count(), 0);
        a.set_value(9);
        assert_eq!(composite.value(), vec![1]);
    }

    #[test]
    fn test_composite_writable_sets_every_member() {
        let a = Rc::new(SimpleProperty::new(0));
        let b = Rc::new(SimpleProperty::new(0));
        let composite = CompositeWritableProperty::with_members([
            a.clone() as WritablePropertyRef<i32>,
            b.clone() as WritablePropertyRef<i32>,
        ]);

        composite.set_value(7);

        assert_eq!((a.value(), b.value()), (7, 7));
        assert_eq!(composite.len(), 2);
    }
}
