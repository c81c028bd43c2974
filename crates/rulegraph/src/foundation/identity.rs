//! Node identity for graph participants
//!
//! Triggers, data providers, rules and result handlers are compared by
//! identity, never by value. A [`NodeId`] is the address of the shared
//! allocation that holds the node; [`Node`] wraps an `Rc` and hashes and
//! compares through that id, so it can be used as a mapping-table key.
//!
//! Mapping tables keep a strong reference to every node they contain, so an
//! address cannot be recycled while it is still mapped.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

/// Stable identity of a shared graph node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Identity of the node behind a reference.
    ///
    /// For a value living inside an `Rc`, this equals [`NodeId::of_rc`] on
    /// that `Rc`, which is what lets a trigger name itself as the source of
    /// the events it fires.
    pub fn of<T: ?Sized>(node: &T) -> Self {
        Self(std::ptr::from_ref(node).cast::<()>().addr())
    }

    /// Identity of the node held by a shared handle.
    pub fn of_rc<T: ?Sized>(node: &Rc<T>) -> Self {
        Self(Rc::as_ptr(node).cast::<()>().addr())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:#x})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// ============================================================================
// NODE
// ============================================================================

/// Shared node handle keyed by identity.
///
/// Two `Node`s are equal exactly when they point at the same allocation.
/// `T` does not need `Hash`, `Eq` or `Debug`.
pub struct Node<T: ?Sized> {
    id: NodeId,
    inner: Rc<T>,
}

impl<T: ?Sized> Node<T> {
    /// Wraps a shared handle.
    pub fn new(inner: Rc<T>) -> Self {
        Self {
            id: NodeId::of_rc(&inner),
            inner,
        }
    }

    /// Returns the identity of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the wrapped shared handle.
    pub fn as_rc(&self) -> &Rc<T> {
        &self.inner
    }

    /// Unwraps the shared handle.
    pub fn into_rc(self) -> Rc<T> {
        self.inner
    }
}

impl<T: ?Sized> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> Deref for Node<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: ?Sized> From<Rc<T>> for Node<T> {
    fn from(inner: Rc<T>) -> Self {
        Self::new(inner)
    }
}

impl<T: ?Sized> From<&Rc<T>> for Node<T> {
    fn from(inner: &Rc<T>) -> Self {
        Self::new(Rc::clone(inner))
    }
}

impl<T: ?Sized> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: ?Sized> Eq for Node<T> {}

impl<T: ?Sized> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Hashes exactly like `NodeId`, so tables keyed by `Node` can be looked up with
// the bare id carried by a trigger event.
impl<T: ?Sized> Borrow<NodeId> for Node<T> {
    fn borrow(&self) -> &NodeId {
        &self.id
    }
}

impl<T: ?Sized> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.id)
    }
}

/// Removes the first element pointing at the same allocation as `item`.
pub(crate) fn remove_by_identity<T: ?Sized>(list: &mut Vec<Rc<T>>, item: &Rc<T>) -> bool {
    let id = NodeId::of_rc(item);
    match list.iter().position(|candidate| NodeId::of_rc(candidate) == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
