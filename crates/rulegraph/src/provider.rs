//! Data providers
//!
//! - [`ListCompositeDataProvider`]: data of several providers as a `Vec`
//! - [`MapCompositeDataProvider`]: data of several keyed providers as an `IndexMap`
//! - [`PropertyValueProvider`]: current value of a readable property
//!
//! Any `Fn() -> D` closure is a data provider too.

use std::cell::RefCell;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::binding::ReadablePropertyRef;
use crate::foundation::identity::remove_by_identity;
use crate::foundation::{DataProvider, DataProviderRef, Disposable};

fn dispose_all<'a, D: 'a>(providers: impl IntoIterator<Item = &'a DataProviderRef<D>>) {
    for provider in providers {
        if let Some(provider) = provider.as_disposable() {
            provider.dispose();
        }
    }
}

// ============================================================================
// LIST
// ============================================================================

/// Reads every member provider, in insertion order.
///
/// # Examples
///
/// ```rust,ignore
/// use std::rc::Rc;
/// use rulegraph::provider::ListCompositeDataProvider;
///
/// let both = ListCompositeDataProvider::with_providers([
///     Rc::new(|| 1) as DataProviderRef<i32>,
///     Rc::new(|| 2) as DataProviderRef<i32>,
/// ]);
/// assert_eq!(both.data(), vec![1, 2]);
/// ```
pub struct ListCompositeDataProvider<D> {
    providers: RefCell<Vec<DataProviderRef<D>>>,
}

impl<D> Default for ListCompositeDataProvider<D> {
    fn default() -> Self {
        Self {
            providers: RefCell::new(Vec::new()),
        }
    }
}

impl<D> ListCompositeDataProvider<D> {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composite over `providers`.
    pub fn with_providers(providers: impl IntoIterator<Item = DataProviderRef<D>>) -> Self {
        Self {
            providers: RefCell::new(providers.into_iter().collect()),
        }
    }

    /// Appends a member.
    pub fn add_data_provider(&self, provider: DataProviderRef<D>) {
        self.providers.borrow_mut().push(provider);
    }

    /// Removes one occurrence of `provider`, compared by identity.
    pub fn remove_data_provider(&self, provider: &DataProviderRef<D>) -> bool {
        remove_by_identity(&mut self.providers.borrow_mut(), provider)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.providers.borrow().len()
    }

    /// Returns `true` without members.
    pub fn is_empty(&self) -> bool {
        self.providers.borrow().is_empty()
    }
}

impl<D> DataProvider<Vec<D>> for ListCompositeDataProvider<D> {
    fn data(&self) -> Vec<D> {
        let providers = self.providers.borrow().clone();
        providers.iter().map(|provider| provider.data()).collect()
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<D> Disposable for ListCompositeDataProvider<D> {
    fn dispose(&self) {
        let providers = std::mem::take(&mut *self.providers.borrow_mut());
        dispose_all(&providers);
    }
}

// ============================================================================
// MAP
// ============================================================================

/// Reads every member provider under its key, in insertion order.
pub struct MapCompositeDataProvider<K, D> {
    providers: RefCell<IndexMap<K, DataProviderRef<D>>>,
}

impl<K, D> Default for MapCompositeDataProvider<K, D> {
    fn default() -> Self {
        Self {
            providers: RefCell::new(IndexMap::new()),
        }
    }
}

impl<K: Hash + Eq, D> MapCompositeDataProvider<K, D> {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the provider for `key`, returning the one it replaces.
    pub fn add_data_provider(
        &self,
        key: K,
        provider: DataProviderRef<D>,
    ) -> Option<DataProviderRef<D>> {
        self.providers.borrow_mut().insert(key, provider)
    }

    /// Removes the provider for `key`, keeping the order of the others.
    pub fn remove_data_provider(&self, key: &K) -> Option<DataProviderRef<D>> {
        self.providers.borrow_mut().shift_remove(key)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.providers.borrow().len()
    }

    /// Returns `true` without members.
    pub fn is_empty(&self) -> bool {
        self.providers.borrow().is_empty()
    }
}

impl<K: Hash + Eq + Clone, D> DataProvider<IndexMap<K, D>> for MapCompositeDataProvider<K, D> {
    fn data(&self) -> IndexMap<K, D> {
        let providers = self.providers.borrow().clone();
        providers
            .into_iter()
            .map(|(key, provider)| (key, provider.data()))
            .collect()
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<K, D> Disposable for MapCompositeDataProvider<K, D> {
    fn dispose(&self) {
        let providers = std::mem::take(&mut *self.providers.borrow_mut());
        dispose_all(providers.values());
    }
}

// ============================================================================
// PROPERTY VALUE
// ============================================================================

/// Provides the current value of a readable property.
pub struct PropertyValueProvider<T> {
    property: ReadablePropertyRef<T>,
}

impl<T> PropertyValueProvider<T> {
    /// Creates a provider reading `property`.
    pub fn new(property: ReadablePropertyRef<T>) -> Self {
        Self { property }
    }
}

impl<T> DataProvider<T> for PropertyValueProvider<T> {
    fn data(&self) -> T {
        self.property.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{SimpleProperty, WritableProperty};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Disposing(Rc<Cell<u32>>);

    impl DataProvider<u32> for Disposing {
        fn data(&self) -> u32 {
            self.0.get()
        }

        fn as_disposable(&self) -> Option<&dyn Disposable> {
            Some(self)
        }
    }

    impl Disposable for Disposing {
        fn dispose(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_list_reads_members_in_order() {
        let list = ListCompositeDataProvider::<&str>::new();
        let second: DataProviderRef<&str> = Rc::new(|| "b");
        list.add_data_provider(Rc::new(|| "a"));
        list.add_data_provider(Rc::clone(&second));
        list.add_data_provider(Rc::new(|| "c"));
        assert_eq!(list.data(), vec!["a", "b", "c"]);

        assert!(list.remove_data_provider(&second));
        assert_eq!(list.data(), vec!["a", "c"]);
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let map = MapCompositeDataProvider::new();
        map.add_data_provider("zip", Rc::new(|| 2) as DataProviderRef<i32>);
        map.add_data_provider("city", Rc::new(|| 1));

        let data = map.data();
        assert_eq!(data.keys().copied().collect::<Vec<_>>(), ["zip", "city"]);
        assert_eq!(data["city"], 1);

        assert!(map.remove_data_provider(&"zip").is_some());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_dispose_reaches_members_and_clears() {
        let disposed = Rc::new(Cell::new(0));
        let list = ListCompositeDataProvider::with_providers([
            Rc::new(Disposing(disposed.clone())) as DataProviderRef<u32>
        ]);

        list.dispose();
        list.dispose();

        assert_eq!(disposed.get(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_property_value_provider() {
        let property = Rc::new(SimpleProperty::new(10));
        let provider = PropertyValueProvider::new(property.clone() as ReadablePropertyRef<i32>);
        property.set_value(11);
        assert_eq!(provider.data(), 11);
    }
}
