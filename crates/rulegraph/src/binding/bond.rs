//! Bonds - live propagation from master properties to slave properties
//!
//! A bond listens to its master, transforms every new value and writes the
//! result into its slave. Registration delivers the master's current value,
//! so the slave is synchronized as soon as the bond exists.
//!
//! Disposing a bond only detaches its listener; the properties are left
//! untouched.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::composite::{CompositeReadableProperty, CompositeWritableProperty};
use super::property::{
    ChangeListener, ChangeListenerRef, ReadableProperty, ReadablePropertyRef, WritablePropertyRef,
};
use crate::foundation::{BoxTransformer, Disposable, Transformer};

/// Transforms master values and writes them into the slave.
struct MasterAdapter<I, O> {
    transformer: BoxTransformer<I, O>,
    slave: WritablePropertyRef<O>,
}

impl<I: Clone, O> ChangeListener<I> for MasterAdapter<I, O> {
    fn property_changed(&self, _property: &dyn ReadableProperty<I>, _old: Option<&I>, new: &I) {
        self.slave.set_value(self.transformer.transform(new.clone()));
    }
}

fn adapter<I: Clone + 'static, O: 'static>(
    transformer: impl Transformer<I, O> + 'static,
    slave: WritablePropertyRef<O>,
) -> ChangeListenerRef<I> {
    Rc::new(MasterAdapter {
        transformer: Box::new(transformer),
        slave,
    })
}

fn fan_out<S: Clone + 'static>(
    slaves: impl IntoIterator<Item = WritablePropertyRef<S>>,
) -> WritablePropertyRef<S> {
    Rc::new(CompositeWritableProperty::with_members(slaves))
}

// ============================================================================
// SINGLE MASTER
// ============================================================================

/// Bond from one master property.
pub struct SingleMasterBond<M> {
    master: ReadablePropertyRef<M>,
    listener: ChangeListenerRef<M>,
    disposed: Cell<bool>,
}

impl<M: Clone + 'static> SingleMasterBond<M> {
    /// Binds `master` to `slave` through `transformer`.
    pub fn new<S: 'static>(
        master: ReadablePropertyRef<M>,
        transformer: impl Transformer<M, S> + 'static,
        slave: WritablePropertyRef<S>,
    ) -> Self {
        let listener = adapter(transformer, slave);
        master.add_change_listener(Rc::clone(&listener));
        debug!("single-master bond established");
        Self {
            master,
            listener,
            disposed: Cell::new(false),
        }
    }

    /// Binds `master` to every slave through `transformer`.
    pub fn with_slaves<S: Clone + 'static>(
        master: ReadablePropertyRef<M>,
        transformer: impl Transformer<M, S> + 'static,
        slaves: impl IntoIterator<Item = WritablePropertyRef<S>>,
    ) -> Self {
        Self::new(master, transformer, fan_out(slaves))
    }
}

impl<M> Disposable for SingleMasterBond<M> {
    fn dispose(&self) {
        if !self.disposed.replace(true) {
            self.master.remove_change_listener(&self.listener);
        }
    }
}

// ============================================================================
// MULTIPLE MASTERS
// ============================================================================

/// Bond from several master properties.
///
/// The masters are gathered into a [`CompositeReadableProperty`]; any master
/// change re-collects all values and transforms the whole collection.
pub struct MultipleMasterBond<M> {
    masters: Rc<CompositeReadableProperty<M>>,
    listener: ChangeListenerRef<Vec<M>>,
    disposed: Cell<bool>,
}

impl<M: Clone + PartialEq + 'static> MultipleMasterBond<M> {
    /// Binds `masters` to `slave` through `transformer`.
    pub fn new<S: 'static>(
        masters: impl IntoIterator<Item = ReadablePropertyRef<M>>,
        transformer: impl Transformer<Vec<M>, S> + 'static,
        slave: WritablePropertyRef<S>,
    ) -> Self {
        let masters = CompositeReadableProperty::with_members(masters);
        let listener = adapter(transformer, slave);
        masters.add_change_listener(Rc::clone(&listener));
        debug!(
            masters = masters.properties().len(),
            "multiple-master bond established"
        );
        Self {
            masters,
            listener,
            disposed: Cell::new(false),
        }
    }

    /// Binds `masters` to every slave through `transformer`.
    pub fn with_slaves<S: Clone + 'static>(
        masters: impl IntoIterator<Item = ReadablePropertyRef<M>>,
        transformer: impl Transformer<Vec<M>, S> + 'static,
        slaves: impl IntoIterator<Item = WritablePropertyRef<S>>,
    ) -> Self {
        Self::new(masters, transformer, fan_out(slaves))
    }

    /// Returns the composite gathering the masters.
    pub fn masters(&self) -> &Rc<CompositeReadableProperty<M>> {
        &self.masters
    }
}

impl<M: Clone> Disposable for MultipleMasterBond<M> {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.masters.remove_change_listener(&self.listener);
        self.masters.dispose();
    }
}
