//! Fluent entry point for creating bonds
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use rulegraph::binding::{Binder, SimpleProperty};
//!
//! let celsius = Rc::new(SimpleProperty::new(20.0));
//! let label = Rc::new(SimpleProperty::new(String::new()));
//!
//! let bond = Binder::from(&celsius)
//!     .transform(|c: f64| c * 9.0 / 5.0 + 32.0)
//!     .transform(|f: f64| format!("{f} °F"))
//!     .to(&label);
//! ```

use std::rc::Rc;

use super::bond::{MultipleMasterBond, SingleMasterBond};
use super::property::{ReadableProperty, ReadablePropertyRef, WritableProperty, WritablePropertyRef};
use crate::foundation::Transformer;
use crate::transform::ChainedTransformer;

/// Starting point of every binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder;

impl Binder {
    /// Starts a binding from a single master.
    pub fn from<M, P>(master: &Rc<P>) -> SingleMasterBinding<M, M>
    where
        M: Clone + 'static,
        P: ReadableProperty<M> + 'static,
    {
        Self::from_property(Rc::clone(master) as ReadablePropertyRef<M>)
    }

    /// Starts a binding from a shared single master.
    pub fn from_property<M: Clone + 'static>(
        master: ReadablePropertyRef<M>,
    ) -> SingleMasterBinding<M, M> {
        SingleMasterBinding {
            master,
            transformer: ChainedTransformer::identity(),
        }
    }

    /// Starts a binding from several masters, whose values arrive as a `Vec`.
    pub fn from_all<M: Clone + PartialEq + 'static>(
        masters: impl IntoIterator<Item = ReadablePropertyRef<M>>,
    ) -> MultipleMasterBinding<M, Vec<M>> {
        MultipleMasterBinding {
            masters: masters.into_iter().collect(),
            transformer: ChainedTransformer::identity(),
        }
    }
}

// ============================================================================
// SINGLE MASTER
// ============================================================================

/// Binding from one master, transforming `M` into `S`.
#[must_use = "a binding does nothing until it is bound with `to`"]
pub struct SingleMasterBinding<M, S> {
    master: ReadablePropertyRef<M>,
    transformer: ChainedTransformer<M, S>,
}

impl<M: Clone + 'static, S: 'static> SingleMasterBinding<M, S> {
    /// Appends a transformer to the chain.
    pub fn transform<T: 'static>(
        self,
        transformer: impl Transformer<S, T> + 'static,
    ) -> SingleMasterBinding<M, T> {
        SingleMasterBinding {
            master: self.master,
            transformer: self.transformer.chain(transformer),
        }
    }

    /// Binds to one slave.
    pub fn to<P>(self, slave: &Rc<P>) -> SingleMasterBond<M>
    where
        P: WritableProperty<S> + 'static,
    {
        self.to_property(Rc::clone(slave) as WritablePropertyRef<S>)
    }

    /// Binds to one shared slave.
    pub fn to_property(self, slave: WritablePropertyRef<S>) -> SingleMasterBond<M> {
        SingleMasterBond::new(self.master, self.transformer, slave)
    }

    /// Binds to every slave.
    pub fn to_all(
        self,
        slaves: impl IntoIterator<Item = WritablePropertyRef<S>>,
    ) -> SingleMasterBond<M>
    where
        S: Clone,
    {
        SingleMasterBond::with_slaves(self.master, self.transformer, slaves)
    }
}

// ============================================================================
// MULTIPLE MASTERS
// ============================================================================

/// Binding from several masters, transforming their values into `S`.
#[must_use = "a binding does nothing until it is bound with `to`"]
pub struct MultipleMasterBinding<M, S> {
    masters: Vec<ReadablePropertyRef<M>>,
    transformer: ChainedTransformer<Vec<M>, S>,
}

impl<M: Clone + PartialEq + 'static, S: 'static> MultipleMasterBinding<M, S> {
    /// Appends a transformer to the chain.
    pub fn transform<T: 'static>(
        self,
        transformer: impl Transformer<S, T> + 'static,
    ) -> MultipleMasterBinding<M, T> {
        MultipleMasterBinding {
            masters: self.masters,
            transformer: self.transformer.chain(transformer),
        }
    }

    /// Binds to one slave.
    pub fn to<P>(self, slave: &Rc<P>) -> MultipleMasterBond<M>
    where
        P: WritableProperty<S> + 'static,
    {
        self.to_property(Rc::clone(slave) as WritablePropertyRef<S>)
    }

    /// Binds to one shared slave.
    pub fn to_property(self, slave: WritablePropertyRef<S>) -> MultipleMasterBond<M> {
        MultipleMasterBond::new(self.masters, self.transformer, slave)
    }

    /// Binds to every slave.
    pub fn to_all(
        self,
        slaves: impl IntoIterator<Item = WritablePropertyRef<S>>,
    ) -> MultipleMasterBond<M>
    where
        S: Clone,
    {
        MultipleMasterBond::with_slaves(self.masters, self.transformer, slaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SimpleProperty;
    use crate::foundation::Disposable;

    #[test]
    fn test_slave_is_synchronized_on_bind() {
        let master = Rc::new(SimpleProperty::new(5));
        let slave = Rc::new(SimpleProperty::new(0));

        let _bond = Binder::from(&master).to(&slave);
        assert_eq!(slave.value(), 5);

        master.set_value(8);
        assert_eq!(slave.value(), 8);
    }

    #[test]
    fn test_transform_chain_is_applied_in_order() {
        let master = Rc::new(SimpleProperty::new(3));
        let slave = Rc::new(SimpleProperty::new(String::new()));

        let _bond = Binder::from(&master)
            .transform(|n: i32| n + 1)
            .transform(|n: i32| n * 10)
            .transform(|n: i32| n.to_string())
            .to(&slave);

        assert_eq!(slave.value(), "40");
    }

    #[test]
    fn test_disposed_bond_stops_propagating() {
        let master = Rc::new(SimpleProperty::new(1));
        let slave = Rc::new(SimpleProperty::new(0));
        let bond = Binder::from(&master).to(&slave);

        bond.dispose();
        bond.dispose();
        master.set_value(2);

        assert_eq!(slave.value(), 1);
        assert_eq!(master.listener_count(), 0);
    }

    #[test]
    fn test_to_all_fans_out() {
        let master = Rc::new(SimpleProperty::new(true));
        let a = Rc::new(SimpleProperty::new(false));
        let b = Rc::new(SimpleProperty::new(false));

        let _bond = Binder::from(&master).to_all([
            a.clone() as WritablePropertyRef<bool>,
            b.clone() as WritablePropertyRef<bool>,
        ]);

        assert!(a.value() && b.value());
    }
}
