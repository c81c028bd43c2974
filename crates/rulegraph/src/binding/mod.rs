//! Properties and bonds
//!
//! A minimal reactive layer: [`ReadableProperty`] values notify
//! [`ChangeListener`]s, [`WritableProperty`] values can be set, and bonds
//! propagate master changes into slaves through a transformer chain.
//!
//! # Cycles
//!
//! Bonds may form cycles (A to B and B to A). Writable properties in this
//! module suppress notifications for equal values and drop re-entrant writes
//! through a [`ReentrancyGuard`], so such cycles settle after one round.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use rulegraph::binding::{Binder, ReadableProperty, SimpleProperty, WritableProperty};
//!
//! let a = Rc::new(SimpleProperty::new(5));
//! let b = Rc::new(SimpleProperty::new(4));
//! let _ab = Binder::from(&a).to(&b);
//! let _ba = Binder::from(&b).to(&a);
//!
//! a.set_value(12);
//! assert_eq!(b.value(), 12);
//! ```

pub mod binder;
pub mod bond;
pub mod composite;
pub mod guard;
pub mod property;
pub mod simple;
pub mod transformed;

pub use binder::{Binder, MultipleMasterBinding, SingleMasterBinding};
pub use bond::{MultipleMasterBond, SingleMasterBond};
pub use composite::{CompositeReadableProperty, CompositeWritableProperty};
pub use guard::{GuardToken, ReentrancyGuard};
pub use property::{
    ChangeListener, ChangeListenerRef, ListenerList, ReadableProperty, ReadablePropertyRef,
    WritableProperty, WritablePropertyRef,
};
pub use simple::SimpleProperty;
pub use transformed::TransformedProperty;
