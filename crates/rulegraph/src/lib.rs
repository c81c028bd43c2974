//! # rulegraph
//!
//! A declarative validation graph and property binding toolkit.
//!
//! Validation is wired from four roles: **triggers** start a pass, **data
//! providers** are pulled for the value to check, **rules** compute results,
//! and **result handlers** apply feedback. Validators connect the roles as a
//! many-to-many graph and run every pass synchronously, in insertion order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use rulegraph::prelude::*;
//!
//! let validator = MappableValidator::<String, bool>::new();
//! let submit = Rc::new(ManualTrigger::new());
//! let name: DataProviderRef<String> = Rc::new(|| "alice".to_owned());
//! let not_blank: RuleRef<String, bool> = Rc::new(StringLengthGreaterThanRule::new(0).trimmed());
//! let feedback: ResultHandlerRef<bool> = Rc::new(|ok: &bool| println!("name valid: {ok}"));
//!
//! validator.map_trigger(Some(&(submit.clone() as TriggerRef)), Some(&name));
//! validator.map_data_provider(Some(&name), Some(&not_blank));
//! validator.map_rule(Some(&not_blank), Some(&feedback));
//!
//! submit.trigger();
//! ```
//!
//! ## Modules
//!
//! - [`foundation`]: role traits, node identity, errors, configuration
//! - [`mapping`]: the ordered multimap behind the validators
//! - [`transform`]: transformers, casts, boolean aggregators
//! - [`rules`], [`trigger`], [`provider`], [`handler`]: ready-made roles
//! - [`validator`]: [`MappableValidator`](validator::MappableValidator) and
//!   [`SimpleValidator`](validator::SimpleValidator)
//! - [`binding`]: properties, bonds and the [`Binder`](binding::Binder)
//!
//! ## Threading
//!
//! Everything is single-threaded: nodes are shared through `Rc` and none of
//! the graph types are `Send`.

// Identity-keyed tables of trait objects have long types.
#![allow(clippy::type_complexity)]

pub mod binding;
pub mod foundation;
pub mod handler;
pub mod mapping;
pub mod prelude;
pub mod provider;
pub mod rules;
pub mod transform;
pub mod trigger;
pub mod validator;
