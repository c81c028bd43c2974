//! Core types and traits
//!
//! This module contains the building blocks every other module is wired from:
//!
//! - **Roles**: [`Trigger`], [`DataProvider`], [`Rule`], [`ResultHandler`]
//! - **Conversion**: [`Transformer`], [`Aggregator`]
//! - **Lifecycle**: [`Disposable`]
//! - **Identity**: [`NodeId`], [`Node`]
//! - **Errors**: [`CastError`], [`Error`]
//! - **Configuration**: [`RuleGraphConfig`], [`AggregationDefaults`], [`CastPolicy`]
//!
//! # Architecture
//!
//! ## 1. Identity, not equality
//!
//! Graph nodes are shared `Rc` handles and are mapped by the identity of
//! their allocation. Two rules with equal state are still two rules.
//!
//! ## 2. Single-threaded by construction
//!
//! Nothing here is `Send`. A whole validation pass runs to completion on the
//! thread that fired the trigger, in mapping-insertion order.
//!
//! ## 3. Fail loud
//!
//! Rules and handlers are expected to be total. A panic inside one is not
//! caught by the engine and reaches whoever fired the trigger.

pub mod config;
pub mod error;
pub mod identity;
pub mod traits;

pub use config::{
    AggregationDefaults, CastPolicy, DEFAULT_EMPTY_COLLECTION_VALUE, DEFAULT_NULL_ELEMENT_VALUE,
    RuleGraphConfig,
};
pub use error::{CastError, Error, Result};
pub use identity::{Node, NodeId};
pub use traits::{
    Aggregator, BoxTransformer, DataProvider, DataProviderRef, Disposable, ResultHandler,
    ResultHandlerRef, Rule, RuleRef, Transformer, Trigger, TriggerEvent, TriggerListener,
    TriggerRef,
};
