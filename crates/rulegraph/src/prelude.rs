//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use rulegraph::prelude::*;
//! ```

// ============================================================================
// FOUNDATION: Role traits, identity, errors, configuration
// ============================================================================

pub use crate::foundation::{
    AggregationDefaults, Aggregator, CastError, CastPolicy, DataProvider, DataProviderRef,
    Disposable, Node, NodeId, ResultHandler, ResultHandlerRef, Rule, RuleGraphConfig,
    RuleRef, Transformer, Trigger, TriggerEvent, TriggerListener, TriggerRef,
};

// ============================================================================
// BUILDING BLOCKS: Transformers, rules, triggers, providers, handlers
// ============================================================================

pub use crate::handler::{PropertyResultHandler, ResultCollector, SimpleResultCollector};
pub use crate::provider::{
    ListCompositeDataProvider, MapCompositeDataProvider, PropertyValueProvider,
};
pub use crate::rules::{
    CompositeRule, NotNullRule, StringLengthEqualToRule, StringLengthGreaterThanRule,
};
pub use crate::transform::{
    AndBooleanAggregator, CastTransformer, ChainedTransformer, Identity, Negate,
    OrBooleanAggregator, ToDisplayString,
};
pub use crate::trigger::{ManualTrigger, PropertyChangeTrigger};

// ============================================================================
// VALIDATORS
// ============================================================================

pub use crate::validator::{
    Aggregate, ByResult, ByRule, EachResult, MappableValidator, ResultAggregationValidator,
    ResultMappableValidator, SimpleValidator,
};

// ============================================================================
// BINDING
// ============================================================================

pub use crate::binding::{
    Binder, ChangeListener, ChangeListenerRef, CompositeReadableProperty,
    CompositeWritableProperty, MultipleMasterBond, ReadableProperty, ReadablePropertyRef,
    SimpleProperty, SingleMasterBond, TransformedProperty, WritableProperty, WritablePropertyRef,
};
