//! Integration tests for chained validators
//!
//! Field validators hand their results to collectors, and a group validator
//! listens to those collectors and reduces what they hold.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rulegraph::prelude::*;

fn recorder<T: Clone + 'static>() -> (ResultHandlerRef<T>, Rc<RefCell<Vec<T>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (Rc::new(move |result: &T| sink.borrow_mut().push(result.clone())), seen)
}

#[test]
fn test_collector_feeds_downstream_validator() {
    let upstream = MappableValidator::<i32, i32>::new();
    let downstream = SimpleValidator::<Option<String>, bool>::new();
    let trigger = Rc::new(ManualTrigger::new());
    let as_trigger: TriggerRef = trigger.clone();
    let provider: DataProviderRef<i32> = Rc::new(|| 21);
    let double: RuleRef<i32, i32> = Rc::new(|n: &i32| n * 2);
    let collector = Rc::new(ResultCollector::with_transformer(|last: Option<i32>| {
        last.map(|n| format!("#{n}"))
    }));
    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);

    upstream.map_trigger(Some(&as_trigger), Some(&provider));
    upstream.map_data_provider(Some(&provider), Some(&double));
    upstream.map_rule(Some(&double), Some(&(collector.clone() as ResultHandlerRef<i32>)));

    downstream.add_trigger(collector.clone());
    downstream.add_data_provider(collector.clone());
    downstream.add_rule(Rc::new(move |input: &Option<String>| {
        sink.borrow_mut().push(input.clone());
        input.is_some()
    }));
    downstream.add_result_handler(Rc::new(|_: &bool| {}));

    trigger.trigger();

    assert_eq!(collector.last_result(), Some(42));
    assert_eq!(*observed.borrow(), vec![Some("#42".to_owned())]);
}

// ============================================================================
// GROUP SCENARIO
// ============================================================================

struct Form {
    fields: Vec<Rc<SimpleProperty<String>>>,
    field_validators: Vec<Rc<SimpleValidator<String, bool>>>,
    group: Rc<SimpleValidator<Vec<Option<bool>>, bool>>,
    action_enabled: Rc<SimpleProperty<bool>>,
    group_results: Rc<RefCell<Vec<bool>>>,
}

fn form() -> Form {
    let action_enabled = Rc::new(SimpleProperty::new(false));
    let group = SimpleValidator::<Vec<Option<bool>>, bool>::new();
    let collected = Rc::new(ListCompositeDataProvider::<Option<bool>>::new());
    let mut fields = Vec::new();
    let mut field_validators = Vec::new();

    for _ in 0..4 {
        let field = Rc::new(SimpleProperty::new(String::new()));
        let readable: ReadablePropertyRef<String> = field.clone();
        let collector = Rc::new(SimpleResultCollector::<bool>::new());

        let validator = SimpleValidator::<String, bool>::new();
        validator.add_trigger(PropertyChangeTrigger::new(Rc::clone(&readable)));
        validator.add_data_provider(Rc::new(PropertyValueProvider::new(readable)));
        validator.add_rule(Rc::new(StringLengthGreaterThanRule::new(0).trimmed()));
        validator.add_result_handler(collector.clone());

        group.add_trigger(collector.clone());
        collected.add_data_provider(collector);
        fields.push(field);
        field_validators.push(validator);
    }

    let (recorder, group_results) = recorder();
    group.add_data_provider(collected);
    group.add_rule(Rc::new(AndBooleanAggregator::new()));
    group.add_result_handler(Rc::new(PropertyResultHandler::new(
        action_enabled.clone() as WritablePropertyRef<bool>,
    )));
    group.add_result_handler(recorder);

    Form {
        fields,
        field_validators,
        group,
        action_enabled,
        group_results,
    }
}

#[test]
fn test_action_enabled_only_when_all_fields_valid() {
    let form = form();

    for (i, field) in form.fields.iter().enumerate() {
        field.set_value(format!("value {i}"));
    }
    assert!(form.action_enabled.value());
    assert_eq!(*form.group_results.borrow(), vec![false, false, false, true]);

    form.fields[2].set_value("   ".to_owned());
    assert!(!form.action_enabled.value());
    assert_eq!(form.group_results.borrow().last(), Some(&false));

    form.fields[2].set_value("again".to_owned());
    assert!(form.action_enabled.value());
}

#[test]
fn test_unchanged_field_does_not_revalidate() {
    let form = form();
    for field in &form.fields {
        field.set_value("x".to_owned());
    }
    let passes = form.group_results.borrow().len();

    form.fields[0].set_value("x".to_owned());

    assert_eq!(form.group_results.borrow().len(), passes);
}

#[test]
fn test_disposed_group_stops_reacting() {
    let form = form();
    for field in &form.fields {
        field.set_value("x".to_owned());
    }
    let passes = form.group_results.borrow().len();

    form.group.dispose();
    form.group.dispose();
    form.fields[1].set_value(String::new());

    assert_eq!(form.group_results.borrow().len(), passes);
    assert!(form.action_enabled.value());

    for validator in &form.field_validators {
        validator.dispose();
    }
    form.fields[1].set_value("y".to_owned());
    assert_eq!(form.fields[1].listener_count(), 0);
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_configured_aggregator_in_group_rule() {
    let config = RuleGraphConfig::from_json(
        r#"{ "and_defaults": { "empty_collection_value": false, "null_element_value": true } }"#,
    )
    .unwrap();
    let validator =
        ResultAggregationValidator::<Vec<Option<bool>>, bool, bool>::aggregating(config.and_aggregator());
    let (handler, seen) = recorder();

    validator.add_data_provider(Rc::new(|| vec![Some(true), None]));
    validator.add_data_provider(Rc::new(Vec::<Option<bool>>::new));
    validator.add_rule(Rc::new(config.and_aggregator()));
    validator.add_result_handler(handler);
    validator.process();

    assert_eq!(*seen.borrow(), vec![true, false]);
}
