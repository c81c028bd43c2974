//! Integration tests for the mappable validator tables and dispatch

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{capture, warnings};
use pretty_assertions::assert_eq;
use rulegraph::prelude::*;

fn counting_provider(value: i32) -> (DataProviderRef<i32>, Rc<Cell<usize>>) {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let provider: DataProviderRef<i32> = Rc::new(move || {
        counter.set(counter.get() + 1);
        value
    });
    (provider, pulls)
}

fn recorder<T: Clone + 'static>() -> (ResultHandlerRef<T>, Rc<RefCell<Vec<T>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (Rc::new(move |result: &T| sink.borrow_mut().push(result.clone())), seen)
}

// ============================================================================
// TABLE MUTATION
// ============================================================================

#[test]
fn test_unmapped_pair_warns_instead_of_pulling() {
    let validator = MappableValidator::<i32, bool>::new();
    let trigger = Rc::new(ManualTrigger::new());
    let as_trigger: TriggerRef = trigger.clone();
    let (provider, pulls) = counting_provider(3);
    let rule: RuleRef<i32, bool> = Rc::new(|n: &i32| *n > 0);
    let (handler, seen) = recorder();

    validator.map_trigger(Some(&as_trigger), Some(&provider));
    validator.map_data_provider(Some(&provider), Some(&rule));
    validator.map_rule(Some(&rule), Some(&handler));
    assert!(validator.unmap_trigger_data_provider(&as_trigger, &provider));

    let ((), events) = capture(|| trigger.trigger());

    assert_eq!(pulls.get(), 0);
    assert!(seen.borrow().is_empty());
    assert_eq!(warnings(&events), vec!["no data provider mapped to trigger"]);
}

#[test]
fn test_both_absent_is_a_logged_no_op() {
    let validator = MappableValidator::<i32, bool>::new();
    let trigger: TriggerRef = Rc::new(ManualTrigger::new());
    let provider: DataProviderRef<i32> = Rc::new(|| 1);
    let rule: RuleRef<i32, bool> = Rc::new(|_: &i32| true);
    let (handler, _) = recorder();

    validator.map_trigger(Some(&trigger), Some(&provider));
    validator.map_data_provider(Some(&provider), Some(&rule));
    validator.map_rule(Some(&rule), Some(&handler));
    let before = validator.snapshot();

    let ((), events) = capture(|| {
        validator.map_trigger(None, None);
        validator.map_data_provider(None, None);
        validator.map_rule(None, None);
    });

    assert_eq!(validator.snapshot(), before);
    assert_eq!(
        warnings(&events),
        vec!["mapping call has no effect since both arguments are absent"; 3]
    );
}

#[test]
fn test_absent_handler_removes_rule_key() {
    let validator = MappableValidator::<i32, bool>::new();
    let provider: DataProviderRef<i32> = Rc::new(|| 1);
    let rule: RuleRef<i32, bool> = Rc::new(|_: &i32| true);
    let (handler, seen) = recorder();

    validator.map_data_provider(Some(&provider), Some(&rule));
    validator.map_rule(Some(&rule), Some(&handler));
    validator.map_rule(Some(&rule), None);

    let ((), events) = capture(|| validator.process_data_provider(&provider));

    assert!(seen.borrow().is_empty());
    assert_eq!(warnings(&events), vec!["no result handler mapped to rule"]);
    assert!(validator.snapshot().result_handlers.is_empty());
}

#[test]
fn test_absent_rule_list_skips_data_pull() {
    let validator = MappableValidator::<i32, bool>::new();
    let trigger: TriggerRef = Rc::new(ManualTrigger::new());
    let (provider, pulls) = counting_provider(1);

    validator.map_trigger(Some(&trigger), Some(&provider));

    let ((), events) = capture(|| validator.process_trigger(&trigger));

    assert_eq!(pulls.get(), 0);
    assert_eq!(warnings(&events), vec!["no rule mapped to data provider"]);
}

// ============================================================================
// DISPATCH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Validity {
    Valid,
    Invalid,
}

#[test]
fn test_result_keyed_dispatch() {
    let validator = ResultMappableValidator::<String, Validity>::new();
    let input = Rc::new(RefCell::new(String::new()));
    let trigger = Rc::new(ManualTrigger::new());
    let as_trigger: TriggerRef = trigger.clone();
    let source = Rc::clone(&input);
    let provider: DataProviderRef<String> = Rc::new(move || source.borrow().clone());
    let rule: RuleRef<String, Validity> = Rc::new(|s: &String| {
        if s.trim().is_empty() {
            Validity::Invalid
        } else {
            Validity::Valid
        }
    });
    let (on_valid, valid) = recorder();
    let (on_invalid, invalid) = recorder();

    validator.map_trigger(Some(&as_trigger), Some(&provider));
    validator.map_data_provider(Some(&provider), Some(&rule));
    validator.map_result(Some(Validity::Valid), Some(&on_valid));
    validator.map_result(Some(Validity::Invalid), Some(&on_invalid));

    trigger.trigger();
    *input.borrow_mut() = "filled".to_owned();
    trigger.trigger();

    assert_eq!(*valid.borrow(), vec![Validity::Valid]);
    assert_eq!(*invalid.borrow(), vec![Validity::Invalid]);

    validator.unmap_result(&Validity::Invalid);
    *input.borrow_mut() = String::new();
    let ((), events) = capture(|| trigger.trigger());
    assert_eq!(invalid.borrow().len(), 1);
    assert_eq!(warnings(&events), vec!["no result handler mapped to result"]);
}

#[test]
fn test_handler_removed_during_dispatch_still_runs_this_pass() {
    let validator = MappableValidator::<i32, i32>::new();
    let provider: DataProviderRef<i32> = Rc::new(|| 4);
    let rule: RuleRef<i32, i32> = Rc::new(|n: &i32| n * 2);
    let (second, seen) = recorder();

    let target = Rc::clone(&validator);
    let victim = Rc::clone(&second);
    let key = Rc::clone(&rule);
    let first: ResultHandlerRef<i32> = Rc::new(move |_: &i32| {
        target.unmap_rule_handler(&key, &victim);
    });

    validator.map_data_provider(Some(&provider), Some(&rule));
    validator.map_rule(Some(&rule), Some(&first));
    validator.map_rule(Some(&rule), Some(&second));

    validator.process_data_provider(&provider);
    validator.process_data_provider(&provider);

    assert_eq!(*seen.borrow(), vec![8]);
}

// ============================================================================
// DISPOSAL
// ============================================================================

struct CountingRule {
    disposals: Cell<usize>,
}

impl Rule<i32, bool> for CountingRule {
    fn validate(&self, data: &i32) -> bool {
        *data > 0
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Disposable for CountingRule {
    fn dispose(&self) {
        self.disposals.set(self.disposals.get() + 1);
    }
}

#[test]
fn test_dispose_reaches_shared_node_once() {
    let validator = MappableValidator::<i32, bool>::new();
    let p1: DataProviderRef<i32> = Rc::new(|| 1);
    let p2: DataProviderRef<i32> = Rc::new(|| 2);
    let counting = Rc::new(CountingRule {
        disposals: Cell::new(0),
    });
    let rule: RuleRef<i32, bool> = counting.clone();
    let (handler, _) = recorder();

    validator.map_data_provider(Some(&p1), Some(&rule));
    validator.map_data_provider(Some(&p2), Some(&rule));
    validator.map_rule(Some(&rule), Some(&handler));

    validator.dispose();
    validator.dispose();

    assert_eq!(counting.disposals.get(), 1);
    assert!(validator.snapshot().data_providers.is_empty());
}
