//! Failing, panicking and unconvertible deliveries.

use beacon_events::{Event, EventRegistry, RegistryConfig, Value};
use beacon_test::{
    CollectingReporter, CountingConverter, FailingCallback, PanickingCallback, RecordingCallback,
    hit_event, init_test_logging_default, move_event, test_player, test_registry_with_reporter,
};

#[test]
fn failing_listener_does_not_stop_siblings() {
    init_test_logging_default();
    let (registry, reporter) = test_registry_with_reporter();
    let failing = FailingCallback::new("out of ammo");
    let after = RecordingCallback::new();

    let failing_handle = registry.listen("hit", &test_player(), failing.clone());
    registry.listen("hit", &test_player(), after.clone());

    let report = registry.dispatch(&hit_event(test_player(), 10));

    assert_eq!(report.invoked, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.is_clean());
    assert_eq!(after.call_count(), 1);

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].listener, Some(failing_handle.id()));
    assert_eq!(failures[0].event, "hit");
    assert_eq!(failures[0].entity, test_player());
    assert!(failures[0].message.contains("out of ammo"));

    // A failure does not unregister the listener.
    registry.dispatch(&hit_event(test_player(), 10));
    assert_eq!(failing.call_count(), 2);
}

#[test]
fn failing_volatile_listener_is_still_consumed() {
    let (registry, reporter) = test_registry_with_reporter();
    let failing = FailingCallback::new("nope");
    let handle = registry.listen_once("hit", &test_player(), failing.clone());

    registry.dispatch(&hit_event(test_player(), 1));
    registry.dispatch(&hit_event(test_player(), 1));

    assert_eq!(failing.call_count(), 1);
    assert_eq!(reporter.len(), 1);
    assert!(!registry.contains(handle));
}

#[test]
fn panicking_listener_is_isolated() {
    init_test_logging_default();
    let (registry, reporter) = test_registry_with_reporter();
    let after = RecordingCallback::new();

    registry.listen("hit", &test_player(), PanickingCallback::new("kaboom"));
    registry.listen("hit", &test_player(), after.clone());

    let report = registry.dispatch(&hit_event(test_player(), 1));

    assert_eq!(report.failed, 1);
    assert_eq!(after.call_count(), 1);
    assert!(reporter.messages()[0].contains("panicked: kaboom"));
}

#[test]
#[should_panic(expected = "kaboom")]
fn panics_propagate_when_isolation_is_off() {
    let registry = EventRegistry::with_config(
        CountingConverter::new(),
        RegistryConfig::default().without_panic_isolation(),
    );
    registry.listen("hit", &test_player(), PanickingCallback::new("kaboom"));
    registry.dispatch(&hit_event(test_player(), 1));
}

#[test]
fn conversion_runs_once_per_dispatch_and_never_without_listeners() {
    let converter = CountingConverter::new();
    let registry = EventRegistry::new(converter.clone());

    registry.dispatch(&hit_event(test_player(), 1));
    assert_eq!(converter.conversions(), 0);

    let a = RecordingCallback::new();
    let b = RecordingCallback::new();
    registry.listen("hit", &test_player(), a.clone());
    registry.listen("hit", &test_player(), b.clone());

    let event = Event::new("hit", &test_player())
        .with_arguments([Value::Integer(10), Value::from("rifle")]);
    registry.dispatch(&event);

    assert_eq!(converter.conversions(), 2);
    assert_eq!(a.calls(), b.calls());
    assert_eq!(a.calls()[0], event.arguments);
}

#[test]
fn conversion_failure_skips_delivery_and_is_reported() {
    let reporter = CollectingReporter::new();
    let registry =
        EventRegistry::new(CountingConverter::rejecting("vector")).with_reporter(reporter.clone());
    let callback = RecordingCallback::new();
    let handle = registry.listen_once("move", &test_player(), callback.clone());

    let report = registry.dispatch(&move_event(test_player(), [1.0, 2.0, 3.0]));

    assert_eq!(report.matched, 1);
    assert_eq!(report.invoked, 0);
    assert!(!callback.was_called());
    // Nothing was delivered, so the one-shot listener is still waiting.
    assert!(registry.contains(handle));

    let failures = reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].listener, None);
    assert!(failures[0].message.contains("argument 0"));
}
