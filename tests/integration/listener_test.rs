//! Registration and removal through `on` / `off`.

use prioevent::prelude::*;

use crate::helpers::{f404, priorities};

#[test]
fn test_global_is_singleton() {
    let a = PriorityEvent::global();
    let b = PriorityEvent::global();
    assert!(PriorityEvent::same_instance(a, b));
}

#[test]
fn test_on_keeps_order_until_dispatch() {
    let f = f404();
    on("helper/on", f.clone(), DEFAULT_PRIORITY);
    for priority in [1, 2, 3, 11] {
        on("helper/on", f.clone(), priority);
    }

    assert_eq!(priorities("helper/on"), vec![10, 1, 2, 3, 11]);

    apply_sync("helper/on", Value::Null).unwrap();
    assert_eq!(priorities("helper/on"), vec![1, 2, 3, 10, 11]);
}

#[test]
fn test_off_requires_exact_priority() {
    let f = f404();
    on("helper/off", f.clone(), DEFAULT_PRIORITY);
    for priority in [1, 2, 3, 11] {
        on("helper/off", f.clone(), priority);
    }
    assert_eq!(priorities("helper/off"), vec![10, 1, 2, 3, 11]);

    off("helper/off", &f, DEFAULT_PRIORITY);
    off("helper/off", &f, 1);
    off("helper/off", &f, 2);
    off("helper/off", &f, 66);
    off("helper/off", &f, 77);

    assert_eq!(priorities("helper/off"), vec![3, 11]);
}

#[test]
fn test_never_registered_event() {
    let emitter = PriorityEvent::global();
    assert_eq!(emitter.ls_listeners("helper/never-registered"), None);
    off("helper/never-registered", &f404(), DEFAULT_PRIORITY);
    assert!(!emitter
        .ls_events()
        .iter()
        .any(|e| e == "helper/never-registered"));
}

#[test]
fn test_emptied_event_not_listed() {
    let f = f404();
    on("helper/emptied", f.clone(), 4);
    assert!(PriorityEvent::global()
        .ls_events()
        .iter()
        .any(|e| e == "helper/emptied"));

    off("helper/emptied", &f, 4);
    assert!(!PriorityEvent::global()
        .ls_events()
        .iter()
        .any(|e| e == "helper/emptied"));
}
