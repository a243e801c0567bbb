//! Fire-and-forget dispatch through `apply` / `apply_sync`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use prioevent::prelude::*;

#[tokio::test]
async fn test_apply_passes_payload() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = seen.clone();
        on(
            "helper/apply",
            Listener::new(move |n, _, _| {
                seen.lock().unwrap().push(n);
                Ok(None)
            }),
            DEFAULT_PRIORITY,
        );
    }

    apply("helper/apply", json!(0x77DD77)).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![json!(0x77DD77)]);
}

#[tokio::test]
async fn test_apply_unknown_event_is_noop() {
    apply("helper/apply-nobody", json!(1)).await.unwrap();
    apply_sync("helper/apply-nobody", json!(1)).unwrap();
    assert_eq!(
        PriorityEvent::global().ls_listeners("helper/apply-nobody"),
        None
    );
}

#[tokio::test]
async fn test_broken_listener_does_not_poison_chain() {
    let seen = Arc::new(Mutex::new(None));
    on("helper/apply-chain", Listener::new(|_, _, _| Ok(None)), 1);
    {
        let seen = seen.clone();
        on(
            "helper/apply-chain",
            Listener::new(move |payload, _, _| {
                *seen.lock().unwrap() = Some(payload);
                Ok(None)
            }),
            2,
        );
    }

    apply("helper/apply-chain", json!({ "type": "load" })).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(json!({ "type": "load" })));
}

#[tokio::test(start_paused = true)]
async fn test_async_apply_is_sequential() {
    let log = Arc::new(Mutex::new(Vec::new()));
    for priority in [4, 1, 3, 2] {
        let log = log.clone();
        on(
            "helper/apply-sequential",
            Listener::new_async(move |_, _, ctx| {
                let log = log.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(50 / ctx.priority as u64)).await;
                    log.lock().unwrap().push(ctx.priority);
                    Ok(None)
                }
            }),
            priority,
        );
    }

    apply("helper/apply-sequential", Value::Null).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn test_apply_sync_surfaces_listener_error() {
    on(
        "helper/apply-error",
        Listener::named("strict", |payload, _, _| {
            if payload.is_null() {
                return Err(EventError::handler("payload required"));
            }
            Ok(None)
        }),
        DEFAULT_PRIORITY,
    );

    let err = apply_sync("helper/apply-error", Value::Null).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Handler);
    apply_sync("helper/apply-error", json!(1)).unwrap();
}
