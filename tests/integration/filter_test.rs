//! Value-transforming dispatch through `filter` / `filter_sync`.

use prioevent::prelude::*;

fn to_hex() -> Listener {
    Listener::named("to_hex", |n, _, _| {
        let n = n
            .as_u64()
            .ok_or_else(|| EventError::handler("expected a number"))?;
        Ok(Some(json!(format!("#{n:X}"))))
    })
}

#[tokio::test]
async fn test_filter_returns_transformed_value() {
    on("helper/filter", to_hex(), DEFAULT_PRIORITY);
    let hex = filter("helper/filter", json!(0x77DD77)).await.unwrap();
    assert_eq!(hex, Some(json!("#77DD77")));
}

#[test]
fn test_filter_sync_returns_transformed_value() {
    on("helper/filter-sync", to_hex(), DEFAULT_PRIORITY);
    let hex = filter_sync("helper/filter-sync", json!(0x77DD77)).unwrap();
    assert_eq!(hex, Some(json!("#77DD77")));
}

#[tokio::test]
async fn test_filter_unknown_event_returns_none() {
    assert_eq!(filter("helper/filter-nobody", json!(5)).await.unwrap(), None);
    assert_eq!(filter_sync("helper/filter-nobody", json!(5)).unwrap(), None);
}

#[tokio::test]
async fn test_filter_pipeline_orders_by_priority() {
    on(
        "helper/filter-pipeline",
        Listener::new(|v, _, _| Ok(Some(json!(format!("{}!", v.as_str().unwrap_or_default()))))),
        20,
    );
    on(
        "helper/filter-pipeline",
        Listener::new_async(|v, _, _| async move {
            Ok(Some(json!(v.as_str().unwrap_or_default().to_uppercase())))
        }),
        10,
    );

    let out = filter("helper/filter-pipeline", json!("fresh")).await.unwrap();
    assert_eq!(out, Some(json!("FRESH!")));
}
