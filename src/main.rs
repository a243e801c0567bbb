//! PriorityEvent demo
//!
//! Wires configuration and logging, registers a few sample listeners, and
//! bridges process lifecycle signals (startup, Ctrl-C) into events.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt};

use prioevent::prelude::*;
use prioevent_core::config::AppConfig;

const LOAD_EVENT: &str = "app/load";
const UNLOAD_EVENT: &str = "app/unload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Fresh,
    Stale,
}

/// Apple quality assurance: a filter that keeps only the fresh apples.
struct AppleBox;

impl Event for AppleBox {
    const NAME: &'static str = "quality-assurance/apple";
    type Payload = Vec<Status>;
    type Output = Vec<Status>;
}

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, EventError> {
    let env = std::env::var("PRIOEVENT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> EventResult<()> {
    tracing::info!("Starting prioevent demo v{}", env!("CARGO_PKG_VERSION"));

    let emitter = PriorityEvent::init_global(config.emitter.clone())?;

    register_load_listeners(emitter);
    emitter.on_typed::<AppleBox, _>(
        |apples, _, _| {
            Ok(Some(
                apples
                    .into_inner()
                    .into_iter()
                    .filter(|s| *s == Status::Fresh)
                    .collect(),
            ))
        },
        DEFAULT_PRIORITY,
    );
    on(
        UNLOAD_EVENT,
        Listener::named("goodbye", |event, _, ctx| {
            tracing::info!(event = %ctx.event, "Received {}, shutting down", event["type"]);
            Ok(None)
        }),
        DEFAULT_PRIORITY,
    );

    // ── Startup bridge ───────────────────────────────────────────
    apply(LOAD_EVENT, json!({ "type": "load" })).await?;

    // ── Filter pipeline ──────────────────────────────────────────
    let apple_box = collect_apples(24);
    let fresh = emitter
        .filter_typed::<AppleBox>(apple_box.clone())
        .await?
        .map(Carried::into_inner);
    match fresh {
        Some(fresh) if !fresh.is_empty() => tracing::info!(
            "Only {} fresh apples out of {} apples in the box.",
            fresh.len(),
            apple_box.len()
        ),
        _ => tracing::info!("What a season! There is no good apple at all~"),
    }

    // ── Shutdown bridge ──────────────────────────────────────────
    tracing::info!("Press Ctrl-C to fire '{}'", UNLOAD_EVENT);
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| EventError::internal(format!("Failed to listen for shutdown signal: {e}")))?;
    apply(UNLOAD_EVENT, json!({ "type": "unload" })).await?;

    tracing::info!("Demo finished");
    Ok(())
}

/// Registers the load chain. Listeners are added out of order on purpose;
/// the dispatch runs them by priority.
fn register_load_listeners(emitter: &PriorityEvent) {
    // 3rd
    emitter.add_listener(
        LOAD_EVENT,
        Listener::new(|event, _, _| {
            tracing::info!("This is the very first listener of {} event.", event["type"]);
            Ok(None)
        }),
        DEFAULT_PRIORITY,
    );

    // 1st
    emitter.add_listener(
        LOAD_EVENT,
        Listener::new(|event, _, _| {
            tracing::info!(
                "This is the second listener of {} event. Yet it runs before the first.",
                event["type"]
            );
            Ok(None)
        }),
        9,
    );

    // 4th
    emitter.add_listener(
        LOAD_EVENT,
        Listener::new(|_, _, ctx| {
            let name = if ctx.name.is_empty() { "anonymous" } else { ctx.name.as_str() };
            tracing::info!("This is the last msg from \"{}\" listener", name);
            Ok(None)
        }),
        99,
    );

    // 2nd
    emitter.add_listener(
        LOAD_EVENT,
        Listener::named_async("debug", |_, _, ctx| async move {
            tracing::info!(
                "Added later but runs second is \"{}\". It has priority {} and was added after the one above.",
                ctx.name,
                ctx.priority
            );
            Ok(None)
        }),
        9,
    );

    // Never runs: removed with the same priority it was added with.
    let never_happen = Listener::named("never_happen", |_, _, ctx| {
        tracing::warn!("'{}' should have been removed", ctx.name);
        Ok(None)
    });
    emitter.add_listener(LOAD_EVENT, never_happen.clone(), 1);
    emitter.remove_listener(LOAD_EVENT, &never_happen, 1);

    // 5th
    emitter.add_listener(
        LOAD_EVENT,
        Listener::named("debug", |_, _, ctx| {
            let total = ctx.emitter.count_listeners(&ctx.event);
            let grammar = if total > 1 { "listeners were" } else { "listener was" };
            tracing::info!("In the end, {} {} submitted", total, grammar);
            Ok(None)
        }),
        100,
    );
}

/// A box of apples in a fixed fresh/stale pattern.
fn collect_apples(count: usize) -> Vec<Status> {
    (0..count)
        .map(|i| if i % 3 == 0 { Status::Stale } else { Status::Fresh })
        .collect()
}
