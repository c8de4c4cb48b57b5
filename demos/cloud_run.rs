//! Cloud Run logging example
//!
//! Demonstrates the Cloud Logging layout with trace and label enrichment,
//! the way a request handler on Cloud Run would use it.
//!
//! Run with: cargo run --example cloud_run

use cloudrun_logger::prelude::*;
use cloudrun_logger::{info, warn, CORRELATION_ID_LABEL, TENANT_ID_LABEL};
use std::cell::RefCell;
use std::thread;

thread_local! {
    static REQUEST_TRACE: RefCell<Option<TraceContext>> = const { RefCell::new(None) };
}

fn handle_request(logger: &Logger, store: &LabelStore, request: usize) {
    REQUEST_TRACE.with(|slot| {
        *slot.borrow_mut() = Some(TraceContext::new(
            format!("projects/demo/traces/{:032x}", request),
            format!("{:016x}", request * 7),
        ))
    });
    let _correlation = store.scoped(CORRELATION_ID_LABEL, format!("req-{}", request));

    info!(logger, { "path" => "/orders", "attempt" => 1 }, "Handling request {}", request);
    if request % 2 == 1 {
        warn!(logger, "Slow upstream for request {}", request);
    }

    REQUEST_TRACE.with(|slot| *slot.borrow_mut() = None);
}

fn main() -> Result<()> {
    println!("=== Cloud Run Logger - Cloud Run Example ===\n");

    let production = std::env::var("DEPLOY_ENV").map(|v| v == "production").unwrap_or(false);
    println!("1. Level for this stage: {}", select_level(production));

    let store = LabelStore::new();
    store.set(TENANT_ID_LABEL, "acme");

    let logger = build_config(
        CloudRunConfig::new(production)
            .with_trace(|| Ok(REQUEST_TRACE.with(|slot| slot.borrow().clone())))
            .with_label_store(&store),
    )
    .into_logger();

    println!("\n2. Plain records:");
    logger.debug("Debug output, hidden in production");
    logger.info("Service started");

    println!("\n3. Request-scoped trace and labels:");
    for request in 0..2 {
        handle_request(&logger, &store, request);
    }

    println!("\n4. Worker threads share one logger:");
    let logger = std::sync::Arc::new(logger);
    // the label store is process-wide, so workers only add their own trace
    let handles: Vec<_> = (0..2)
        .map(|worker| {
            let logger = std::sync::Arc::clone(&logger);
            thread::spawn(move || {
                REQUEST_TRACE.with(|slot| {
                    *slot.borrow_mut() = Some(TraceContext::new(
                        format!("projects/demo/traces/worker-{}", worker),
                        format!("{:016x}", worker + 1),
                    ))
                });
                info!(logger, "Worker {} drained its queue", worker);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    println!("\n5. Error with its cause chain:");
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.yaml missing");
    logger.log_error(LogLevel::Error, "Failed to load configuration", &err);

    println!("\n6. Logger metrics:");
    let metrics = logger.metrics();
    println!("   Total logged: {}", metrics.total_logged());
    println!("   Filtered: {}", metrics.filtered_count());
    println!("   Dropped: {}", metrics.dropped_count());

    logger.flush()?;

    println!("\n=== Example completed successfully ===");
    Ok(())
}
