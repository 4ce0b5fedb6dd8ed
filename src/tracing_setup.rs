//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for the mining pipeline.
///
/// Reads `PATE_LOG` for per-module levels (`PATE_LOG=pate::item_sets=debug`),
/// then `RUST_LOG`, and falls back to `pate=info`.
///
/// Idempotent. If the host application already installed a global
/// subscriber, that one is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PATE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("pate=info"));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}
