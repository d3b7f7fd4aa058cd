//! Logging setup and run context.
//!
//! - **Tracing**: `init_tracing` installs an `EnvFilter`-driven fmt
//!   subscriber; `RUST_LOG` wins over the configured level.
//! - **Context Tracking**: thread-local engine and phase, reported when an
//!   engine serves a fallback.
//! - **Batch Progress**: atomic counters for multi-snapshot runs.

pub mod context;

pub use context::{
    get_current_context, get_progress, increment_processed, record_fallback, reset_context,
    set_engine, set_phase, start_batch, BatchProgress, ContextGuard, EngineContext, EnginePhase,
};

use std::any::Any;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset or unparsable. Calling
/// this twice is harmless; the second subscriber is rejected.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();

    if initialized.is_ok() {
        tracing::debug!(level = default_level, "Tracing initialized");
    }
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
