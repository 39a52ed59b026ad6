//! Tracing subscriber setup for embedders.
//!
//! The library itself only emits `tracing` events; installing a
//! subscriber is the embedder's call. This helper wires up the
//! conventional stack for binaries and tests.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a global tracing subscriber with `RUST_LOG` filtering.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set.
/// Calling it twice is harmless; the second call is a no-op.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopsphere_storefront=info".into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
