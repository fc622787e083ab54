//! Tracing subscriber setup for binaries and tests embedding the crate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "library_cache=info";

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns false if a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
