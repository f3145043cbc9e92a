//! Logging bootstrap for applications built on the engine.
//!
//! All engine crates log through [`tracing`]. Applications install a subscriber
//! once at startup with [`init`] (or [`init_with_filter`] for an explicit
//! directive string).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

/// Directives used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,paper_render=debug,wgpu_core=info,naga=info,wgpu_hal=info";

fn env_or_default() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global `fmt` subscriber, honoring `RUST_LOG`.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_or_default()).init();
}

/// Install the global `fmt` subscriber with an explicit filter directive.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn init_with_filter(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}

/// Like [`init`], but returns an error if a subscriber is already installed.
pub fn try_init() -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(env_or_default())
        .finish()
        .try_init()
}

/// Like [`init_with_filter`], but returns an error if a subscriber is already installed.
pub fn try_init_with_filter(filter: &str) -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .finish()
        .try_init()
}
