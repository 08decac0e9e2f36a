//! Tracing subscriber setup for applications embedding relay.
//!
//! Library crates only emit events. Call [`init_tracing`] once from a binary
//! to print them; `RUST_LOG` overrides the default directive.

use tracing_subscriber::EnvFilter;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the filter used by [`init_tracing`].
///
/// `RUST_LOG` wins when it parses; otherwise `default_directive` applies.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs a global `fmt` subscriber. Fails if one is already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(true)
        .try_init()
}
