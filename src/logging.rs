//! Tracing setup for the smoke binaries.
//!
//! Logs go to stderr so the report on stdout stays byte-for-byte stable.
//! `RUST_LOG` overrides the default `info` filter.

use tracing_subscriber::EnvFilter;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub fn init() -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
