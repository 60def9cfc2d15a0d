// src/logging.rs

//! Logger installation for applications embedding the console.
//!
//! The library itself only emits through the `log` facade. Hosts that want
//! output call [`init`] once at startup; the filter is taken from `RUST_LOG`
//! and defaults to `info`.

use anyhow::Context;

/// Installs `env_logger` with microsecond timestamps.
///
/// Returns an error (rather than panicking) if a logger is already set.
pub fn init() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .try_init()
        .context("Failed to install env_logger")
}
