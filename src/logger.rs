//! Logging setup for the binaries.
use std::sync::Once;

use env_logger::Builder;
use log::{LevelFilter, debug};

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend.
///
/// Defaults to `info` for this crate and `warn` for dependencies, and accepts overrides
/// from `RUST_LOG`. Calling it more than once is harmless.
pub fn initialize_logger() {
    // a poisoned guard still runs the install again
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("chainmap", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Another logger may already be installed, e.g. by a test harness.
        if builder.try_init().is_err() {
            debug!("logger already initialized");
        }
    });
}
