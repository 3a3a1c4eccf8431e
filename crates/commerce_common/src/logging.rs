//! Logging utilities for the commerce crates.
//!
//! Everything logs through `tracing`; the binary installs the subscriber once
//! at startup. The host event log (see [`crate::services::CommerceHost`]) is a
//! separate, host-owned sink.

use tracing::{error, info, Level};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use commerce_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured on top of the given level. Calling this
/// twice is harmless; the second call does nothing.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into());

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
