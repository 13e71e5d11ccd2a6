//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system with a default level.
///
/// `RUST_LOG` still overrides the default filter. Calling this more than once
/// is harmless: the second logger is rejected and a debug line is emitted.
pub fn init(default_level: log::LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized; keeping existing configuration");
    }
}

/// Parse a textual level ("info", "debug", ...) falling back to `Info`.
pub fn level_from_str(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or_else(|_| {
        log::warn!("Unknown log level '{}', using info", level);
        log::LevelFilter::Info
    })
}
