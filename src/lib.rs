// Arctis Monitor Library - Public API

// Re-export error types
pub mod error;
pub use error::{MonitorError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

// Initialize logging
pub fn init_logging() {
    use std::io::Write;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            let line = log_line(buf.timestamp(), record.level(), record.target(), record.args());
            buf.write_all(line.as_bytes())
        })
        .init();
}

/// One log record, terminated with an explicit `\r\n` so records stay aligned while the
/// terminal is in raw mode
fn log_line(
    timestamp: impl std::fmt::Display,
    level: log::Level,
    target: &str,
    args: &std::fmt::Arguments,
) -> String {
    format!("[{} {:<5} {}] {}\r\n", timestamp, level, target, args)
}
