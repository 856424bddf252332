//! Bridge from the `log` facade to a host-provided logger.

use std::sync::{Arc, OnceLock};

/// Trait representing a logger that can log messages at various levels.
///
/// Implemented by the host application to receive log messages from the core.
/// It is exported via `UniFFI` for use in foreign languages.
///
/// Messages never contain signatures or key material.
///
/// # Examples
///
/// ```rust
/// use passkey39_core::{LogLevel, Logger};
///
/// struct MyLogger;
///
/// impl Logger for MyLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         println!("[{:?}] {}", level, message);
///     }
/// }
/// ```
///
/// ## Swift
///
/// ```swift
/// class Passkey39LoggerBridge: Passkey39.Logger {
///     static let shared = Passkey39LoggerBridge()
///
///     func log(level: Passkey39.LogLevel, message: String) {
///         Log.log(level.toCoreLevel(), message)
///     }
/// }
///
/// Passkey39.setLogger(logger: Passkey39LoggerBridge.shared) // Call this only once!
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Logs a message at the specified log level.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    /// Very low priority, extremely detailed messages.
    Trace,
    /// Lower priority debugging information.
    Debug,
    /// Progress of ceremonies.
    Info,
    /// Potentially harmful situations, e.g. degraded challenges.
    Warn,
    /// Failed ceremonies.
    Error,
}

/// Forwards `log` records to the host-provided [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if !is_forwarded(record.level(), record.module_path()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(log_level(record.level()), format!("{}", record.args()));
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// Dependencies are only forwarded from `Info` upwards.
fn is_forwarded(level: log::Level, module_path: Option<&str>) -> bool {
    let is_record_from_passkey39 =
        module_path.is_some_and(|module_path| module_path.starts_with("passkey39"));
    let is_debug_or_trace_level = level == log::Level::Debug || level == log::Level::Trace;

    is_record_from_passkey39 || !is_debug_or_trace_level
}

const fn log_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Sets the global logger.
///
/// Should be called once, before any ceremony runs. Subsequent calls are ignored.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        eprintln!("Logger already set");
        return;
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
