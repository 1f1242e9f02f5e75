// src/logging.rs
//! Operation logging for an embedded store.
//!
//! MemQuery is linked into a host process, so it pulls in no logger
//! framework and needs no subscriber setup: diagnostics go to stderr,
//! gated by one process-wide verbosity. The verbosity is seeded from the
//! `MEMQUERY_LOG` environment variable on first use (default `warn`) and
//! can be changed at runtime with [`set_log_level`].

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity threshold and message severity.
///
/// `Off` is only meaningful as a threshold: it silences everything and is
/// never a message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ParseLevelError(raw.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    }
}

// u8::MAX marks "not yet seeded from the environment".
const UNSEEDED: u8 = u8::MAX;

static VERBOSITY: AtomicU8 = AtomicU8::new(UNSEEDED);

fn decode(raw: u8) -> LogLevel {
    match raw {
        0 => LogLevel::Off,
        1 => LogLevel::Error,
        2 => LogLevel::Warn,
        3 => LogLevel::Info,
        4 => LogLevel::Debug,
        5 => LogLevel::Trace,
        _ => LogLevel::Warn,
    }
}

/// Change the process-wide verbosity.
pub fn set_log_level(level: LogLevel) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Current process-wide verbosity, seeding it from `MEMQUERY_LOG` on
/// first use. Two threads may both seed; they store the same value.
pub fn get_log_level() -> LogLevel {
    match VERBOSITY.load(Ordering::Relaxed) {
        UNSEEDED => {
            let level = std::env::var("MEMQUERY_LOG")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(LogLevel::Warn);
            VERBOSITY.store(level as u8, Ordering::Relaxed);
            level
        }
        raw => decode(raw),
    }
}

/// Whether a message at `level` would currently be emitted.
#[inline]
pub fn enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level <= get_log_level()
}

/// Sink behind the logging macros. Takes `fmt::Arguments` so disabled
/// levels cost no formatting or allocation.
#[doc(hidden)]
pub fn emit(level: LogLevel, target: &str, args: fmt::Arguments<'_>) {
    if enabled(level) {
        eprintln!("memquery [{}] {}: {}", level, target, args);
    }
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::emit(
            $crate::logging::LogLevel::Error,
            module_path!(),
            format_args!($($arg)*),
        )
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::emit(
            $crate::logging::LogLevel::Warn,
            module_path!(),
            format_args!($($arg)*),
        )
    };
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::emit(
            $crate::logging::LogLevel::Info,
            module_path!(),
            format_args!($($arg)*),
        )
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::emit(
            $crate::logging::LogLevel::Debug,
            module_path!(),
            format_args!($($arg)*),
        )
    };
}

/// Log a trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::logging::emit(
            $crate::logging::LogLevel::Trace,
            module_path!(),
            format_args!($($arg)*),
        )
    };
}
