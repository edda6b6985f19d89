use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a log line, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Parse "error", "warn", "info" or "debug" (case-insensitive)
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    fn from_u8(v: u8) -> LogLevel {
        match v {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Simple leveled logger for donation-ledger.
///
/// All output goes to stderr so that stdout stays reserved for command results.
pub struct Logger;

impl Logger {
    pub fn set_level(level: LogLevel) {
        MAX_LEVEL.store(level as u8, Ordering::Relaxed);
    }

    pub fn level() -> LogLevel {
        LogLevel::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
    }

    pub fn enabled(level: LogLevel) -> bool {
        level <= Logger::level()
    }

    pub fn info(msg: &str) {
        Logger::emit(LogLevel::Info, "INFO", msg);
    }

    pub fn debug(msg: &str) {
        Logger::emit(LogLevel::Debug, "DEBUG", msg);
    }

    pub fn warn(msg: &str) {
        Logger::emit(LogLevel::Warn, "WARN", msg);
    }

    fn emit(level: LogLevel, tag: &str, msg: &str) {
        if Logger::enabled(level) {
            eprintln!("[{}] {}", tag, msg);
        }
    }
}
