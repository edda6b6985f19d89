use crate::error::{Error, Result};
use crate::logger::LogLevel;
use std::env;
use std::path::PathBuf;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    /// Parse "human" or "json" (case-insensitive)
    pub fn parse(s: &str) -> Option<OutputFormat> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Some(OutputFormat::Human),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Configuration for the donation-ledger CLI tool
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory path (default: `.donation-ledger/` in current directory)
    pub data_dir: PathBuf,

    /// Output format: "human" (default) or "json"
    pub output_format: String,

    /// Log level: "info", "debug", "warn", "error" (default: "info")
    pub log_level: String,
}

impl Config {
    /// Create a new config with defaults
    pub fn new() -> Self {
        let data_dir = env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".donation-ledger");

        Config {
            data_dir,
            output_format: "human".to_string(),
            log_level: "info".to_string(),
        }
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
    }

    /// Set output format ("human" or "json")
    pub fn set_output_format(&mut self, format: String) {
        self.output_format = format;
    }

    pub fn set_log_level(&mut self, level: String) {
        self.log_level = level;
    }

    /// Parsed output format; unknown names are a configuration error
    pub fn parsed_output_format(&self) -> Result<OutputFormat> {
        OutputFormat::parse(&self.output_format)
            .ok_or_else(|| Error::Config(format!("Unknown output format: {}", self.output_format)))
    }

    /// Parsed log level; unknown names are a configuration error
    pub fn parsed_log_level(&self) -> Result<LogLevel> {
        LogLevel::parse(&self.log_level)
            .ok_or_else(|| Error::Config(format!("Unknown log level: {}", self.log_level)))
    }

    /// Get ledger snapshot path
    pub fn get_ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.bin")
    }

    /// Load config from environment variables
    ///
    /// Environment variables:
    /// - `DONATION_LEDGER_DATA_DIR`: override data directory
    /// - `DONATION_LEDGER_OUTPUT_FORMAT`: "human" or "json"
    /// - `DONATION_LEDGER_LOG_LEVEL`: log level
    pub fn from_env() -> Self {
        let mut config = Config::new();

        if let Ok(dir) = env::var("DONATION_LEDGER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(format) = env::var("DONATION_LEDGER_OUTPUT_FORMAT") {
            config.output_format = format;
        }

        if let Ok(level) = env::var("DONATION_LEDGER_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
