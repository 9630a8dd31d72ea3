//! Logging setup for provider processes
//!
//! Terraform captures the plugin's stderr, so log lines go there. The level
//! follows `TF_LOG` unless set explicitly.

use crate::error::{Result, TfplugError};

/// Log level for the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a `TF_LOG` value; `JSON` maps to trace like Terraform does
    pub fn from_tf_log(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" | "JSON" => Some(LogLevel::Trace),
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("TF_LOG")
            .ok()
            .and_then(|value| Self::from_tf_log(&value))
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: LogLevel,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::from_env().unwrap_or(LogLevel::Info),
            ansi: false,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn without_logging(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Installs the global subscriber; fails if one is already installed
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(config.level))
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .map_err(|e| TfplugError::Custom(format!("Failed to initialize logging: {}", e)))
}
