//! Logging configuration and initialization
//!
//! Centralized `tracing` setup for all VIP binaries. Library code never
//! prints; it emits structured events (`info!`, `warn!`, `error!`) with
//! fields, and the binary decides once at startup where they go:
//! console, a daily-rolling file, or both, in text or JSON form.
//!
//! Configuration comes from the caller (CLI flags) merged with
//! environment variables:
//!
//! - `VIP_LOG_LEVEL`: trace | debug | info | warn | error
//! - `VIP_LOG_OUTPUT`: console | file | both
//! - `VIP_LOG_FORMAT`: text | json
//! - `VIP_LOG_DIR`: directory for log files
//! - `VIP_LOG_FILTER`: extra filter directives (e.g. "rusqlite=warn")

use crate::error::{Result, VipError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Minimum level of events to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to a tracing `Level`
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = VipError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(VipError::Config(format!("invalid log level: {other}"))),
        }
    }
}

/// Where log events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl std::str::FromStr for LogOutput {
    type Err = VipError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            other => Err(VipError::Config(format!("invalid log output: {other}"))),
        }
    }
}

/// Event encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = VipError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(VipError::Config(format!("invalid log format: {other}"))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum log level to display
    pub level: LogLevel,

    /// Output target
    pub output: LogOutput,

    /// Event encoding
    pub format: LogFormat,

    /// Directory for log files (only used when output includes file)
    pub log_dir: PathBuf,

    /// Log file name prefix ("vip" -> "vip.2024-01-18.log")
    pub file_prefix: String,

    /// Additional filter directives (e.g. "rusqlite=warn")
    pub filter_directives: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: LogOutput::Console,
            format: LogFormat::Text,
            log_dir: PathBuf::from("./logs"),
            file_prefix: "vip".to_string(),
            filter_directives: None,
        }
    }
}

impl LogConfig {
    /// Config with the given level, everything else defaulted
    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Apply `VIP_LOG_*` environment variable overrides on top of `self`
    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var("VIP_LOG_LEVEL") {
            self.level = level.parse()?;
        }
        if let Ok(output) = std::env::var("VIP_LOG_OUTPUT") {
            self.output = output.parse()?;
        }
        if let Ok(format) = std::env::var("VIP_LOG_FORMAT") {
            self.format = format.parse()?;
        }
        if let Ok(dir) = std::env::var("VIP_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
        if let Ok(filter) = std::env::var("VIP_LOG_FILTER") {
            self.filter_directives = Some(filter);
        }
        Ok(self)
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let mut filter =
        EnvFilter::from_default_env().add_directive(config.level.to_tracing_level().into());

    if let Some(ref directives) = config.filter_directives {
        for directive in directives.split(',') {
            filter = filter.add_directive(
                directive
                    .trim()
                    .parse()
                    .map_err(|e| VipError::Config(format!("bad filter directive: {e}")))?,
            );
        }
    }

    let to_console = matches!(config.output, LogOutput::Console | LogOutput::Both);
    let to_file = matches!(config.output, LogOutput::File | LogOutput::Both);

    let file_writer = if to_file {
        std::fs::create_dir_all(&config.log_dir)?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, &config.file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        // Keep the flush guard alive for the process lifetime
        std::mem::forget(guard);
        Some(non_blocking)
    } else {
        None
    };

    match config.format {
        LogFormat::Text => {
            let console_layer =
                to_console.then(|| fmt::layer().with_writer(std::io::stdout).with_target(true));
            let file_layer = file_writer
                .map(|writer| fmt::layer().with_writer(writer).with_target(true).with_ansi(false));

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| VipError::Config(format!("failed to init logging: {e}")))?;
        },
        LogFormat::Json => {
            let console_layer = to_console
                .then(|| fmt::layer().json().with_writer(std::io::stdout).with_target(true));
            let file_layer = file_writer.map(|writer| {
                fmt::layer().json().with_writer(writer).with_target(true).with_ansi(false)
            });

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| VipError::Config(format!("failed to init logging: {e}")))?;
        },
    }

    Ok(())
}
