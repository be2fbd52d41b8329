//! Structured logging for the page latency prober
//!
//! This module provides:
//! - Leveled log entries with structured fields
//! - Console and JSON output formats
//! - Session and per-run correlation IDs
//! - A probe logger that traces dispatch and settlement of every probe
//!
//! All output goes to stderr so the report on stdout stays machine-readable.

use crate::error::{AppError, Result};
use crate::models::{Config, ProbeResult, ProbeTarget};
use crate::types::OriginKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - detailed information for debugging
    Debug = 1,
    /// Info level - general application information
    Info = 2,
    /// Warning level - potentially harmful situations
    Warn = 3,
    /// Error level - error events but application can continue
    Error = 4,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m",
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
    pub location: Option<LogLocation>,
}

/// Source code location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
}

/// Shared logging context for correlation and session tracking
#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
    current_correlation_id: Option<String>,
}

/// Logger implementation with multiple output formats
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    include_location: bool,
    format: LogFormat,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a new logger
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            include_location: false,
            format: LogFormat::Console,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger with specific configuration
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            include_location: config.debug,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    pub fn set_color(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    /// Set session correlation ID
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Start a correlated operation
    pub async fn start_operation(&self, operation_name: &str) -> String {
        let correlation_id = Uuid::new_v4().to_string();
        {
            let mut context = self.context.write().await;
            context.current_correlation_id = Some(correlation_id.clone());
        }

        self.info(&format!("Started operation: {}", operation_name))
            .correlation_id(&correlation_id)
            .field("operation", operation_name)
            .field("operation_type", "start")
            .log()
            .await;

        correlation_id
    }

    /// End a correlated operation
    pub async fn end_operation(&self, correlation_id: &str, operation_name: &str) {
        self.info(&format!("Completed operation: {}", operation_name))
            .correlation_id(correlation_id)
            .field("operation", operation_name)
            .field("operation_type", "end")
            .log()
            .await;

        let mut context = self.context.write().await;
        if context.current_correlation_id.as_deref() == Some(correlation_id) {
            context.current_correlation_id = None;
        }
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn trace(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    async fn write_entry(&self, mut entry: LogEntry) {
        if !self.would_log(entry.level) {
            return;
        }

        let context = self.context.read().await;
        if let Some(session_id) = &context.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }
        if entry.correlation_id.is_none() {
            entry.correlation_id = context.current_correlation_id.clone();
        }
        drop(context);

        let _ = writeln!(io::stderr(), "{}", self.format_entry(&entry));
    }

    pub(crate) fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => self.format_json(entry),
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}", timestamp, formatted_level, entry.logger, entry.message);

        if let Some(correlation_id) = &entry.correlation_id {
            let short = correlation_id.get(..8).unwrap_or(correlation_id);
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        if self.include_location {
            if let Some(location) = &entry.location {
                output.push_str(&format!(" @ {}:{}", location.file, location.line));
            }
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
                location: None,
            },
        }
    }

    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }

    #[cfg(test)]
    fn build(self) -> LogEntry {
        self.entry
    }
}

/// Logger for the probe lifecycle
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("PROBE".to_string(), config),
        }
    }

    /// A logger that drops everything below warnings
    pub fn quiet() -> Self {
        let mut logger = Logger::new("PROBE".to_string());
        logger.set_level(LogLevel::Warn);
        Self { logger }
    }

    pub fn inner(&self) -> &Logger {
        &self.logger
    }

    /// Log the start of a run over a page
    pub async fn log_run_started(&self, page_location: &str, target_count: usize) -> String {
        let correlation_id = self.logger.start_operation("probe_run").await;
        self.logger
            .info(&format!("Probing {} targets from {}", target_count, page_location))
            .field("page_location", page_location)
            .field("target_count", target_count)
            .log()
            .await;
        correlation_id
    }

    /// Log one probe leaving
    pub async fn log_probe_dispatched(&self, target: &ProbeTarget, origin: OriginKind, request_url: &str) {
        self.logger
            .debug(&format!("GET {} ({})", request_url, origin.name()))
            .field("target", &target.display_target_id)
            .field("url", &target.url)
            .field("origin", origin.name())
            .log()
            .await;
    }

    /// Log one probe settling; failures carry the underlying reason
    pub async fn log_probe_settled(&self, target: &ProbeTarget, result: &ProbeResult, reason: Option<&str>) {
        let message = format!("{} -> {}", target.url, result.display_value());
        let mut builder = self
            .logger
            .debug(&message)
            .field("target", &target.display_target_id)
            .field("elapsed_ms", result.elapsed_ms)
            .field("is_error", result.is_error);

        if let Some(reason) = reason {
            builder = builder.field("reason", reason);
        }

        builder.log().await;
    }

    /// Log a result whose marker element is gone
    pub async fn log_render_skipped(&self, target: &ProbeTarget) {
        self.logger
            .debug(&format!("No element with id '{}', result dropped", target.display_target_id))
            .field("target", &target.display_target_id)
            .log()
            .await;
    }

    pub async fn log_run_finished(&self, correlation_id: &str, rendered: usize, failed: usize) {
        self.logger
            .info(&format!("Run finished: {} rendered, {} failed", rendered, failed))
            .field("rendered", rendered)
            .field("failed", failed)
            .log()
            .await;
        self.logger.end_operation(correlation_id, "probe_run").await;
    }
}

/// Logger factory sharing one session id
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    pub async fn create_probe_logger(&self) -> ProbeLogger {
        let probe_logger = ProbeLogger::new(&self.config);
        probe_logger.logger.set_session_id(self.session_id.clone()).await;
        probe_logger
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Convenience macros for logging with location information
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageSource;
    use std::str::FromStr;

    fn config(verbose: bool, debug: bool) -> Config {
        let mut config = Config::new(PageSource::Url("http://127.0.0.1:9090/".to_string()));
        config.verbose = verbose;
        config.debug = debug;
        config.enable_color = false;
        config
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("fatal").is_err());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_level_follows_config() {
        assert_eq!(Logger::with_config("T".into(), &config(false, false)).min_level, LogLevel::Warn);
        assert_eq!(Logger::with_config("T".into(), &config(true, false)).min_level, LogLevel::Info);

        let debug = Logger::with_config("T".into(), &config(false, true));
        assert_eq!(debug.min_level, LogLevel::Debug);
        assert_eq!(debug.format, LogFormat::Json);
        assert!(debug.include_location);
    }

    #[test]
    fn test_quiet_probe_logger_skips_debug() {
        let logger = ProbeLogger::quiet();
        assert!(!logger.inner().would_log(LogLevel::Debug));
        assert!(logger.inner().would_log(LogLevel::Error));
    }

    #[test]
    fn test_console_format_without_color() {
        let mut logger = Logger::new("PROBE".to_string());
        logger.set_color(false);
        let entry = logger
            .info("lineMs1 settled")
            .correlation_id("0123456789abcdef")
            .field("elapsed_ms", 120)
            .build();

        let line = logger.format_entry(&entry);
        assert!(line.contains(" INFO [PROBE] lineMs1 settled"));
        assert!(line.contains("[01234567]"));
        assert!(line.contains("elapsed_ms=120"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let mut logger = Logger::new("PROBE".to_string());
        logger.set_format(LogFormat::Json);
        let entry = logger.warn("slow").field("url", "/api/status").build();

        let parsed: serde_json::Value = serde_json::from_str(&logger.format_entry(&entry)).unwrap();
        assert_eq!(parsed["level"], "Warn");
        assert_eq!(parsed["fields"]["url"], "/api/status");
    }

    #[tokio::test]
    async fn test_factory_shares_session() {
        let factory = LoggerFactory::new(config(false, false));
        let logger = factory.create_logger("APP").await;
        let context = logger.context.read().await;
        assert_eq!(context.session_id.as_deref(), Some(factory.session_id()));
    }

    #[test]
    fn test_run_lifecycle_logs_below_level() {
        tokio_test::block_on(async {
            let logger = ProbeLogger::quiet();
            let target = ProbeTarget::new("/api/status", "lineMs1");
            let id = logger.log_run_started("http://127.0.0.1:9090/", 1).await;
            logger.log_probe_settled(&target, &ProbeResult::failure(), Some("HTTP 500")).await;
            logger.log_run_finished(&id, 1, 1).await;
            assert!(logger.inner().context.read().await.current_correlation_id.is_none());
        });
    }

    #[tokio::test]
    async fn test_operation_clears_correlation() {
        let logger = Logger::new("T".to_string());
        let id = logger.start_operation("probe_run").await;
        assert_eq!(logger.context.read().await.current_correlation_id.as_deref(), Some(id.as_str()));
        logger.end_operation(&id, "probe_run").await;
        assert!(logger.context.read().await.current_correlation_id.is_none());
    }
}
