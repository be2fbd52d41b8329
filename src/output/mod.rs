//! Output formatting and display system
//!
//! Turns the page's marker elements into a table (plain or colored) or a
//! JSON document once a run has finished.

mod colored;
mod formatter;
mod json;
mod report;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{
    row_cells, row_status, Alignment, Column, FormattingOptions, OutputFormatter, PlainFormatter, RowData,
    TableFormat,
};
pub use json::JsonFormatter;
pub use report::{PageReport, ReportRow};

use crate::{error::Result, types::OutputFormat};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter for the requested format and color support
    pub fn create_formatter(format: OutputFormat, enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            ..FormattingOptions::default()
        };

        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Table if enable_color => Box::new(ColoredFormatter::new(options)),
            OutputFormat::Table => Box::new(PlainFormatter::new(options)),
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(OutputFormat::Table, false, false)
    }
}

/// Main output coordinator that handles result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Render a finished run
    pub fn display_report(&self, report: &PageReport) -> Result<String> {
        self.formatter.format_report(report)
    }

    /// Render one warning line
    pub fn display_warning(&self, warning: &str) -> Result<String> {
        self.formatter.format_warning(warning)
    }
}
