//! JSON output for scripts

use super::formatter::OutputFormatter;
use super::report::PageReport;
use crate::{error::Result, probe::RunSummary};
use serde_json::json;

/// Emits the report as one pretty-printed JSON document
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(json!({ "title": title }).to_string())
    }

    fn format_report_table(&self, report: &PageReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&report.rows)?)
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        Ok(serde_json::to_string_pretty(summary)?)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(json!({ "warning": warning }).to_string())
    }

    fn format_report(&self, report: &PageReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
