//! Core formatting traits and the plain text implementation

use super::report::{PageReport, ReportRow};
use crate::{error::Result, page::MarkerColor, probe::RunSummary};

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the link/marker/result table
    fn format_report_table(&self, report: &PageReport) -> Result<String>;

    /// Format run counters
    fn format_summary(&self, summary: &RunSummary) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format the full report
    fn format_report(&self, report: &PageReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(&format!("Latency: {}", report.page_location))?);
        output.push_str("\n\n");
        output.push_str(&self.format_report_table(report)?);
        output.push_str("\n\n");
        output.push_str(&self.format_summary(&report.summary)?);
        Ok(output)
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    pub enable_color: bool,
    /// Verbose mode adds the inline CSS column
    pub verbose_mode: bool,
    pub table_borders: bool,
    /// Longest URL shown before truncation
    pub max_url_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            table_borders: true,
            max_url_width: 60,
        }
    }
}

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    Left,
    Right,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
}

impl Column {
    pub fn new(header: &str, alignment: Alignment) -> Self {
        Self {
            header: header.to_string(),
            alignment,
        }
    }
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Table layout shared by the plain and colored formatters
#[derive(Debug, Clone)]
pub struct TableFormat {
    pub columns: Vec<Column>,
    pub show_borders: bool,
}

impl TableFormat {
    /// Columns for a report, given the formatting options
    pub fn for_report(options: &FormattingOptions) -> Self {
        let mut columns = vec![
            Column::new("URL", Alignment::Left),
            Column::new("Marker", Alignment::Left),
            Column::new("Result", Alignment::Right),
            Column::new("Status", Alignment::Left),
        ];
        if options.verbose_mode {
            columns.push(Column::new("Style", Alignment::Left));
        }
        Self {
            columns,
            show_borders: options.table_borders,
        }
    }

    /// Width of each column: the widest of header and cells
    pub fn column_widths(&self, rows: &[RowData]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count(), usize::max)
            })
            .collect()
    }

    pub fn horizontal_border(&self, widths: &[usize]) -> String {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", segments.join("+"))
    }

    /// Pad one cell to its column width
    pub fn pad(&self, cell: &str, column: usize, widths: &[usize]) -> String {
        let width = widths.get(column).copied().unwrap_or(0);
        match self.columns.get(column).map(|c| c.alignment) {
            Some(Alignment::Right) => format!("{:>width$}", cell, width = width),
            _ => format!("{:<width$}", cell, width = width),
        }
    }

    /// Join already padded cells into a table line
    pub fn join_cells(&self, cells: &[String]) -> String {
        if self.show_borders {
            format!("| {} |", cells.join(" | "))
        } else {
            cells.join("  ")
        }
    }
}

/// Status word for a row
pub fn row_status(row: &ReportRow) -> &'static str {
    match (&row.text, row.style) {
        (None, _) => "missing",
        (Some(_), None) => "pending",
        (Some(_), Some(style)) => match style.color {
            MarkerColor::Healthy => "ok",
            MarkerColor::Warning => "slow",
            MarkerColor::Alert => "failed",
        },
    }
}

/// Plain cell values for a row
pub fn row_cells(row: &ReportRow, options: &FormattingOptions) -> RowData {
    let mut cells = vec![
        truncate(&row.url, options.max_url_width),
        row.marker_id.clone(),
        row.text.clone().unwrap_or_else(|| "-".to_string()),
        row_status(row).to_string(),
    ];
    if options.verbose_mode {
        cells.push(row.style.map(|s| s.to_css()).unwrap_or_default());
    }
    cells
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max || max < 4 {
        return text.to_string();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{}...", kept)
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    fn create_table(&self, format: &TableFormat, rows: &[RowData]) -> String {
        let widths = format.column_widths(rows);
        let mut lines = Vec::new();

        let header: Vec<String> = format
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format.pad(&c.header, i, &widths))
            .collect();

        if format.show_borders {
            lines.push(format.horizontal_border(&widths));
        }
        lines.push(format.join_cells(&header));
        if format.show_borders {
            lines.push(format.horizontal_border(&widths));
        }

        for row in rows {
            let cells: Vec<String> = row.iter().enumerate().map(|(i, c)| format.pad(c, i, &widths)).collect();
            lines.push(format.join_cells(&cells));
        }

        if format.show_borders {
            lines.push(format.horizontal_border(&widths));
        }
        lines.join("\n")
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(format!("{}\n{}", title, "=".repeat(title.chars().count())))
    }

    fn format_report_table(&self, report: &PageReport) -> Result<String> {
        if report.rows.is_empty() {
            return Ok("No probe targets found on the page.".to_string());
        }

        let format = TableFormat::for_report(&self.options);
        let rows: Vec<RowData> = report.rows.iter().map(|r| row_cells(r, &self.options)).collect();
        Ok(self.create_table(&format, &rows))
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut line = format!(
            "Probed {} targets: {} rendered, {} failed",
            summary.targets, summary.rendered, summary.failed
        );
        if summary.missing_elements > 0 {
            line.push_str(&format!(", {} without a marker element", summary.missing_elements));
        }
        Ok(line)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }
}
