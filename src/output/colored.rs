//! Colored formatter implementation with terminal color support
//!
//! Result cells take the color the renderer wrote onto the marker, so the
//! terminal shows the same healthy/warning/alert reading as the page.

use super::formatter::{row_cells, FormattingOptions, OutputFormatter, RowData, TableFormat};
use super::report::{PageReport, ReportRow};
use crate::{
    error::Result,
    page::{FontWeight, MarkerColor},
    probe::RunSummary,
};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub healthy: Color,
    pub warning: Color,
    pub alert: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            healthy: Color::Green,
            warning: Color::Yellow,
            alert: Color::Red,
            muted: Color::BrightBlack,
            border: Color::BrightBlack,
        }
    }
}

impl ColorScheme {
    /// Terminal color for a marker color
    pub fn for_marker(&self, color: MarkerColor) -> Color {
        match color {
            MarkerColor::Healthy => self.healthy,
            MarkerColor::Warning => self.warning,
            MarkerColor::Alert => self.alert,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Bold colored text; plain when colors are disabled
    fn emphasize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color).bold()
        } else {
            text.normal()
        }
    }

    /// Color an already padded result or status cell by the row's style
    fn style_cell(&self, padded: &str, row: &ReportRow) -> String {
        match row.style {
            Some(style) => {
                let color = self.color_scheme.for_marker(style.color);
                match style.font_weight {
                    FontWeight::Bold => self.emphasize(padded, color).to_string(),
                    FontWeight::Normal => self.colorize(padded, color).to_string(),
                }
            }
            None => self.colorize(padded, self.color_scheme.muted).to_string(),
        }
    }

    fn create_table(&self, format: &TableFormat, report: &PageReport) -> String {
        let rows: Vec<RowData> = report.rows.iter().map(|r| row_cells(r, &self.options)).collect();
        let widths = format.column_widths(&rows);
        let border = self.colorize(&format.horizontal_border(&widths), self.color_scheme.border).to_string();
        let mut lines = Vec::new();

        let header: Vec<String> = format
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| self.emphasize(&format.pad(&c.header, i, &widths), self.color_scheme.header).to_string())
            .collect();

        if format.show_borders {
            lines.push(border.clone());
        }
        lines.push(format.join_cells(&header));
        if format.show_borders {
            lines.push(border.clone());
        }

        for (row, cells) in report.rows.iter().zip(rows.iter()) {
            let styled: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let padded = format.pad(cell, i, &widths);
                    // Result and Status columns carry the marker style.
                    if i == 2 || i == 3 {
                        self.style_cell(&padded, row)
                    } else {
                        padded
                    }
                })
                .collect();
            lines.push(format.join_cells(&styled));
        }

        if format.show_borders {
            lines.push(border);
        }
        lines.join("\n")
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let underline = "=".repeat(title.chars().count());
        Ok(format!(
            "{}\n{}",
            self.emphasize(title, self.color_scheme.header),
            self.colorize(&underline, self.color_scheme.border)
        ))
    }

    fn format_report_table(&self, report: &PageReport) -> Result<String> {
        if report.rows.is_empty() {
            return Ok(self
                .colorize("No probe targets found on the page.", self.color_scheme.muted)
                .to_string());
        }
        Ok(self.create_table(&TableFormat::for_report(&self.options), report))
    }

    fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        let failed = format!("{} failed", summary.failed);
        let mut line = format!(
            "Probed {} targets: {} rendered, {}",
            summary.targets,
            summary.rendered,
            if summary.failed > 0 {
                self.emphasize(&failed, self.color_scheme.alert)
            } else {
                self.colorize(&failed, self.color_scheme.muted)
            }
        );
        if summary.missing_elements > 0 {
            let missing = format!("{} without a marker element", summary.missing_elements);
            line.push_str(&format!(", {}", self.colorize(&missing, self.color_scheme.warning)));
        }
        Ok(line)
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", self.emphasize("WARNING:", self.color_scheme.warning), warning))
    }
}
