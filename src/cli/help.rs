//! Topic help for the command-line interface
//!
//! Clap renders the option reference; these topics explain how the page is
//! read and how results should be interpreted.

use crate::defaults::{FAILURE_SENTINEL, MARKER_ID_PREFIX, PROBE_TIMEOUT, SLOW_THRESHOLD_MS};
use crate::page::MarkerColor;
use colored::*;

/// Help system for the CLI application
pub struct HelpSystem;

impl HelpSystem {
    pub const TOPICS: &'static [&'static str] = &["page", "colors", "examples"];

    pub fn new() -> Self {
        Self
    }

    /// Overview listing every topic
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();
        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_page_help(use_colors));
        help.push('\n');
        help.push_str(&self.format_colors_help(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_help(use_colors));
        help
    }

    /// Display help for a single topic
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "page" | "markup" => Some(self.format_page_help(use_colors)),
            "colors" | "colours" | "results" => Some(self.format_colors_help(use_colors)),
            "examples" => Some(self.format_examples_help(use_colors)),
            _ => None,
        }
    }

    fn title(&self, text: &str, use_colors: bool) -> String {
        if use_colors {
            text.bright_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, use_colors: bool) -> String {
        let title = "msprobe";
        let subtitle = "Status page latency prober";
        let version = crate::VERSION;

        if use_colors {
            format!("{} {}\n{}\n", title.bright_cyan().bold(), version.green(), subtitle.bright_blue())
        } else {
            format!("{} {}\n{}\n", title, version, subtitle)
        }
    }

    fn format_page_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", self.title("PAGE MARKUP:", use_colors));
        help.push_str("  The page must contain a list container with class \"speedlist\".\n");
        help.push_str("  Each <li> inside it is probed when it holds both:\n");
        help.push_str("    - an <a href=\"...\"> whose href is the URL to probe\n");
        help.push_str(&format!(
            "    - an <i id=\"{}...\"> marker that receives the result\n",
            MARKER_ID_PREFIX
        ));
        help.push_str("  Items missing either element are skipped.\n\n");
        help.push_str("  Example:\n");
        help.push_str("    <ul class=\"speedlist\">\n");
        help.push_str(&format!(
            "      <li><a href=\"/api/status\">Console</a> <i id=\"{}1\"></i></li>\n",
            MARKER_ID_PREFIX
        ));
        help.push_str("    </ul>\n");
        help
    }

    fn format_colors_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", self.title("READING RESULTS:", use_colors));
        let rows = [
            (
                MarkerColor::Healthy,
                format!("answered within {}ms", SLOW_THRESHOLD_MS),
            ),
            (
                MarkerColor::Warning,
                format!("answered, but slower than {}ms", SLOW_THRESHOLD_MS),
            ),
            (
                MarkerColor::Alert,
                format!(
                    "{}: timeout after {}ms, network error, or non-200 status",
                    FAILURE_SENTINEL,
                    PROBE_TIMEOUT.as_millis()
                ),
            ),
        ];

        for (color, meaning) in rows {
            let name = format!("{:?}", color).to_lowercase();
            let label = if use_colors {
                match color {
                    MarkerColor::Healthy => name.green().to_string(),
                    MarkerColor::Warning => name.yellow().to_string(),
                    MarkerColor::Alert => name.red().bold().to_string(),
                }
            } else {
                name
            };
            help.push_str(&format!("  {:<8} {} ({})\n", label, meaning, color.css()));
        }

        help.push_str("\n  Slow and failed links use different colors; a slow link still answered.\n");
        help.push_str("\n  Links on the page's own origin are checked for status 200.\n");
        help.push_str("  Links on any other origin only prove the port answered: an\n");
        help.push_str("  error page from a reachable server still shows as a time.\n");
        help
    }

    fn format_examples_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", self.title("EXAMPLES:", use_colors));
        let examples = [
            ("msprobe http://127.0.0.1:9090/release/index.html", "Probe a live status page"),
            (
                "msprobe status.html --base-url http://127.0.0.1:9090/",
                "Probe a saved page as if served from that address",
            ),
            ("msprobe status.html --format json", "Machine-readable report"),
            ("msprobe http://host/ --verbose", "Log each probe to stderr"),
        ];

        for (command, description) in examples {
            if use_colors {
                help.push_str(&format!("  {}\n      {}\n", command.bright_white(), description.bright_black()));
            } else {
                help.push_str(&format!("  {}\n      {}\n", command, description));
            }
        }
        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}
