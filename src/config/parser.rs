//! Configuration parsing from CLI arguments

use crate::{
    cli::Cli,
    defaults::{FAILURE_SENTINEL, PROBE_TIMEOUT, SLOW_THRESHOLD_MS},
    error::{AppError, Result},
    models::{Config, PageSource},
};

/// Configuration parser that turns CLI arguments into a validated [`Config`]
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let page = self
            .cli
            .page
            .as_deref()
            .filter(|page| !page.trim().is_empty())
            .ok_or_else(|| AppError::config("A status page URL or file path is required"))?;

        let mut config = Config::new(PageSource::from_arg(page));
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut Config) {
        config.base_url = self.cli.base_url.clone();
        config.output_format = self.cli.format;
        config.enable_color = self.cli.use_colors();
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Page: {}", config.page_source.describe()));
    match config.page_location() {
        Ok(location) => summary.push(format!("Page Location: {}", location)),
        Err(e) => summary.push(format!("Page Location: <invalid: {}>", e)),
    }
    summary.push(format!("Probe Timeout: {}ms", PROBE_TIMEOUT.as_millis()));
    summary.push(format!("Slow Threshold: {}ms", SLOW_THRESHOLD_MS));
    summary.push(format!("Failure Label: {}", FAILURE_SENTINEL));
    summary.push(format!("Output Format: {:?}", config.output_format));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_url_page() {
        let cli = Cli::parse_from(["msprobe", "http://127.0.0.1:9090/index.html", "--no-color"]);
        let config = load_config(cli).unwrap();

        assert_eq!(
            config.page_source,
            PageSource::Url("http://127.0.0.1:9090/index.html".to_string())
        );
        assert!(!config.enable_color);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_file_page_with_base() {
        let cli = Cli::parse_from([
            "msprobe",
            "status.html",
            "--base-url",
            "http://10.0.0.2:9090/",
            "--format",
            "json",
            "--verbose",
        ]);
        let config = load_config(cli).unwrap();

        assert_eq!(config.page_source, PageSource::File(PathBuf::from("status.html")));
        assert_eq!(config.base_url.as_deref(), Some("http://10.0.0.2:9090/"));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_missing_page_is_config_error() {
        let cli = Cli::parse_from(["msprobe", "--help-topic", "page"]);
        assert!(matches!(load_config(cli), Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let cli = Cli::parse_from(["msprobe", "status.html", "--base-url", "file:///tmp/"]);
        assert!(load_config(cli).is_err());
    }

    #[test]
    fn test_summary_mentions_fixed_thresholds() {
        let config = Config::new(PageSource::File(PathBuf::from("status.html")));
        let summary = display_config_summary(&config);
        assert!(summary.contains("Probe Timeout: 3000ms"));
        assert!(summary.contains("Slow Threshold: 500ms"));
        assert!(summary.contains("Page Location: http://localhost/"));
    }
}
