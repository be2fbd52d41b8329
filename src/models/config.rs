//! Configuration data model and validation

use crate::defaults::DEFAULT_BASE_URL;
use crate::types::{AppError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Where the status page is loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSource {
    /// Download the page; its URL is also the page location
    Url(String),
    /// Read a saved page from disk
    File(PathBuf),
}

impl PageSource {
    /// Interpret a command line argument as a URL when it looks like one,
    /// otherwise as a file path
    pub fn from_arg(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            PageSource::Url(arg.to_string())
        } else {
            PageSource::File(PathBuf::from(arg))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PageSource::Url(url) => url.clone(),
            PageSource::File(path) => path.display().to_string(),
        }
    }
}

/// Main application configuration
///
/// Probe deadline and rendering thresholds are fixed in [`crate::defaults`]
/// and are intentionally absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Status page to scan
    pub page_source: PageSource,

    /// Page location used to resolve links of a local page file
    #[serde(default)]
    pub base_url: Option<String>,

    /// Report format
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Create a configuration for a page source with default settings
    pub fn new(page_source: PageSource) -> Self {
        Self {
            page_source,
            base_url: None,
            output_format: default_output_format(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }

    /// Absolute location of the page; its origin decides same- vs cross-origin
    pub fn page_location(&self) -> Result<Url> {
        let raw = match &self.page_source {
            PageSource::Url(url) => url.as_str(),
            PageSource::File(_) => self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        };
        parse_http_url(raw)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        match &self.page_source {
            PageSource::Url(url) => {
                if url.is_empty() {
                    return Err(AppError::config("Page URL cannot be empty"));
                }
                if self.base_url.is_some() {
                    return Err(AppError::config(
                        "--base-url only applies to page files; a page URL is its own base",
                    ));
                }
            }
            PageSource::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(AppError::config("Page file path cannot be empty"));
                }
            }
        }

        self.page_location()?;
        Ok(())
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::validation(format!("Invalid page location '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::validation(format!(
            "Page location must use http or https, got '{}'",
            other
        ))),
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_source_from_arg() {
        assert_eq!(
            PageSource::from_arg("http://127.0.0.1:9090/index.html"),
            PageSource::Url("http://127.0.0.1:9090/index.html".to_string())
        );
        assert_eq!(
            PageSource::from_arg("HTTPS://status.example.com"),
            PageSource::Url("HTTPS://status.example.com".to_string())
        );
        assert_eq!(
            PageSource::from_arg("./status.html"),
            PageSource::File(PathBuf::from("./status.html"))
        );
    }

    #[test]
    fn test_url_source_is_its_own_location() {
        let config = Config::new(PageSource::Url("http://127.0.0.1:9090/release/".to_string()));
        let location = config.page_location().unwrap();
        assert_eq!(location.as_str(), "http://127.0.0.1:9090/release/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_source_defaults_to_localhost() {
        let config = Config::new(PageSource::File(PathBuf::from("status.html")));
        assert_eq!(config.page_location().unwrap().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_file_source_with_base_url() {
        let mut config = Config::new(PageSource::File(PathBuf::from("status.html")));
        config.base_url = Some("http://10.0.0.5:9090/".to_string());
        assert_eq!(config.page_location().unwrap().port(), Some(9090));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_rejected_for_url_source() {
        let mut config = Config::new(PageSource::Url("http://example.com/".to_string()));
        config.base_url = Some("http://other.example.com/".to_string());
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_non_http_location_rejected() {
        let mut config = Config::new(PageSource::File(PathBuf::from("status.html")));
        config.base_url = Some("ftp://example.com/".to_string());
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));

        config.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_file_path_rejected() {
        let config = Config::new(PageSource::File(PathBuf::new()));
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
