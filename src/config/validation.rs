//! Configuration validation utilities and rules

use crate::{
    error::Result,
    models::{Config, PageSource},
    types::OutputFormat,
};

/// Validation warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Info => "INFO",
            ValidationLevel::Warning => "WARNING",
        }
    }
}

/// Non-fatal observation about a configuration
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }
}

/// Configuration validator producing warnings on top of hard errors
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run [`Config::validate`] and collect warnings for suspicious settings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::check_page_location(config)?);
        warnings.extend(Self::check_output(config));
        Ok(warnings)
    }

    fn check_page_location(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();
        let location = config.page_location()?;

        if matches!(config.page_source, PageSource::File(_)) && config.base_url.is_none() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "No --base-url given; relative links resolve against {} and only links on that origin get status checks",
                    location
                ),
            ));
        }

        Ok(warnings)
    }

    fn check_output(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        if config.output_format == OutputFormat::Json && config.enable_color {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Colors are ignored for JSON output".to_string(),
            ));
        }
        warnings
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_without_base_warns() {
        let mut config = Config::new(PageSource::File(PathBuf::from("status.html")));
        config.enable_color = false;
        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Warning);
        assert!(warnings[0].message.contains("--base-url"));
    }

    #[test]
    fn test_url_page_is_clean() {
        let mut config = Config::new(PageSource::Url("http://127.0.0.1:9090/".to_string()));
        config.enable_color = false;
        assert!(validate_config(&config).unwrap().is_empty());
    }

    #[test]
    fn test_json_with_color_is_info() {
        let mut config = Config::new(PageSource::Url("http://127.0.0.1:9090/".to_string()));
        config.output_format = OutputFormat::Json;
        config.enable_color = true;
        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Info);
        assert_eq!(warnings[0].level.as_str(), "INFO");
        assert_eq!(warnings[0].message, "Colors are ignored for JSON output");
    }

    #[test]
    fn test_hard_errors_propagate() {
        let mut config = Config::new(PageSource::File(PathBuf::from("status.html")));
        config.base_url = Some("mailto:ops@example.com".to_string());
        assert!(validate_config(&config).is_err());
    }
}
