//! Main application orchestration and execution

use crate::{
    config::{display_config_summary, validate_config, Config},
    error::Result,
    log_debug, log_info, log_warn,
    logging::LoggerFactory,
    output::{OutputCoordinator, OutputFormatterFactory, PageReport},
    page::load_page,
    probe,
};

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
}

impl App {
    /// Create a new application instance from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let loggers = LoggerFactory::new(config.clone());
        Ok(Self { config, loggers })
    }

    /// Load the page, probe every target and return the rendered report
    ///
    /// Probe failures are part of the report, not errors; only a page that
    /// cannot be loaded or parsed fails the run.
    pub async fn run(self) -> Result<String> {
        let logger = self.loggers.create_logger("APP").await;
        let coordinator = self.coordinator();

        if self.config.debug {
            log_debug!(logger, "{} v{} ({})", crate::PKG_NAME, crate::VERSION, build_info());
            for line in display_config_summary(&self.config).lines() {
                log_debug!(logger, "config: {}", line);
            }
        }

        for line in self.render_warnings(&coordinator)? {
            eprintln!("{}", line);
        }

        log_info!(logger, "Loading page from {}", self.config.page_source.describe());
        let mut page = load_page(&self.config).await?;
        log_info!(
            logger,
            "Loaded {} list items from {}",
            page.list_items().len(),
            page.location()
        );

        let summary = probe::run(&mut page, self.loggers.create_probe_logger().await).await?;

        if summary.targets == 0 {
            log_warn!(logger, "No probe targets found on {}", page.location());
        }

        let report = PageReport::from_page(&page, summary);
        coordinator.display_report(&report)
    }

    fn coordinator(&self) -> OutputCoordinator {
        OutputCoordinator::new(OutputFormatterFactory::create_formatter(
            self.config.output_format,
            self.config.enable_color,
            self.config.verbose,
        ))
    }

    /// Validation warnings in the report's output format
    fn render_warnings(&self, coordinator: &OutputCoordinator) -> Result<Vec<String>> {
        validate_config(&self.config)?
            .iter()
            .map(|warning| coordinator.display_warning(&format!("[{}] {}", warning.level.as_str(), warning.message)))
            .collect()
    }
}

/// Build metadata recorded by the build script
fn build_info() -> String {
    format!(
        "built {}, commit {}, target {}",
        option_env!("BUILD_TIME").unwrap_or("unknown"),
        option_env!("GIT_COMMIT").unwrap_or("unknown"),
        option_env!("TARGET_TRIPLE").unwrap_or("unknown"),
    )
}
