//! msprobe - status page latency prober
//!
//! Loads a status page, probes every link in its speed list and prints what
//! each latency marker ends up showing.

use clap::Parser;
use page_latency_prober::{
    app::App,
    cli::Cli,
    config::load_config,
    error::{ErrorReporter, Result},
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();

    if cli.get_help_topic().is_some() {
        println!("{}", cli.display_help());
        return;
    }

    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);
    if let Err(e) = run_application(cli).await {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(cli)?;
    let output = App::new(config)?.run().await?;
    println!("{}", output);
    Ok(())
}
