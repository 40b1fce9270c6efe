//! Mind Games acceptance runner - Main Entry Point
//!
//! Loads the page in headless Chrome, runs the built-in checks and writes
//! a timestamped Excel report.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use mindgames_e2e::{ReportSheet, ReportSink, RunnerConfig, TestRunner};

mod output;

/// Automated acceptance tests for Mind Games for Seniors
#[derive(Parser, Debug)]
#[command(name = "mindgames-acceptance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "mindgames.toml")]
    config: PathBuf,

    /// Page under test
    #[arg(short, long)]
    page: Option<PathBuf>,

    /// Directory for the report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chrome binary to launch
    #[arg(long)]
    chrome: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn runner_config(&self) -> anyhow::Result<RunnerConfig> {
        let mut config = RunnerConfig::load(&self.config)
            .with_context(|| format!("loading {}", self.config.display()))?;

        if let Some(page) = &self.page {
            config.page = page.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(chrome) = &self.chrome {
            config.browser.chrome_executable = Some(chrome.clone());
        }
        if self.headed {
            config.browser.headless = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = cli.runner_config()?;

    println!("{}\n", output::banner());

    let runner = TestRunner::with_config(config);
    let mut sheet = ReportSheet::default();
    let outcome = runner.run(&mut sheet).await;

    output::print_results(sheet.rows());

    match outcome {
        Ok(report) => {
            output::print_summary(&report.summary);
            output::print_success(&format!(
                "Excel Test Report Generated Successfully: {}",
                report.report_path.display()
            ));
            if !report.summary.all_passed() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            output::print_error(&format!("Run aborted: {}", e));
            std::process::exit(2);
        }
    }

    Ok(())
}
