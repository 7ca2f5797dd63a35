/*!
 * Command-line interface for treedoc
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use treedoc::config::{Args, Config};
use treedoc::report::{ReportFormat, Reporter};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> treedoc::Result<()> {
    // Timestamp for the default document name is taken before anything else
    let started = Local::now();

    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "treedoc", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args, started)?;
    config.validate()?;

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress.set_prefix("📊 Processing");
        progress.set_message(format!(
            "📂 Scanning directory: {}",
            config.target_dir.display()
        ));
        progress
    };

    let report = treedoc::run(&config, Arc::new(progress.clone()))?;
    progress.finish_and_clear();

    let format = if config.quiet {
        ReportFormat::Plain
    } else {
        ReportFormat::ConsoleTable
    };
    Reporter::new(format).print_report(&report);

    Ok(())
}
