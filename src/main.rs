//! CLI entry point for the grade board.
//!
//! Lets a student look up their DS grade by email and lets an instructor
//! view statistics and chart data for a class group.

use anyhow::Result;
use clap::{Parser, Subcommand};
use grade_board::{
    config::Config,
    output::{
        coerced_scores_warning, render_groups, render_lookup, render_report, report_json,
    },
    service::GradeService,
    source::FileSource,
};
use std::ffi::OsStr;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_board")]
#[command(about = "Look up exam grades and group statistics", long_about = None)]
struct Cli {
    /// Grade CSV to read instead of the configured GRADES_CSV_PATH
    #[arg(long, global = true, value_name = "FILE")]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a student's result by email
    Lookup {
        /// Exact email as it appears in the grade file
        #[arg(value_name = "EMAIL", default_value = "")]
        email: String,
    },
    /// List the available groups
    Groups,
    /// Show statistics and chart data for a group
    Stats {
        #[arg(value_name = "GROUP")]
        group: String,

        /// Emit the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Answer requests read from stdin, one per line (`<email>`, `groups` or `group <GROUP>`)
    Session,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = Config::from_env_with_csv(cli.csv.as_deref())?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config.log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("grade_board.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let service = GradeService::new(FileSource::new(&config.csv_path))
        .with_histogram_bins(config.histogram_bins);

    // The dataset must load before anything is served.
    let dataset = service.load().inspect_err(|e| {
        error!(error = %e, path = %config.csv_path.display(), "Cannot start without grade data");
    })?;
    if let Some(warning) = coerced_scores_warning(dataset.coerced_scores()) {
        println!("{warning}");
    }

    match cli.command {
        Commands::Lookup { email } => {
            if let Some(text) = render_lookup(&service.find_student(&email)?) {
                println!("{text}");
            }
        }
        Commands::Groups => {
            println!("{}", render_groups(&service.groups()?));
        }
        Commands::Stats { group, json } => {
            let report = service.group_report(&group)?;
            if json {
                println!("{}", report_json(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Commands::Session => run_session(&service)?,
    }

    Ok(())
}

/// Serves one interaction per stdin line until EOF. Each line re-checks the
/// source, so edits to the CSV are picked up without restarting.
fn run_session(service: &GradeService<FileSource>) -> Result<()> {
    info!("Session started; enter an email, `groups` or `group <GROUP>`");

    for line in std::io::stdin().lock().lines() {
        let line = line?;

        if let Some(group) = line.strip_prefix("group ") {
            print!("{}", render_report(&service.group_report(group)?));
        } else if line.trim() == "groups" {
            println!("{}", render_groups(&service.groups()?));
        } else if let Some(text) = render_lookup(&service.find_student(&line)?) {
            println!("{text}");
        }
    }

    info!("Session ended");
    Ok(())
}
