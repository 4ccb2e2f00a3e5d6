//! CLI entry point for the report card tool.
//!
//! Reads student marks from a CSV file and/or manual entries, builds the
//! report table, and prints summaries or writes CSV, JSON and report cards.

use anyhow::{Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use report_card::config::ReportConfig;
use report_card::output::{CardSelection, print_json, print_pretty, write_cards, write_table_csv};
use report_card::parser::{load_marks_csv, parse_entry};
use report_card::render::{class_summary, heatmap, student_average_chart, subject_bar_chart};
use report_card::report::{ReportTable, StudentRecord, build};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "report_card")]
#[command(about = "Grade student marks and produce report cards", long_about = None)]
struct Cli {
    /// JSON file with school name, address, title and term (falls back to REPORT_CARD_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// CSV of marks: name column followed by one column per subject
    #[arg(value_name = "CSV")]
    source: Option<PathBuf>,

    /// Manually entered student, e.g. "Alice: Math=80, English=90" (repeatable)
    #[arg(short, long = "entry", value_name = "ENTRY")]
    entries: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log the class summary, student and subject charts and score heatmap
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Width of the bar charts
        #[arg(short, long, default_value_t = 40)]
        width: usize,
    },
    /// Write the table with averages and grades to a CSV file
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// CSV file to write
        #[arg(short, long, default_value = "report.csv")]
        output: PathBuf,
    },
    /// Log the enriched table as JSON
    Json {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Write report card text files
    Cards {
        #[command(flatten)]
        input: InputArgs,

        /// Directory to write cards into
        #[arg(short = 'd', long, default_value = "cards")]
        output_dir: PathBuf,

        /// Only write this student's card
        #[arg(short, long, conflicts_with = "combined")]
        student: Option<String>,

        /// Write one combined file with every card and the class summary
        #[arg(long, default_value_t = false)]
        combined: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/report_card.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("report_card.log"));

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

    let cli = Cli::parse();

    let config = ReportConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { input, width } => {
            let table = load_table(&input)?;
            print_pretty(&table);

            info!("\n{}", class_summary(&table.summary()));
            if table.is_empty() {
                warn!("No students in input");
            } else {
                info!(
                    "Student averages\n{}",
                    student_average_chart(&table, width)
                );
                info!(
                    "Subject averages\n{}",
                    subject_bar_chart(table.subject_aggregates(), width)
                );
                info!("Scores\n{}", heatmap(&table.heatmap()));
            }
        }
        Commands::Export { input, output } => {
            let table = load_table(&input)?;
            write_table_csv(&output, &table)?;
            info!(path = %output.display(), students = table.students().len(), "Table exported");
        }
        Commands::Json { input } => {
            let table = load_table(&input)?;
            print_json(&table)?;
        }
        Commands::Cards {
            input,
            output_dir,
            student,
            combined,
        } => {
            let table = load_table(&input)?;
            let selection = match (student, combined) {
                (Some(name), _) => CardSelection::Student(name),
                (None, true) => CardSelection::Combined,
                (None, false) => CardSelection::All,
            };
            let issued = Local::now().date_naive();
            let written = write_cards(&output_dir, &config, &table, &selection, issued)?;
            for path in &written {
                info!(path = %path.display(), "Report card");
            }
        }
    }

    Ok(())
}

/// Collects CSV rows and manual entries, in that order, and builds the table.
#[tracing::instrument(skip(input), fields(source = ?input.source, entries = input.entries.len()))]
fn load_table(input: &InputArgs) -> Result<ReportTable> {
    if input.source.is_none() && input.entries.is_empty() {
        bail!("no input: pass a CSV file or at least one --entry");
    }

    let mut records: Vec<StudentRecord> = match &input.source {
        Some(path) => load_marks_csv(path)?,
        None => Vec::new(),
    };
    for entry in &input.entries {
        records.push(parse_entry(entry)?);
    }

    let table = build(&records)?;
    info!(
        students = table.students().len(),
        subjects = table.subjects().len(),
        "Report table built"
    );
    Ok(table)
}
