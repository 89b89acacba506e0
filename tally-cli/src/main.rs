//! Tally CLI - contractor invoice analysis in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{export, list, report, summary, FilterArgs};

/// Tally - contractor invoice analysis in your terminal
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    /// Path to the invoice snapshot document
    #[arg(
        long,
        global = true,
        env = "TALLY_FILE",
        default_value = "contractor_invoices.json"
    )]
    file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show key metrics and filter options for the invoice set
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tabulate an aggregated view of the filtered set
    Report {
        #[command(subcommand)]
        view: report::ReportView,
    },

    /// List invoices as a paginated table
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the filtered set as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output path, "-" for stdout (default: invoice_data_<YYYYMMDD>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary { filters, json } => summary::run(&cli.file, &filters, json),
        Commands::Report { view } => report::run(&cli.file, view),
        Commands::List {
            filters,
            page,
            page_size,
            json,
        } => list::run(&cli.file, &filters, page, page_size, json),
        Commands::Export { filters, output } => export::run(&cli.file, &filters, output),
    }
}

/// Logs go to stderr so table and CSV output stay pipeable
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
