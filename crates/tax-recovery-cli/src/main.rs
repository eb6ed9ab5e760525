mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::diagnose::{DiagnoseArgs, ReportArgs};

/// Tax-recovery thesis diagnosis
#[derive(Parser)]
#[command(
    name = "teses",
    version,
    about = "Tax-recovery thesis diagnosis",
    long_about = "Estimates recoverable tax credits for a company under five theses \
                  (ISS in the PIS/COFINS base, INSS on indemnity payments, Fator R, \
                  IPVA for fleets, essential inputs) with decimal precision, and \
                  exports a plain-text report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every thesis and total the recoverable amounts
    Diagnose(DiagnoseArgs),
    /// Write the text report (relatorio_tributario.txt)
    Report(ReportArgs),
    /// List the theses and their legal basis
    Theses,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Diagnose(args) => commands::diagnose::run_diagnose(args),
        Commands::Report(args) => commands::diagnose::run_report(args),
        Commands::Theses => commands::diagnose::run_theses(),
        Commands::Version => {
            println!("teses {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        // Already written to stdout by the command
        Ok(serde_json::Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
