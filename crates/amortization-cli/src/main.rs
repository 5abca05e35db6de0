mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::format::FormatArgs;
use commands::loan::LoanQuoteArgs;
use commands::proposal::ProposalArgs;
use commands::simulate::{ScheduleArgs, SimulateArgs};

/// Loan amortization simulator
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization simulator (SAC and Price schedules)",
    long_about = "Simulates a property loan under constant amortization (SAC) and \
                  fixed installment (Price) schedules with decimal precision, and \
                  assembles signed proposal documents from the results. \
                  Set RUST_LOG=debug for diagnostic logging."
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
    /// Run both schedules and print the summary
    Simulate(SimulateArgs),
    /// Print one schedule period by period
    Schedule(ScheduleArgs),
    /// Quick annuity quote from an annual rate
    LoanQuote(LoanQuoteArgs),
    /// Build a proposal document from financing and personal data
    Proposal(ProposalArgs),
    /// Format or parse a Brazilian Real amount
    Format(FormatArgs),
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

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Schedule(args) => commands::simulate::run_schedule(args),
        Commands::LoanQuote(args) => commands::loan::run_loan_quote(args),
        Commands::Proposal(args) => commands::proposal::run_proposal(args),
        Commands::Format(args) => commands::format::run_format(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
