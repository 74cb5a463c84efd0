mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::plans::{Balance80Args, DeferredArgs, SpotCashArgs, SpotDownArgs, TwentyEightyArgs};
use commands::proposal::ProposalArgs;

/// Real-estate payment plan calculations
#[derive(Parser)]
#[command(
    name = "ppc",
    version,
    about = "Real-estate payment plan calculations",
    long_about = "A CLI for computing real-estate purchase payment plans with decimal \
                  precision. Supports spot cash, spot down payment, deferred payment, \
                  20/80 staggered payment, 80%-balance amortization quotes, and full \
                  multi-plan proposal assembly."
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
    /// Spot cash breakdown (full payment at a TCP-wide discount)
    SpotCash(SpotCashArgs),
    /// Spot down payment breakdown (discounted 20% down, 80% financed)
    SpotDown(SpotDownArgs),
    /// Deferred payment breakdown (price spread over equal monthly terms)
    Deferred(DeferredArgs),
    /// 20/80 breakdown (20% down over terms, 80% financed)
    #[command(name = "twenty-eighty", alias = "20-80")]
    TwentyEighty(TwentyEightyArgs),
    /// 80%-balance amortization quote at the tiered factor rates
    #[command(name = "balance-80")]
    Balance80(Balance80Args),
    /// Assemble a full client proposal from a JSON or YAML file
    Proposal(ProposalArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SpotCash(args) => commands::plans::run_spot_cash(args),
        Commands::SpotDown(args) => commands::plans::run_spot_down(args),
        Commands::Deferred(args) => commands::plans::run_deferred(args),
        Commands::TwentyEighty(args) => commands::plans::run_twenty_eighty(args),
        Commands::Balance80(args) => commands::plans::run_balance_80(args),
        Commands::Proposal(args) => commands::proposal::run_proposal(args),
        Commands::Version => {
            println!("ppc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
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
