mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advisor::AdviseArgs;
use commands::comparison::CompareArgs;
use commands::margin::MarginArgs;
use commands::projection::{FixedIncomeArgs, LumpSumArgs, SipArgs, StockBenchmarkArgs};

/// Deterministic personal-finance projections
#[derive(Parser)]
#[command(
    name = "wcalc",
    version,
    about = "Deterministic personal-finance projections",
    long_about = "Projects SIPs, lump sums, stock-vs-benchmark pairs, fixed-income \
                  instruments and margin trades year by year (or day by day) with \
                  decimal precision, and compares strategies over a shared horizon."
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
    /// Project a systematic investment plan
    Sip(SipArgs),
    /// Project a single upfront investment
    LumpSum(LumpSumArgs),
    /// Compare a stock against a benchmark over one horizon
    StockVsBenchmark(StockBenchmarkArgs),
    /// Compare a fixed deposit, a bond and equity
    FixedIncome(FixedIncomeArgs),
    /// Analyse a leveraged trade with borrow interest and brokerage
    Margin(MarginArgs),
    /// Rank named strategies by final value
    Compare(CompareArgs),
    /// Canned guidance for a free-text question
    Advise(AdviseArgs),
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
        Commands::Sip(args) => commands::projection::run_sip(args),
        Commands::LumpSum(args) => commands::projection::run_lump_sum(args),
        Commands::StockVsBenchmark(args) => commands::projection::run_stock_vs_benchmark(args),
        Commands::FixedIncome(args) => commands::projection::run_fixed_income(args),
        Commands::Margin(args) => commands::margin::run_margin(args),
        Commands::Compare(args) => commands::comparison::run_compare(args),
        Commands::Advise(args) => commands::advisor::run_advise(args),
        Commands::Version => {
            println!("wcalc {}", env!("CARGO_PKG_VERSION"));
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
