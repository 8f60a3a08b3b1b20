mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;

use commands::advice::AdvicePromptArgs;
use commands::calculators::{ProfitsArgs, ProgressiveArgs, PropertyArgs, StandardArgs};
use commands::optimize::OptimizeArgs;
use commands::report::ReportArgs;

/// Hong Kong personal tax filing optimizer
#[derive(Parser)]
#[command(
    name = "hktax",
    version,
    about = "Hong Kong personal tax filing optimizer",
    long_about = "Computes salaries, profits and property tax for a household under \
                  separate filing, joint assessment and personal assessment, and picks \
                  the option with the lowest total tax (year of assessment 2024/25)."
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
    /// Compare every filing option for a household
    Optimize(OptimizeArgs),
    /// Print the detailed calculation report
    Report(ReportArgs),
    /// Progressive salaries tax on net chargeable income
    Progressive(ProgressiveArgs),
    /// Two-tier standard rate on net income
    Standard(StandardArgs),
    /// Profits tax for an unincorporated business
    Profits(ProfitsArgs),
    /// Property tax on rental income
    Property(PropertyArgs),
    /// Print the prompt sent to the advice service
    AdvicePrompt(AdvicePromptArgs),
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

/// Structured results go through the output formatter, text is printed as is.
enum Rendered {
    Structured(Value),
    Text(String),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<Rendered, Box<dyn std::error::Error>> = match cli.command {
        Commands::Optimize(args) => commands::optimize::run_optimize(args).map(Rendered::Structured),
        Commands::Report(args) => commands::report::run_report(args).map(Rendered::Text),
        Commands::Progressive(args) => {
            commands::calculators::run_progressive(args).map(Rendered::Structured)
        }
        Commands::Standard(args) => commands::calculators::run_standard(args).map(Rendered::Structured),
        Commands::Profits(args) => commands::calculators::run_profits(args).map(Rendered::Structured),
        Commands::Property(args) => commands::calculators::run_property(args).map(Rendered::Structured),
        Commands::AdvicePrompt(args) => {
            commands::advice::run_advice_prompt(args).map(Rendered::Text)
        }
        Commands::Version => {
            println!("hktax {} (tax year {})", env!("CARGO_PKG_VERSION"), hk_tax_core::tables::TAX_YEAR);
            return;
        }
    };

    match result {
        Ok(Rendered::Structured(value)) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Ok(Rendered::Text(text)) => {
            println!("{text}");
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
