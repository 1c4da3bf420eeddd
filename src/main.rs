//! finai CLI
//!
//! Command-line interface for the simulators and the assistant.
//! Rates are entered in percent, e.g. `--rate 1` for 1% per period.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;

use finai::projection::rates::percent_to_fraction;
use finai::render;
use finai::{
    AppConfig, Assistant, ChatOutcome, CompletionClient, ConversationLog, InvestorProfile,
    ScenarioInput, ScenarioRunner, Simulation, SimulationOutput,
};

const DISCLAIMER: &str = "Educational use only. This is not financial advice.";

#[derive(Debug, Parser)]
#[command(name = "finai", version, about = "Financial-education simulators and assistant")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compound interest on a starting balance
    Compound(GrowthArgs),
    /// Fixed deposit every period, then growth
    Dca(DcaArgs),
    /// Fixed income at a nominal annual rate, compounded monthly
    FixedIncome(FixedIncomeArgs),
    /// Income-paying asset (e.g. a real-estate fund), optionally reinvested
    Yield(YieldArgs),
    /// Compound growth at the base rate and two scaled variants
    Compare(GrowthArgs),
    /// Ask the assistant a finance question
    Ask {
        /// Investor profile (defaults to the configured one)
        #[arg(long, value_enum)]
        profile: Option<InvestorProfile>,

        /// The question
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Show recent questions and answers
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Debug, Args)]
struct GrowthArgs {
    /// Starting balance
    #[arg(long, default_value_t = 0.0)]
    initial: f64,
    /// Rate per period, in percent
    #[arg(long)]
    rate: f64,
    /// Number of periods (months)
    #[arg(long, allow_negative_numbers = true)]
    periods: i64,
}

#[derive(Debug, Args)]
struct DcaArgs {
    /// Deposit made every period
    #[arg(long)]
    contribution: f64,
    /// Rate per period, in percent
    #[arg(long)]
    rate: f64,
    /// Number of periods (months)
    #[arg(long, allow_negative_numbers = true)]
    periods: i64,
}

#[derive(Debug, Args)]
struct FixedIncomeArgs {
    /// Starting balance
    #[arg(long, default_value_t = 0.0)]
    initial: f64,
    /// Nominal annual rate, in percent
    #[arg(long)]
    annual_rate: f64,
    /// Number of months
    #[arg(long, allow_negative_numbers = true)]
    periods: i64,
}

#[derive(Debug, Args)]
struct YieldArgs {
    /// Amount invested
    #[arg(long)]
    initial: f64,
    /// Yield per period, in percent
    #[arg(long)]
    rate: f64,
    /// Number of periods (months)
    #[arg(long, allow_negative_numbers = true)]
    periods: i64,
    /// Add each payment back to the balance
    #[arg(long)]
    reinvest: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    debug!("loaded config: {:?}", config);

    match cli.command {
        Command::Compound(args) => {
            let input = ScenarioInput::new(args.initial, percent_to_fraction(args.rate), args.periods);
            simulate(&config, cli.format, Simulation::CompoundGrowth, &input)
        }
        Command::Dca(args) => {
            let input = ScenarioInput::new(0.0, percent_to_fraction(args.rate), args.periods)
                .with_contribution(args.contribution);
            simulate(&config, cli.format, Simulation::DcaAccumulation, &input)
        }
        Command::FixedIncome(args) => {
            // Fixed income takes the annual percent as is
            let input = ScenarioInput::new(args.initial, args.annual_rate, args.periods);
            simulate(&config, cli.format, Simulation::FixedIncome, &input)
        }
        Command::Yield(args) => {
            let input = ScenarioInput::new(args.initial, percent_to_fraction(args.rate), args.periods)
                .with_reinvest(args.reinvest);
            simulate(&config, cli.format, Simulation::YieldBearing, &input)
        }
        Command::Compare(args) => {
            let input = ScenarioInput::new(args.initial, percent_to_fraction(args.rate), args.periods);
            simulate(&config, cli.format, Simulation::Comparative, &input)
        }
        Command::Ask { profile, question } => {
            let profile = profile.unwrap_or(config.default_profile);
            ask(&config, cli.format, profile, &question.join(" "))
        }
        Command::History { limit } => history(&config, cli.format, limit),
    }
}

fn simulate(config: &AppConfig, format: OutputFormat, simulation: Simulation, input: &ScenarioInput) -> Result<()> {
    let runner = ScenarioRunner::with_config(config.projection.clone());
    let output = runner
        .run(simulation, input)
        .with_context(|| format!("Running {:?}", simulation))?;

    match (format, &output) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(&output)?),
        (OutputFormat::Csv, SimulationOutput::Series { series, .. }) => {
            render::write_csv(series, io::stdout().lock())?
        }
        (OutputFormat::Csv, SimulationOutput::Comparison { comparison }) => {
            render::write_comparison_csv(comparison, io::stdout().lock())?
        }
        (OutputFormat::Table, SimulationOutput::Series { series, .. }) => {
            print!("{}", render::render_table(series, &config.display))
        }
        (OutputFormat::Table, SimulationOutput::Comparison { comparison }) => {
            print!("{}", render::render_comparison_table(comparison, &config.display));
            if let Some(best) = comparison.best_leg() {
                println!("\nHighest final value: {}", best.label);
            }
        }
    }

    Ok(())
}

fn ask(config: &AppConfig, format: OutputFormat, profile: InvestorProfile, question: &str) -> Result<()> {
    let client = CompletionClient::new(&config.chat).context("Setting up chat client")?;
    let log = ConversationLog::open(&config.database_path)
        .with_context(|| format!("Opening history at {}", config.database_path.display()))?;
    let assistant = Assistant::new(client, log);

    let outcome = assistant.ask(profile, question)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        ChatOutcome::Success { answer } => {
            println!("{}\n", answer);
            println!("{}", DISCLAIMER);
        }
        ChatOutcome::Failure { error_detail } => {
            eprintln!("The assistant could not answer: {}", error_detail);
        }
    }
    Ok(())
}

fn history(config: &AppConfig, format: OutputFormat, limit: usize) -> Result<()> {
    let log = ConversationLog::open(&config.database_path)
        .with_context(|| format!("Opening history at {}", config.database_path.display()))?;
    let exchanges = log.recent(limit)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&exchanges)?),
        _ => print!("{}", render::render_history(&exchanges)),
    }
    Ok(())
}
