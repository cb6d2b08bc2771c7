//! # Foamlift CLI
//!
//! Terminal front end for the polyfoam slab-lifting estimator.
//!
//! - `foamlift estimate` prompts for any value not given as a flag
//! - `foamlift sample` prints the worked 10x10 ft example
//! - `foamlift smoke-test` checks the warehouse credentials in the secrets file

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use lift_core::calculations::{calculate, EstimateInput, SettledSides};
use lift_core::config::{resolve_secrets_path, AppConfig};
use lift_core::errors::{CalcError, CalcResult};
use lift_core::form::parse_sides;
use lift_core::report::{EstimateReport, DISCLAIMER};
use lift_core::EstimateResult;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "foamlift", version, about = "Concrete lifting polyfoam cost estimator")]
struct Cli {
    /// Secrets file with display settings and warehouse credentials
    #[arg(long, global = true, env = "FOAMLIFT_SECRETS")]
    secrets: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate material and cost for one slab
    Estimate(EstimateArgs),
    /// Show the worked sample estimate
    Sample {
        /// Print JSON instead of the formatted table
        #[arg(long)]
        json: bool,
    },
    /// Connect to the warehouse and read the demo table
    SmokeTest,
}

#[derive(Args, Debug, Default)]
struct EstimateArgs {
    /// Width of slab (feet)
    #[arg(long)]
    width: Option<f64>,
    /// Length of slab (feet)
    #[arg(long)]
    length: Option<f64>,
    /// How many sides of the slab have settled (1-4)
    #[arg(long)]
    sides: Option<i64>,
    /// Settlement at lowest point (inches)
    #[arg(long)]
    settlement: Option<f64>,
    /// Price per pound of polyfoam ($)
    #[arg(long)]
    price: Option<f64>,
    /// Print JSON and use defaults for missing values instead of prompting
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let secrets = resolve_secrets_path(cli.secrets);

    match cli.command.unwrap_or_else(|| Command::Estimate(EstimateArgs::default())) {
        Command::Estimate(args) => {
            let config = display_config(&secrets);
            let input = if args.json {
                collect_input(&args, None)
            } else {
                let mut stdin = io::stdin().lock();
                let reader: &mut dyn BufRead = &mut stdin;
                collect_input(&args, Some(reader))
            };
            match input {
                Ok(input) => Ok(exit_code(report_estimate(&input, &config, args.json))),
                Err(e) => {
                    print_error(&e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Sample { json } => {
            let config = display_config(&secrets);
            if !json {
                println!("{}", EstimateInput::SAMPLE_DESCRIPTION);
                println!("{}", EstimateInput::SAMPLE_EXPECTATION);
                println!();
            }
            Ok(exit_code(report_estimate(&EstimateInput::sample(), &config, json)))
        }
        Command::SmokeTest => {
            let config = AppConfig::load(&secrets)
                .with_context(|| format!("reading secrets from {}", secrets.display()))?;
            smoke_test(config)
        }
    }
}

/// A broken secrets file must not block estimating; fall back to defaults.
fn display_config(path: &std::path::Path) -> AppConfig {
    AppConfig::load(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable secrets file");
        AppConfig::default()
    })
}

fn smoke_test(config: AppConfig) -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    println!("Testing warehouse connection...");
    let report = runtime.block_on(lift_warehouse::run_smoke_test(config));

    for step in &report.steps {
        println!("  {}", step);
    }
    println!();
    println!("{} ({} ms)", report.summary(), report.elapsed().num_milliseconds());

    Ok(exit_code(report.succeeded()))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print `prompt` and read one answer. Blank answers and read failures yield `None`.
fn read_answer(reader: &mut dyn BufRead, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn ask_number(prompts: &mut Option<&mut dyn BufRead>, given: Option<f64>, prompt: &str, default: f64) -> f64 {
    if let Some(value) = given {
        return value;
    }
    let Some(reader) = prompts.as_deref_mut() else {
        return default;
    };
    match read_answer(reader, &format!("{} [{}]: ", prompt, default)) {
        None => default,
        Some(text) => text.parse().unwrap_or_else(|_| {
            tracing::warn!(input = %text, default, "not a number, keeping default");
            default
        }),
    }
}

/// Sides must be a whole count; "2.9" is an error, never 2.
fn ask_sides(prompts: &mut Option<&mut dyn BufRead>, given: Option<i64>, default: i64) -> CalcResult<i64> {
    if let Some(count) = given {
        return Ok(count);
    }
    let Some(reader) = prompts.as_deref_mut() else {
        return Ok(default);
    };
    match read_answer(reader, &format!("How many sides of the slab have settled (1-4) [{}]: ", default)) {
        None => Ok(default),
        Some(text) => parse_sides(&text).map(i64::from),
    }
}

/// Fill in missing flags. With `prompts`, each missing value is asked for
/// in turn; without it, missing values take their defaults.
fn collect_input(args: &EstimateArgs, mut prompts: Option<&mut dyn BufRead>) -> CalcResult<EstimateInput> {
    let defaults = EstimateInput::default();

    let width_ft = ask_number(&mut prompts, args.width, "Width of slab (feet)", defaults.width_ft);
    let length_ft = ask_number(&mut prompts, args.length, "Length of slab (feet)", defaults.length_ft);
    let settled_sides = ask_sides(&mut prompts, args.sides, defaults.settled_sides)?;
    let settlement_in = ask_number(
        &mut prompts,
        args.settlement,
        "Settlement at lowest point (inches)",
        defaults.settlement_in,
    );
    let price_per_lb = ask_number(&mut prompts, args.price, "Price per pound of polyfoam ($)", defaults.price_per_lb);

    Ok(EstimateInput {
        width_ft,
        length_ft,
        settled_sides,
        settlement_in,
        price_per_lb,
    })
}

/// Shape of `estimate --json` output; keeps declaration order.
#[derive(Serialize)]
struct EstimateOutput<'a> {
    input: &'a EstimateInput,
    result: &'a EstimateResult,
}

/// Print the estimate (or the validation error). Returns false on error.
fn report_estimate(input: &EstimateInput, config: &AppConfig, json: bool) -> bool {
    match calculate(input) {
        Ok(result) if json => match serde_json::to_string_pretty(&EstimateOutput { input, result: &result }) {
            Ok(text) => {
                println!("{}", text);
                true
            }
            Err(e) => {
                print_error(&CalcError::SerializationError { reason: e.to_string() });
                false
            }
        },
        Ok(result) => {
            print_results(input, &result, config);
            true
        }
        Err(e) => {
            print_error(&e);
            false
        }
    }
}

fn print_error(error: &CalcError) {
    eprintln!("Error: {}", error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn print_results(input: &EstimateInput, result: &EstimateResult, config: &AppConfig) {
    let report = EstimateReport::new(result, &config.display);
    let sides = SettledSides::try_from(input.settled_sides)
        .map(|s| s.to_string())
        .unwrap_or_else(|_| input.settled_sides.to_string());

    println!();
    println!("═══════════════════════════════════════");
    println!("  ESTIMATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Slab:       {} ft x {} ft", input.width_ft, input.length_ft);
    println!("  Settled:    {} side(s), {}\" at lowest point", sides, input.settlement_in);
    println!("  Price:      {}{:.2}/lb", config.display.currency_symbol, input.price_per_lb);
    println!();
    for metric in report.metrics() {
        println!("  {:<34} {}", format!("{}:", metric.label), metric.value);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!("{}", DISCLAIMER);
}
