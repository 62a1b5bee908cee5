//! CLI command handlers.
//!
//! Each handler turns raw argument text into typed inputs, calls the
//! library, and renders either the metrics or the error message verbatim.

use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, warn};

use crate::config::ScenarioFile;
use crate::error::{QueueError, QueueResult};
use crate::metrics::QueueMetrics;
use crate::models::QueueInput;
use crate::params::{parse_customer_count, parse_rate, parse_server_count};
use crate::units::{Rate, RateUnit};

use super::args::{ConvertDirection, OutputFormat};
use super::output::{
    format_conversion, format_outcomes, format_outcomes_json, print_help, print_metrics,
    print_version,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Mm1 {
            lambda,
            mu,
            n,
            lambda_unit,
            mu_unit,
            format,
        } => run_mm1(&lambda, &mu, n.as_deref(), lambda_unit, mu_unit, format),
        Command::Mms {
            lambda,
            mu,
            servers,
            lambda_unit,
            mu_unit,
            format,
        } => run_mms(&lambda, &mu, &servers, lambda_unit, mu_unit, format),
        Command::Batch { path, format } => run_batch(&path, format),
        Command::Convert { value, direction } => run_convert(&value, direction),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Parse text rates into a [`QueueInput`].
fn parse_input(
    lambda: &str,
    mu: &str,
    lambda_unit: RateUnit,
    mu_unit: RateUnit,
) -> QueueResult<QueueInput> {
    Ok(QueueInput::new(
        Rate {
            value: parse_rate("lambda", lambda)?,
            unit: lambda_unit,
        },
        Rate {
            value: parse_rate("mu", mu)?,
            unit: mu_unit,
        },
    ))
}

/// Parse and evaluate M/M/1 inputs given as text.
///
/// Returns the metrics together with the parsed customer count, if any.
///
/// # Errors
///
/// Returns `InvalidArgument` for unparsable input and any model error.
pub fn evaluate_mm1(
    lambda: &str,
    mu: &str,
    n: Option<&str>,
    lambda_unit: RateUnit,
    mu_unit: RateUnit,
) -> QueueResult<(QueueMetrics, Option<u32>)> {
    let input = parse_input(lambda, mu, lambda_unit, mu_unit)?;
    let n = match n {
        Some(text) => parse_customer_count(text)?,
        None => None,
    };
    let (lambda, mu) = input.rates_per_hour();
    debug!(lambda, mu, ?n, "evaluating M/M/1");
    Ok((input.single_server(n)?, n))
}

/// Parse and evaluate M/M/S inputs given as text.
///
/// # Errors
///
/// Returns `InvalidArgument` for unparsable input and any model error.
pub fn evaluate_mms(
    lambda: &str,
    mu: &str,
    servers: &str,
    lambda_unit: RateUnit,
    mu_unit: RateUnit,
) -> QueueResult<QueueMetrics> {
    let input = parse_input(lambda, mu, lambda_unit, mu_unit)?;
    let servers = parse_server_count(servers)?;
    let (lambda, mu) = input.rates_per_hour();
    debug!(lambda, mu, servers, "evaluating M/M/S");
    input.multi_server(servers)
}

/// Print a single evaluation result and map it to an exit code.
fn report(
    title: &str,
    result: QueueResult<QueueMetrics>,
    n: Option<u32>,
    format: OutputFormat,
) -> ExitCode {
    match result {
        Ok(metrics) => match format {
            OutputFormat::Text => {
                print_metrics(title, &metrics, n);
                ExitCode::SUCCESS
            }
            OutputFormat::Json => match serde_json::to_string_pretty(&metrics) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", QueueError::serialization(e.to_string()));
                    ExitCode::from(1)
                }
            },
        },
        Err(e) => {
            warn!(error = %e, "evaluation failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Run the 'mm1' command.
#[must_use]
pub fn run_mm1(
    lambda: &str,
    mu: &str,
    n: Option<&str>,
    lambda_unit: RateUnit,
    mu_unit: RateUnit,
    format: OutputFormat,
) -> ExitCode {
    let (result, n) = match evaluate_mm1(lambda, mu, n, lambda_unit, mu_unit) {
        Ok((metrics, n)) => (Ok(metrics), n),
        Err(e) => (Err(e), None),
    };
    report("M/M/1 Results", result, n, format)
}

/// Run the 'mms' command.
#[must_use]
pub fn run_mms(
    lambda: &str,
    mu: &str,
    servers: &str,
    lambda_unit: RateUnit,
    mu_unit: RateUnit,
    format: OutputFormat,
) -> ExitCode {
    let result = evaluate_mms(lambda, mu, servers, lambda_unit, mu_unit);
    report("M/M/S Results", result, None, format)
}

/// Run the 'batch' command.
///
/// Exits with 1 if the file cannot be loaded or any scenario fails.
#[must_use]
pub fn run_batch(path: &Path, format: OutputFormat) -> ExitCode {
    debug!(path = %path.display(), "loading scenario file");
    let file = match ScenarioFile::load(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(error = %e, "failed to load scenario file");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let outcomes = file.evaluate();
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            warn!(scenario = %outcome.name, error = %e, "scenario failed");
        }
    }

    match format {
        OutputFormat::Text => print!("{}", format_outcomes(&outcomes)),
        OutputFormat::Json => println!("{}", format_outcomes_json(&outcomes)),
    }

    if outcomes.iter().all(crate::config::ScenarioOutcome::is_ok) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Convert a rate between per-minute and per-hour.
///
/// # Errors
///
/// Returns `InvalidArgument` if the text is not a finite number.
pub fn convert_rate(value: &str, direction: ConvertDirection) -> QueueResult<(f64, f64)> {
    let input = parse_rate("rate", value)?;
    let output = match direction {
        ConvertDirection::ToHours => RateUnit::PerMinute.to_per_hour(input),
        ConvertDirection::ToMinutes => RateUnit::PerMinute.from_per_hour(input),
    };
    Ok((input, output))
}

/// Run the 'convert' command.
#[must_use]
pub fn run_convert(value: &str, direction: ConvertDirection) -> ExitCode {
    match convert_rate(value, direction) {
        Ok((input, output)) => {
            println!("{}", format_conversion(input, output, direction));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
