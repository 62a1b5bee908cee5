//! CLI output formatting.
//!
//! Formatting functions return `String`s so that rendering can be tested;
//! the `print_*` wrappers write them to stdout.

use std::fmt::Write as _;

use crate::config::ScenarioOutcome;
use crate::metrics::{Metric, QueueMetrics};

use super::args::ConvertDirection;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Version line plus the build commit when one was embedded.
#[must_use]
pub fn format_version() -> String {
    let version = option_env!("QUEUECALC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    let mut out = format!("queuecalc {version}");
    if let Some(hash) = option_env!("GIT_HASH").filter(|hash| !hash.is_empty()) {
        let _ = write!(out, "\ncommit {hash}");
    }
    out
}

/// Print version information.
pub fn print_version() {
    println!("{}", format_version());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"queuecalc - Steady-state metrics for M/M/1 and M/M/S queues

USAGE:
    queuecalc <COMMAND> [OPTIONS]

COMMANDS:
    mm1 <lambda> <mu>             Single-server queue
        --n <N>                   Also report P(exactly N customers)

    mms <lambda> <mu> <servers>   Multi-server queue (Erlang C)

    batch <scenarios.yaml>        Evaluate every scenario in a file

    convert <rate>                Convert a rate between time bases
        --to-hours                per minute -> per hour
        --to-minutes              per hour -> per minute

    help                          Show this help message
    version                       Show version information

OPTIONS:
    --lambda-per-minute           lambda is given per minute (default: per hour)
    --mu-per-minute               mu is given per minute (default: per hour)
    --json                        Print results as JSON
    -v, --verbose                 Enable debug logging (or set RUST_LOG)

EXAMPLES:
    queuecalc mm1 9 12
    queuecalc mm1 0.15 12 --lambda-per-minute --n 2
    queuecalc mms 2 3 2 --json
    queuecalc batch scenarios.yaml
"
    );
}

/// Label for a metric line; `Pn` names the requested count.
fn metric_label(metric: Metric, n: Option<u32>) -> String {
    match (metric, n) {
        (Metric::Pn, Some(n)) => format!("Prob. of exactly {n} customers"),
        _ => metric.label().to_string(),
    }
}

/// Render metrics as labelled lines: probabilities as percentages with two
/// decimals, everything else with four decimals.
#[must_use]
pub fn format_metrics(metrics: &QueueMetrics, n: Option<u32>) -> String {
    let mut out = String::new();
    for (metric, value) in metrics.iter() {
        let label = metric_label(metric, n);
        if metric.is_probability() {
            let _ = writeln!(out, "{label}: {:.2}%", value * 100.0);
        } else {
            let _ = writeln!(out, "{label}: {value:.4}");
        }
    }
    out
}

/// Print a single result under a title.
pub fn print_metrics(title: &str, metrics: &QueueMetrics, n: Option<u32>) {
    println!("{RULE}");
    println!("{title}");
    println!("{RULE}");
    print!("{}", format_metrics(metrics, n));
}

/// Render batch outcomes as text.
#[must_use]
pub fn format_outcomes(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{} ({})", outcome.name, outcome.model);
        let _ = writeln!(out, "{RULE}");
        match &outcome.result {
            Ok(metrics) => out.push_str(&format_metrics(metrics, outcome.n)),
            Err(e) => {
                let _ = writeln!(out, "✗ {e}");
            }
        }
    }
    let passed = outcomes.iter().filter(|o| o.is_ok()).count();
    let _ = writeln!(out, "\n{passed}/{} scenarios evaluated", outcomes.len());
    out
}

/// Render batch outcomes as a JSON array.
#[must_use]
pub fn format_outcomes_json(outcomes: &[ScenarioOutcome]) -> String {
    let entries: Vec<serde_json::Value> = outcomes.iter().map(ScenarioOutcome::to_json).collect();
    serde_json::Value::Array(entries).to_string()
}

/// Render the result of a unit conversion.
#[must_use]
pub fn format_conversion(input: f64, output: f64, direction: ConvertDirection) -> String {
    match direction {
        ConvertDirection::ToHours => format!("{input:.4} per minute = {output:.4} per hour"),
        ConvertDirection::ToMinutes => format!("{input:.4} per hour = {output:.4} per minute"),
    }
}
