//! CLI argument parsing.
//!
//! Numeric arguments are kept as raw text here; the command handlers turn
//! them into typed values through [`crate::params`] so that bad input is
//! reported with the same errors the library uses.

use std::path::PathBuf;

use crate::units::RateUnit;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
    /// Enable debug logging.
    pub verbose: bool,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Labelled lines with percentages.
    #[default]
    Text,
    /// JSON object.
    Json,
}

/// Direction of the minutes/hours converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertDirection {
    /// Per-minute rate to per-hour rate.
    ToHours,
    /// Per-hour rate to per-minute rate.
    ToMinutes,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate an M/M/1 queue.
    Mm1 {
        /// Arrival rate text.
        lambda: String,
        /// Service rate text.
        mu: String,
        /// Optional customer count text.
        n: Option<String>,
        /// Time base of lambda.
        lambda_unit: RateUnit,
        /// Time base of mu.
        mu_unit: RateUnit,
        /// Output format.
        format: OutputFormat,
    },
    /// Evaluate an M/M/S queue.
    Mms {
        /// Arrival rate text.
        lambda: String,
        /// Service rate text.
        mu: String,
        /// Server count text.
        servers: String,
        /// Time base of lambda.
        lambda_unit: RateUnit,
        /// Time base of mu.
        mu_unit: RateUnit,
        /// Output format.
        format: OutputFormat,
    },
    /// Evaluate every scenario in a YAML file.
    Batch {
        /// Path to the scenario file.
        path: PathBuf,
        /// Output format.
        format: OutputFormat,
    },
    /// Convert a rate between per-minute and per-hour.
    Convert {
        /// Rate text.
        value: String,
        /// Conversion direction.
        direction: ConvertDirection,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Flags shared by the evaluation commands.
#[derive(Debug, Default)]
struct Flags {
    positionals: Vec<String>,
    n: Option<String>,
    lambda_unit: RateUnit,
    mu_unit: RateUnit,
    format: OutputFormat,
    verbose: bool,
    direction: Option<ConvertDirection>,
}

impl Flags {
    fn parse(rest: &[String]) -> Self {
        let mut flags = Self::default();
        let mut i = 0;
        while i < rest.len() {
            match rest[i].as_str() {
                "--n" | "-n" => {
                    if i + 1 < rest.len() {
                        flags.n = Some(rest[i + 1].clone());
                        i += 2;
                    } else {
                        eprintln!("Warning: '--n' expects a value");
                        i += 1;
                    }
                }
                "--lambda-per-minute" => {
                    flags.lambda_unit = RateUnit::PerMinute;
                    i += 1;
                }
                "--mu-per-minute" => {
                    flags.mu_unit = RateUnit::PerMinute;
                    i += 1;
                }
                "--json" => {
                    flags.format = OutputFormat::Json;
                    i += 1;
                }
                "-v" | "--verbose" => {
                    flags.verbose = true;
                    i += 1;
                }
                "--to-hours" => {
                    flags.direction = Some(ConvertDirection::ToHours);
                    i += 1;
                }
                "--to-minutes" => {
                    flags.direction = Some(ConvertDirection::ToMinutes);
                    i += 1;
                }
                other => {
                    flags.positionals.push(other.to_string());
                    i += 1;
                }
            }
        }
        flags
    }
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn help() -> Self {
        Self {
            command: Command::Help,
            verbose: false,
        }
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self::help();
        }

        let flags = Flags::parse(&args[2..]);
        let verbose = flags.verbose;

        let command = match args[1].as_str() {
            "mm1" => Self::parse_mm1_command(flags),
            "mms" => Self::parse_mms_command(flags),
            "batch" => Self::parse_batch_command(flags),
            "convert" => Self::parse_convert_command(flags),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command, verbose }
    }

    /// Parse the 'mm1' command arguments.
    fn parse_mm1_command(flags: Flags) -> Command {
        let Flags {
            positionals,
            n,
            lambda_unit,
            mu_unit,
            format,
            ..
        } = flags;
        let mut it = positionals.into_iter();
        match (it.next(), it.next()) {
            (Some(lambda), Some(mu)) => Command::Mm1 {
                lambda,
                mu,
                n,
                lambda_unit,
                mu_unit,
                format,
            },
            _ => {
                eprintln!("Error: 'mm1' command requires <lambda> <mu>");
                Command::Help
            }
        }
    }

    /// Parse the 'mms' command arguments.
    fn parse_mms_command(flags: Flags) -> Command {
        let Flags {
            positionals,
            lambda_unit,
            mu_unit,
            format,
            ..
        } = flags;
        let mut it = positionals.into_iter();
        match (it.next(), it.next(), it.next()) {
            (Some(lambda), Some(mu), Some(servers)) => Command::Mms {
                lambda,
                mu,
                servers,
                lambda_unit,
                mu_unit,
                format,
            },
            _ => {
                eprintln!("Error: 'mms' command requires <lambda> <mu> <servers>");
                Command::Help
            }
        }
    }

    /// Parse the 'batch' command arguments.
    fn parse_batch_command(flags: Flags) -> Command {
        match flags.positionals.first() {
            Some(path) => Command::Batch {
                path: PathBuf::from(path),
                format: flags.format,
            },
            None => {
                eprintln!("Error: 'batch' command requires a scenario file path");
                Command::Help
            }
        }
    }

    /// Parse the 'convert' command arguments.
    fn parse_convert_command(flags: Flags) -> Command {
        match (flags.positionals.first(), flags.direction) {
            (Some(value), Some(direction)) => Command::Convert {
                value: value.clone(),
                direction,
            },
            _ => {
                eprintln!("Error: 'convert' command requires <value> and --to-hours or --to-minutes");
                Command::Help
            }
        }
    }
}
