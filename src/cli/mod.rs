//! CLI module for queuecalc.
//!
//! All CLI logic lives here rather than in main.rs so that argument parsing,
//! command handling and output formatting can be tested. The entry point
//! `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, ConvertDirection, OutputFormat};
pub use commands::{convert_rate, evaluate_mm1, evaluate_mms, run_cli};
pub use output::{
    format_conversion, format_metrics, format_outcomes, format_outcomes_json, format_version,
    print_help, print_version,
};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `warn`.
/// Calling this more than once is harmless.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "queuecalc=debug" } else { "queuecalc=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
