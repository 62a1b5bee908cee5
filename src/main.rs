//! queuecalc CLI - steady-state queueing metrics
//!
//! Command-line front end for the M/M/1 and M/M/S models.

use std::process::ExitCode;

use queuecalc::cli::{init_logging, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    run_cli(args)
}
