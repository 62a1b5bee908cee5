//! Steady-state queueing models.
//!
//! # Models
//!
//! - [`mm1`] - single server, Poisson arrivals, exponential service
//! - [`mms`] - `s` identical servers, Erlang-C formulas
//!
//! Each model validates its inputs first (returning the first violated
//! constraint) and then computes every metric unconditionally from the
//! validated parameters. All functions are pure: no I/O, no shared state.

pub mod mm1;
pub mod mms;

pub use mm1::{single_server_metrics, Mm1Params, SingleServerQueue};
pub use mms::{erlang_c, multi_server_metrics, MmsParams, MultiServerQueue};

use serde::{Deserialize, Serialize};

use crate::equation::{lookup, relative_error};
use crate::error::{QueueError, QueueResult};
use crate::metrics::{Metric, QueueMetrics};
use crate::units::Rate;

/// Arrival and service rates, each in its own time base.
///
/// Both rates are normalized to events per hour before any model validates
/// them, so `λ = 0.15/min` and `μ = 12/h` describe the same queue as
/// `λ = 9/h`, `μ = 12/h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueInput {
    /// Arrival rate λ.
    pub lambda: Rate,
    /// Service rate μ (per server).
    pub mu: Rate,
}

impl QueueInput {
    /// Pair two tagged rates.
    #[must_use]
    pub const fn new(lambda: Rate, mu: Rate) -> Self {
        Self { lambda, mu }
    }

    /// Both rates already in events per hour.
    #[must_use]
    pub const fn per_hour(lambda: f64, mu: f64) -> Self {
        Self::new(Rate::per_hour(lambda), Rate::per_hour(mu))
    }

    /// `(λ, μ)` in events per hour.
    #[must_use]
    pub fn rates_per_hour(&self) -> (f64, f64) {
        (self.lambda.as_per_hour(), self.mu.as_per_hour())
    }

    /// Evaluate as an M/M/1 queue.
    ///
    /// # Errors
    ///
    /// Same conditions as [`single_server_metrics`], applied to the
    /// per-hour rates.
    pub fn single_server(&self, n: Option<u32>) -> QueueResult<QueueMetrics> {
        let (lambda, mu) = self.rates_per_hour();
        single_server_metrics(lambda, mu, n)
    }

    /// Evaluate as an M/M/S queue with `servers` servers.
    ///
    /// # Errors
    ///
    /// Same conditions as [`multi_server_metrics`], applied to the
    /// per-hour rates.
    pub fn multi_server(&self, servers: u32) -> QueueResult<QueueMetrics> {
        let (lambda, mu) = self.rates_per_hour();
        multi_server_metrics(lambda, mu, servers)
    }
}

/// Reject non-finite or non-positive arrival and service rates.
pub(crate) fn check_rates(lambda: f64, mu: f64) -> QueueResult<()> {
    for (parameter, value) in [("lambda", lambda), ("mu", mu)] {
        if !value.is_finite() {
            return Err(QueueError::invalid_argument(
                parameter,
                value,
                "rates must be finite",
            ));
        }
        if value <= 0.0 {
            return Err(QueueError::invalid_argument(
                parameter,
                value,
                "rates must be positive",
            ));
        }
    }
    Ok(())
}

/// Reject a negative or non-finite time horizon.
pub(crate) fn check_horizon(t: f64) -> QueueResult<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(QueueError::invalid_argument(
            "t",
            t,
            "time must be a finite non-negative number",
        ))
    }
}

/// Compare every metric named in `values` against `expected`.
pub(crate) fn compare_metrics(
    expected: &QueueMetrics,
    values: &[(&str, f64)],
    tolerance: f64,
) -> Result<(), String> {
    for (name, observed) in values {
        let Ok(metric) = name.parse::<Metric>() else {
            continue;
        };
        let Some(want) = expected.get(metric) else {
            return Err(format!("metric '{metric}' is not produced by this model"));
        };
        let err = relative_error(*observed, want);
        if err > tolerance {
            return Err(format!(
                "{metric}: observed {observed:.6}, expected {want:.6} (relative error {err:.6})"
            ));
        }
    }
    Ok(())
}

/// Fetch the rates from a consistency-check slice.
pub(crate) fn lookup_rates(values: &[(&str, f64)]) -> Result<(f64, f64), String> {
    Ok((lookup(values, "lambda")?, lookup(values, "mu")?))
}
