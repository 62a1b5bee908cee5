//! M/M/1: single server, Poisson arrivals, exponential service.
//!
//! # Governing Equations
//!
//! ```text
//! ρ  = λ/μ
//! P0 = 1 − ρ
//! Ls = λ/(μ − λ)
//! Ws = 1/(μ − λ)
//! Lq = λ²/(μ(μ − λ))
//! Wq = λ/(μ(μ − λ))
//! Pn = (1 − ρ)·ρⁿ
//! ```
//!
//! Valid only for `0 < λ < μ`; at `λ ≥ μ` the queue grows without bound.

use crate::equation::{Citation, EquationVariable, GoverningEquation, VariableConstraints};
use crate::error::{ModelKind, QueueError, QueueResult};
use crate::metrics::{Metric, QueueMetrics};

use super::{check_horizon, check_rates, compare_metrics, lookup_rates};

/// Validated M/M/1 parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mm1Params {
    lambda: f64,
    mu: f64,
    n: Option<u32>,
}

impl Mm1Params {
    /// Validate inputs.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `lambda` or `mu` is not a positive finite number
    /// - `UnstableSystem` if `lambda >= mu`
    pub fn new(lambda: f64, mu: f64, n: Option<u32>) -> QueueResult<Self> {
        check_rates(lambda, mu)?;
        if lambda >= mu {
            return Err(QueueError::unstable(ModelKind::Mm1, lambda / mu));
        }
        Ok(Self { lambda, mu, n })
    }

    /// Arrival rate λ.
    #[must_use]
    pub const fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Service rate μ.
    #[must_use]
    pub const fn mu(&self) -> f64 {
        self.mu
    }

    /// Requested customer count for `Pn`.
    #[must_use]
    pub const fn n(&self) -> Option<u32> {
        self.n
    }

    /// Utilization ρ = λ/μ.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.lambda / self.mu
    }

    /// Probability of exactly `n` customers in the system.
    #[must_use]
    pub fn prob_exactly(&self, n: u32) -> f64 {
        let rho = self.rho();
        (1.0 - rho) * rho.powf(f64::from(n))
    }

    /// Probability of more than `k` customers in the system, `ρ^(k+1)`.
    #[must_use]
    pub fn prob_more_than(&self, k: u32) -> f64 {
        self.rho().powf(f64::from(k) + 1.0)
    }

    /// Probability that a customer's time in the system exceeds `t`,
    /// `e^(−(μ−λ)t)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `t` is negative or not finite.
    pub fn prob_system_time_exceeds(&self, t: f64) -> QueueResult<f64> {
        check_horizon(t)?;
        Ok((-(self.mu - self.lambda) * t).exp())
    }

    /// Probability that a customer waits in the queue longer than `t`,
    /// `ρ·e^(−(μ−λ)t)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `t` is negative or not finite.
    pub fn prob_queue_time_exceeds(&self, t: f64) -> QueueResult<f64> {
        Ok(self.rho() * self.prob_system_time_exceeds(t)?)
    }

    /// Evaluate all metrics.
    #[must_use]
    pub fn compute(&self) -> QueueMetrics {
        let (lambda, mu) = (self.lambda, self.mu);
        let rho = self.rho();
        let slack = mu - lambda;

        let mut metrics = QueueMetrics::with_capacity(7);
        metrics.insert(Metric::Rho, rho);
        metrics.insert(Metric::P0, 1.0 - rho);
        metrics.insert(Metric::Ls, lambda / slack);
        metrics.insert(Metric::Ws, 1.0 / slack);
        // λ² and μ(μ−λ) overflow for large finite rates; divide through ρ.
        metrics.insert(Metric::Lq, rho * lambda / slack);
        metrics.insert(Metric::Wq, rho / slack);
        if let Some(n) = self.n {
            metrics.insert(Metric::Pn, self.prob_exactly(n));
        }
        metrics
    }
}

/// Steady-state metrics of an M/M/1 queue.
///
/// Returns `rho`, `P0`, `Ls`, `Ws`, `Lq`, `Wq` and, when `n` is given, `Pn`.
///
/// # Errors
///
/// - `InvalidArgument` if `lambda` or `mu` is not a positive finite number
/// - `UnstableSystem` if `lambda >= mu`
///
/// # Example
///
/// ```rust
/// use queuecalc::prelude::*;
///
/// let m = single_server_metrics(0.75, 1.0, Some(2)).unwrap();
/// assert!((m[Metric::Ls] - 3.0).abs() < 1e-12);
/// assert!((m[Metric::Pn] - 0.140625).abs() < 1e-12);
/// ```
pub fn single_server_metrics(lambda: f64, mu: f64, n: Option<u32>) -> QueueResult<QueueMetrics> {
    Ok(Mm1Params::new(lambda, mu, n)?.compute())
}

/// Equation metadata and consistency check for the M/M/1 model.
#[derive(Debug, Clone)]
pub struct SingleServerQueue {
    latex: String,
    description: String,
}

impl SingleServerQueue {
    /// Create the M/M/1 equation set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latex: r"\rho = \frac{\lambda}{\mu},\; L_s = \frac{\lambda}{\mu - \lambda},\; W_q = \frac{\lambda}{\mu(\mu - \lambda)},\; P_n = (1-\rho)\rho^n".to_string(),
            description: "Single-server queue with Poisson arrivals and exponential service; \
                          the number in system is geometric with parameter ρ."
                .to_string(),
        }
    }
}

impl Default for SingleServerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl GoverningEquation for SingleServerQueue {
    fn latex(&self) -> &str {
        &self.latex
    }

    fn citation(&self) -> Citation {
        Citation::new(
            &["Gross, D.", "Shortle, J.F.", "Thompson, J.M.", "Harris, C.M."],
            "Wiley",
            2008,
        )
        .with_title("Fundamentals of Queueing Theory, 4th ed.")
    }

    fn variables(&self) -> Vec<EquationVariable> {
        vec![
            EquationVariable::new("λ", "lambda", "customers/hour")
                .with_description("Mean arrival rate")
                .with_constraints(VariableConstraints::positive_real()),
            EquationVariable::new("μ", "mu", "customers/hour")
                .with_description("Mean service rate, must exceed λ")
                .with_constraints(VariableConstraints::positive_real()),
            EquationVariable::new("n", "n", "customers")
                .with_description("Optional customer count for Pn")
                .with_constraints(VariableConstraints::integer_at_least(0.0)),
        ]
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn name(&self) -> &'static str {
        "M/M/1"
    }

    fn validate_consistency(&self, values: &[(&str, f64)], tolerance: f64) -> Result<(), String> {
        let (lambda, mu) = lookup_rates(values)?;
        let n = match crate::equation::lookup(values, "n") {
            Ok(raw) => Some(crate::params::customer_count(raw).map_err(|e| e.to_string())?),
            Err(_) => None,
        };
        let expected = single_server_metrics(lambda, mu, n).map_err(|e| e.to_string())?;
        compare_metrics(&expected, values, tolerance)
    }
}
