//! M/M/S: `s` identical servers, Poisson arrivals, exponential service.
//!
//! # Governing Equations
//!
//! ```text
//! a  = λ/μ                      (offered load, Erlangs)
//! ρ  = λ/(s·μ)
//! P0 = [ Σ_{k=0}^{s−1} aᵏ/k!  +  aˢ/(s!·(1−ρ)) ]⁻¹
//! Lq = aˢ·ρ / (s!·(1−ρ)²) · P0
//! Ls = Lq + a
//! Wq = Lq/λ
//! Ws = Wq + 1/μ
//! ```
//!
//! # Numerics
//!
//! `s!` and `aˢ` are never formed. Terms `aᵏ/k!` are produced with the running
//! ratio `term_k = term_{k−1}·a/k`, and the partial sum is rescaled whenever it
//! crosses [`RESCALE_THRESHOLD`]. `Lq` and the Erlang-C probability are ratios
//! of scaled quantities, so the scale cancels; only `P0` needs it restored.

use crate::equation::{Citation, EquationVariable, GoverningEquation, VariableConstraints};
use crate::error::{ModelKind, QueueError, QueueResult};
use crate::metrics::{Metric, QueueMetrics};

use super::{check_rates, compare_metrics, lookup_rates};

/// Partial sums above this are scaled down by [`RESCALE_FACTOR`].
const RESCALE_THRESHOLD: f64 = 1e150;

/// Scale applied on each rescale step.
const RESCALE_FACTOR: f64 = 1e-150;

/// Scaled Erlang series for one parameter set.
#[derive(Debug, Clone, Copy)]
struct ErlangSeries {
    /// `Σ_{k<s} aᵏ/k!`, scaled.
    partial_sum: f64,
    /// `aˢ/s!`, scaled by the same factor.
    last_term: f64,
    /// Natural log of the accumulated scale divisor.
    log_scale: f64,
}

impl ErlangSeries {
    fn new(a: f64, s: u32) -> Self {
        let mut term = 1.0;
        let mut partial_sum = 0.0;
        let mut log_scale = 0.0;

        for k in 1..=s {
            partial_sum += term;
            term *= a / f64::from(k);
            if partial_sum > RESCALE_THRESHOLD {
                partial_sum *= RESCALE_FACTOR;
                term *= RESCALE_FACTOR;
                log_scale -= RESCALE_FACTOR.ln();
            }
        }

        Self {
            partial_sum,
            last_term: term,
            log_scale,
        }
    }

    /// `aˢ/(s!(1−ρ))`, scaled.
    fn tail(&self, rho: f64) -> f64 {
        self.last_term / (1.0 - rho)
    }

    /// Bracketed denominator of `P0`, scaled.
    fn denominator(&self, rho: f64) -> f64 {
        self.partial_sum + self.tail(rho)
    }
}

/// Validated M/M/S parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmsParams {
    lambda: f64,
    mu: f64,
    servers: u32,
}

impl MmsParams {
    /// Validate inputs.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `lambda` or `mu` is not a positive finite number
    /// - `InvalidArgument` if `servers` is zero
    /// - `UnstableSystem` if `lambda / (servers * mu) >= 1`
    pub fn new(lambda: f64, mu: f64, servers: u32) -> QueueResult<Self> {
        check_rates(lambda, mu)?;
        if servers < 1 {
            return Err(QueueError::invalid_argument(
                "s",
                servers,
                "server count must be at least 1",
            ));
        }
        let rho = (lambda / mu) / f64::from(servers);
        if rho >= 1.0 {
            return Err(QueueError::unstable(ModelKind::Mms, rho));
        }
        Ok(Self { lambda, mu, servers })
    }

    /// Arrival rate λ.
    #[must_use]
    pub const fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Service rate per server μ.
    #[must_use]
    pub const fn mu(&self) -> f64 {
        self.mu
    }

    /// Number of servers s.
    #[must_use]
    pub const fn servers(&self) -> u32 {
        self.servers
    }

    /// Offered load a = λ/μ in Erlangs.
    #[must_use]
    pub fn offered_load(&self) -> f64 {
        self.lambda / self.mu
    }

    /// Utilization per server ρ = λ/(s·μ).
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.offered_load() / f64::from(self.servers)
    }

    fn series(&self) -> ErlangSeries {
        ErlangSeries::new(self.offered_load(), self.servers)
    }

    /// Probability that an arriving customer has to wait (Erlang C).
    #[must_use]
    pub fn waiting_probability(&self) -> f64 {
        let rho = self.rho();
        let series = self.series();
        series.tail(rho) / series.denominator(rho)
    }

    /// Evaluate all metrics.
    #[must_use]
    pub fn compute(&self) -> QueueMetrics {
        let rho = self.rho();
        let a = self.offered_load();
        let series = self.series();
        let denominator = series.denominator(rho);

        let p0 = (-series.log_scale).exp() / denominator;
        let lq = series.last_term * rho / ((1.0 - rho) * (1.0 - rho) * denominator);
        let ls = lq + a;
        let wq = lq / self.lambda;
        let ws = wq + 1.0 / self.mu;

        let mut metrics = QueueMetrics::with_capacity(6);
        metrics.insert(Metric::Rho, rho);
        metrics.insert(Metric::P0, p0);
        metrics.insert(Metric::Lq, lq);
        metrics.insert(Metric::Ls, ls);
        metrics.insert(Metric::Wq, wq);
        metrics.insert(Metric::Ws, ws);
        metrics
    }
}

/// Steady-state metrics of an M/M/S queue.
///
/// Returns `rho`, `P0`, `Lq`, `Ls`, `Wq`, `Ws`.
///
/// # Errors
///
/// - `InvalidArgument` if a rate is not a positive finite number or `s == 0`
/// - `UnstableSystem` if `λ/(s·μ) >= 1`
///
/// # Example
///
/// ```rust
/// use queuecalc::prelude::*;
///
/// let m = multi_server_metrics(2.0, 3.0, 2).unwrap();
/// assert!((m[Metric::P0] - 0.5).abs() < 1e-12);
/// assert!((m[Metric::Ls] - 0.75).abs() < 1e-12);
/// ```
pub fn multi_server_metrics(lambda: f64, mu: f64, s: u32) -> QueueResult<QueueMetrics> {
    Ok(MmsParams::new(lambda, mu, s)?.compute())
}

/// Erlang-C probability that an arriving customer must queue.
///
/// # Errors
///
/// Same conditions as [`multi_server_metrics`].
pub fn erlang_c(lambda: f64, mu: f64, s: u32) -> QueueResult<f64> {
    Ok(MmsParams::new(lambda, mu, s)?.waiting_probability())
}

/// Equation metadata and consistency check for the M/M/S model.
#[derive(Debug, Clone)]
pub struct MultiServerQueue {
    latex: String,
    description: String,
}

impl MultiServerQueue {
    /// Create the M/M/S equation set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latex: r"P_0 = \left[\sum_{k=0}^{s-1}\frac{a^k}{k!} + \frac{a^s}{s!(1-\rho)}\right]^{-1},\; L_q = \frac{a^s \rho}{s!(1-\rho)^2} P_0".to_string(),
            description: "Multi-server queue with Poisson arrivals and exponential service \
                          at each of s identical servers (Erlang C)."
                .to_string(),
        }
    }
}

impl Default for MultiServerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl GoverningEquation for MultiServerQueue {
    fn latex(&self) -> &str {
        &self.latex
    }

    fn citation(&self) -> Citation {
        Citation::new(&["Erlang, A.K."], "Elektroteknikeren", 1917).with_title(
            "Solution of some problems in the theory of probabilities of significance \
             in automatic telephone exchanges",
        )
    }

    fn variables(&self) -> Vec<EquationVariable> {
        vec![
            EquationVariable::new("λ", "lambda", "customers/hour")
                .with_description("Mean arrival rate")
                .with_constraints(VariableConstraints::positive_real()),
            EquationVariable::new("μ", "mu", "customers/hour")
                .with_description("Mean service rate of one server")
                .with_constraints(VariableConstraints::positive_real()),
            EquationVariable::new("s", "s", "servers")
                .with_description("Number of identical servers")
                .with_constraints(VariableConstraints::integer_at_least(1.0)),
        ]
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn name(&self) -> &'static str {
        "M/M/S"
    }

    fn validate_consistency(&self, values: &[(&str, f64)], tolerance: f64) -> Result<(), String> {
        let (lambda, mu) = lookup_rates(values)?;
        let raw_s = crate::equation::lookup(values, "s")?;
        let s = crate::params::server_count(raw_s).map_err(|e| e.to_string())?;
        let expected = multi_server_metrics(lambda, mu, s).map_err(|e| e.to_string())?;
        compare_metrics(&expected, values, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::single_server_metrics;

    const TOL: f64 = 1e-9;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= TOL * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_two_servers() {
        let m = multi_server_metrics(2.0, 3.0, 2).unwrap();
        approx(m[Metric::Rho], 1.0 / 3.0);
        approx(m[Metric::P0], 0.5);
        approx(m[Metric::Lq], 1.0 / 12.0);
        approx(m[Metric::Ls], 0.75);
        approx(m[Metric::Wq], 1.0 / 24.0);
        approx(m[Metric::Ws], 0.375);
    }

    #[test]
    fn test_key_order() {
        let m = multi_server_metrics(2.0, 3.0, 2).unwrap();
        let keys: Vec<&str> = m.keys().map(Metric::as_str).collect();
        assert_eq!(keys, ["rho", "P0", "Lq", "Ls", "Wq", "Ws"]);
    }

    #[test]
    fn test_single_server_reduces_to_mm1() {
        let multi = multi_server_metrics(0.75, 1.0, 1).unwrap();
        let single = single_server_metrics(0.75, 1.0, None).unwrap();
        for (metric, value) in single.iter() {
            approx(multi[metric], value);
        }
    }

    #[test]
    fn test_zero_servers_rejected() {
        let err = multi_server_metrics(1.0, 1.0, 0).unwrap_err();
        assert!(matches!(err, QueueError::InvalidArgument { parameter: "s", .. }));
    }

    #[test]
    fn test_non_positive_rates_rejected() {
        let err = multi_server_metrics(0.0, 1.0, 2).unwrap_err();
        assert!(err.to_string().contains("rates must be positive"));
        let err = multi_server_metrics(1.0, -1.0, 2).unwrap_err();
        assert_eq!(err.parameter(), Some("mu"));
    }

    #[test]
    fn test_rates_checked_before_servers() {
        let err = multi_server_metrics(-1.0, 1.0, 0).unwrap_err();
        assert_eq!(err.parameter(), Some("lambda"));
    }

    #[test]
    fn test_unstable() {
        let err = multi_server_metrics(6.0, 3.0, 2).unwrap_err();
        assert!(matches!(
            err,
            QueueError::UnstableSystem {
                model: ModelKind::Mms,
                ..
            }
        ));
        approx(err.rho().unwrap_or_default(), 1.0);

        assert!(multi_server_metrics(7.0, 3.0, 2).is_err());
    }

    #[test]
    fn test_erlang_c() {
        // M/M/2 with a = 2/3: Pw = (a²/2)/(1−ρ) · P0 = (2/9)/(2/3) · 0.5 = 1/6.
        approx(erlang_c(2.0, 3.0, 2).unwrap(), 1.0 / 6.0);
        // M/M/1: Pw = ρ.
        approx(erlang_c(0.75, 1.0, 1).unwrap(), 0.75);
        assert!(erlang_c(1.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_lq_equals_erlang_c_times_queue_factor() {
        let p = MmsParams::new(40.0, 1.0, 50).unwrap();
        let m = p.compute();
        let rho = p.rho();
        approx(m[Metric::Lq], p.waiting_probability() * rho / (1.0 - rho));
    }

    #[test]
    fn test_large_server_count_stays_finite() {
        // Offered load 450 Erlangs: direct a^s / s! would overflow.
        let m = multi_server_metrics(450.0, 1.0, 500).unwrap();
        assert!(m.all_finite_non_negative());
        assert!(m[Metric::P0] > 0.0);
        assert!(m[Metric::P0] < 1e-150);
        assert!(m.check_littles_law(450.0, 1e-9).is_ok());
        assert!(m[Metric::Ls] > 450.0);
    }

    #[test]
    fn test_huge_rates_keep_utilization() {
        // s·μ is not representable here; ρ must still be 1/s.
        let m = multi_server_metrics(1e308, 1e308, 10).unwrap();
        approx(m[Metric::Rho], 0.1);
        assert!(m.all_finite_non_negative());
        assert!(m[Metric::Lq] > 0.0);
        approx(m[Metric::Ls], m[Metric::Lq] + 1.0);

        let err = multi_server_metrics(1e308, 1e307, 9).unwrap_err();
        assert!(err.rho().is_some_and(|rho| rho > 1.0));
    }

    #[test]
    fn test_params_accessors() {
        let p = MmsParams::new(2.0, 3.0, 2).unwrap();
        approx(p.lambda(), 2.0);
        approx(p.mu(), 3.0);
        assert_eq!(p.servers(), 2);
        approx(p.offered_load(), 2.0 / 3.0);
    }

    #[test]
    fn test_equation_consistency() {
        let eq = MultiServerQueue::new();
        let values = [
            ("lambda", 2.0),
            ("mu", 3.0),
            ("s", 2.0),
            ("P0", 0.5),
            ("Ls", 0.75),
        ];
        assert!(eq.validate_consistency(&values, 1e-9).is_ok());
        assert!(eq
            .validate_consistency(&[("lambda", 2.0), ("mu", 3.0), ("s", 2.0), ("P0", 0.4)], 1e-3)
            .is_err());
        assert!(eq
            .validate_consistency(&[("lambda", 2.0), ("mu", 3.0), ("s", 0.0)], 1e-3)
            .is_err());
        assert!(eq
            .validate_consistency(&[("lambda", 2.0), ("mu", 3.0), ("s", 2.0), ("Pn", 0.1)], 1e-3)
            .is_err());
        assert_eq!(eq.name(), "M/M/S");
        assert_eq!(eq.citation().year, 1917);
        assert_eq!(eq.variables().len(), 3);
    }
}
