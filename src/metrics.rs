//! Metric names and the ordered result mapping returned by every model.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::QueueError;
use crate::laws::LittlesLaw;

/// A steady-state performance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Utilization ρ.
    Rho,
    /// Probability that the system is empty.
    P0,
    /// Mean number of customers in the system.
    Ls,
    /// Mean time a customer spends in the system.
    Ws,
    /// Mean number of customers waiting in the queue.
    Lq,
    /// Mean time a customer spends waiting in the queue.
    Wq,
    /// Probability of exactly n customers in the system.
    Pn,
}

impl Metric {
    /// All metrics, in M/M/1 display order.
    pub const ALL: [Self; 7] = [
        Self::Rho,
        Self::P0,
        Self::Ls,
        Self::Ws,
        Self::Lq,
        Self::Wq,
        Self::Pn,
    ];

    /// Key used in result mappings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rho => "rho",
            Self::P0 => "P0",
            Self::Ls => "Ls",
            Self::Ws => "Ws",
            Self::Lq => "Lq",
            Self::Wq => "Wq",
            Self::Pn => "Pn",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rho => "Utilization",
            Self::P0 => "Prob. System Empty",
            Self::Ls => "Avg. # in System",
            Self::Ws => "Avg. Time in System",
            Self::Lq => "Avg. # in Queue",
            Self::Wq => "Avg. Waiting Time in Queue",
            Self::Pn => "Prob. of exactly n customers",
        }
    }

    /// Whether the metric is a probability (rendered as a percentage).
    #[must_use]
    pub const fn is_probability(self) -> bool {
        matches!(self, Self::Rho | Self::P0 | Self::Pn)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| QueueError::invalid_argument("metric", s, "unknown metric name"))
    }
}

/// Ordered mapping from [`Metric`] to value.
///
/// Key order is the insertion order chosen by the model, so rendering is
/// deterministic. Serializes as a map keyed by [`Metric::as_str`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueMetrics {
    values: IndexMap<Metric, f64>,
}

impl QueueMetrics {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, metric: Metric, value: f64) {
        self.values.insert(metric, value);
    }

    /// Value of a metric, if present.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Value of a metric looked up by its key (`"rho"`, `"P0"`, ...).
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        name.parse::<Metric>().ok().and_then(|m| self.get(m))
    }

    /// Whether the metric is present.
    #[must_use]
    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate metrics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Metric> + '_ {
        self.values.keys().copied()
    }

    /// Check that every value is finite and non-negative.
    #[must_use]
    pub fn all_finite_non_negative(&self) -> bool {
        self.values.values().all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Verify `Ls = λ·Ws` and `Lq = λ·Wq` within a relative tolerance.
    ///
    /// # Errors
    ///
    /// Returns the violation message if either identity fails or a required
    /// metric is missing.
    pub fn check_littles_law(&self, lambda: f64, tolerance: f64) -> Result<(), String> {
        let law = LittlesLaw::new();
        for (l, w) in [(Metric::Ls, Metric::Ws), (Metric::Lq, Metric::Wq)] {
            let (Some(l_val), Some(w_val)) = (self.get(l), self.get(w)) else {
                return Err(format!("missing {l} or {w}"));
            };
            law.validate(l_val, lambda, w_val, tolerance)
                .map_err(|e| format!("{l}/{w}: {e}"))?;
        }
        Ok(())
    }
}

impl Index<Metric> for QueueMetrics {
    type Output = f64;

    /// # Panics
    ///
    /// Panics if the metric is absent (only `Pn` is ever optional).
    fn index(&self, metric: Metric) -> &f64 {
        &self.values[&metric]
    }
}

impl Serialize for QueueMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k.as_str(), v)?;
        }
        map.end()
    }
}
