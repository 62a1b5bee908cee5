//! Scenario files: batches of queue parameter sets loaded from YAML.
//!
//! Mistake-proofing happens in three stages:
//! - Schema: serde with `deny_unknown_fields`
//! - Constraints: `validator` derive
//! - Semantics: cross-field rules checked after parsing
//!
//! Numeric domain checks (positive rates, stability) are left to the models
//! so that each scenario reports its own failure without aborting the batch.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{QueueError, QueueResult};
use crate::metrics::QueueMetrics;
use crate::models::QueueInput;
use crate::params::customer_count;
use crate::units::{Rate, RateUnit};

/// Queueing model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSpec {
    /// Single server.
    #[default]
    Mm1,
    /// Multiple identical servers.
    Mms,
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm1 => write!(f, "M/M/1"),
            Self::Mms => write!(f, "M/M/S"),
        }
    }
}

/// Top-level scenario file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Scenarios, evaluated in order.
    #[validate(length(min = 1), nested)]
    pub scenarios: Vec<Scenario>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl ScenarioFile {
    /// Load scenarios from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> QueueResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse scenarios from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> QueueResult<Self> {
        let file: Self = serde_yaml::from_str(yaml)?;

        file.validate()?;
        file.validate_semantic()?;

        Ok(file)
    }

    /// Build a file from scenarios constructed in code.
    ///
    /// # Errors
    ///
    /// Returns error if validation fails.
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> QueueResult<Self> {
        let file = Self {
            schema_version: default_schema_version(),
            scenarios,
        };
        file.validate()?;
        file.validate_semantic()?;
        Ok(file)
    }

    /// Cross-field constraints beyond the schema.
    fn validate_semantic(&self) -> QueueResult<()> {
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(QueueError::config(format!(
                    "duplicate scenario name '{}'",
                    scenario.name
                )));
            }
            scenario.validate_semantic()?;
        }
        Ok(())
    }

    /// Evaluate every scenario, in order. A failing scenario does not stop
    /// the rest.
    #[must_use]
    pub fn evaluate(&self) -> Vec<ScenarioOutcome> {
        self.scenarios
            .iter()
            .map(|scenario| {
                let counted = scenario.customer_count();
                let n = counted.as_ref().ok().copied().flatten();
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    model: scenario.model,
                    n,
                    result: counted.and_then(|n| scenario.evaluate_with(n)),
                }
            })
            .collect()
    }
}

/// One parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Unique name used in reports.
    #[validate(length(min = 1))]
    pub name: String,

    /// Which model to evaluate.
    #[serde(default)]
    pub model: ModelSpec,

    /// Arrival rate λ, in `lambda_unit`.
    pub lambda: f64,

    /// Service rate μ (per server), in `mu_unit`.
    pub mu: f64,

    /// Server count, required for `mms`.
    #[serde(default)]
    pub servers: Option<u32>,

    /// Customer count for `Pn`, `mm1` only. Read as a number so that a
    /// negative or fractional entry fails this scenario, not the file.
    #[serde(default)]
    pub n: Option<f64>,

    /// Time base of `lambda`.
    #[serde(default)]
    pub lambda_unit: RateUnit,

    /// Time base of `mu`.
    #[serde(default)]
    pub mu_unit: RateUnit,
}

impl Scenario {
    /// Create a builder for a named scenario.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder::new(name)
    }

    fn validate_semantic(&self) -> QueueResult<()> {
        match self.model {
            ModelSpec::Mm1 if self.servers.is_some_and(|s| s != 1) => {
                Err(QueueError::config(format!(
                    "scenario '{}': mm1 has exactly one server; use model: mms",
                    self.name
                )))
            }
            ModelSpec::Mms if self.servers.is_none() => Err(QueueError::config(format!(
                "scenario '{}': mms requires 'servers'",
                self.name
            ))),
            ModelSpec::Mms if self.n.is_some() => Err(QueueError::config(format!(
                "scenario '{}': 'n' is only supported for mm1",
                self.name
            ))),
            _ => Ok(()),
        }
    }

    /// Rates with their time bases.
    #[must_use]
    pub const fn input(&self) -> QueueInput {
        QueueInput::new(
            Rate {
                value: self.lambda,
                unit: self.lambda_unit,
            },
            Rate {
                value: self.mu,
                unit: self.mu_unit,
            },
        )
    }

    /// Arrival rate in events per hour.
    #[must_use]
    pub fn lambda_per_hour(&self) -> f64 {
        self.input().rates_per_hour().0
    }

    /// Service rate in events per hour.
    #[must_use]
    pub fn mu_per_hour(&self) -> f64 {
        self.input().rates_per_hour().1
    }

    /// Validated customer count for `Pn`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `n` is negative or not an integer.
    pub fn customer_count(&self) -> QueueResult<Option<u32>> {
        self.n.map(customer_count).transpose()
    }

    /// Evaluate this scenario with per-hour rates.
    ///
    /// # Errors
    ///
    /// Propagates model errors and invalid `n`; returns `Config` if an `mms`
    /// scenario has no server count.
    pub fn evaluate(&self) -> QueueResult<QueueMetrics> {
        self.evaluate_with(self.customer_count()?)
    }

    fn evaluate_with(&self, n: Option<u32>) -> QueueResult<QueueMetrics> {
        let input = self.input();
        match self.model {
            ModelSpec::Mm1 => input.single_server(n),
            ModelSpec::Mms => {
                let servers = self.servers.ok_or_else(|| {
                    QueueError::config(format!("scenario '{}': mms requires 'servers'", self.name))
                })?;
                input.multi_server(servers)
            }
        }
    }
}

/// Programmatic construction of a [`Scenario`].
#[derive(Debug)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            scenario: Scenario {
                name: name.into(),
                model: ModelSpec::Mm1,
                lambda: 0.0,
                mu: 0.0,
                servers: None,
                n: None,
                lambda_unit: RateUnit::PerHour,
                mu_unit: RateUnit::PerHour,
            },
        }
    }

    /// Set arrival and service rates.
    #[must_use]
    pub const fn rates(mut self, lambda: f64, mu: f64) -> Self {
        self.scenario.lambda = lambda;
        self.scenario.mu = mu;
        self
    }

    /// Use the multi-server model with `servers` servers.
    #[must_use]
    pub const fn servers(mut self, servers: u32) -> Self {
        self.scenario.model = ModelSpec::Mms;
        self.scenario.servers = Some(servers);
        self
    }

    /// Request `Pn` for this customer count.
    #[must_use]
    pub fn n(mut self, n: u32) -> Self {
        self.scenario.n = Some(f64::from(n));
        self
    }

    /// Set the time base of λ.
    #[must_use]
    pub const fn lambda_unit(mut self, unit: RateUnit) -> Self {
        self.scenario.lambda_unit = unit;
        self
    }

    /// Set the time base of μ.
    #[must_use]
    pub const fn mu_unit(mut self, unit: RateUnit) -> Self {
        self.scenario.mu_unit = unit;
        self
    }

    /// Build the scenario.
    #[must_use]
    pub fn build(self) -> Scenario {
        self.scenario
    }
}

/// Result of evaluating one scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Model evaluated.
    pub model: ModelSpec,
    /// Customer count `Pn` was evaluated for, if requested and valid.
    pub n: Option<u32>,
    /// Metrics or the reason none exist.
    pub result: QueueResult<QueueMetrics>,
}

impl ScenarioOutcome {
    /// Whether the scenario produced metrics.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// JSON report entry: `{"name", "model", "metrics"}` or `{"name", "model", "error"}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match &self.result {
            Ok(metrics) => serde_json::json!({
                "name": self.name,
                "model": self.model,
                "metrics": metrics,
            }),
            Err(e) => serde_json::json!({
                "name": self.name,
                "model": self.model,
                "error": e.to_string(),
            }),
        }
    }
}
