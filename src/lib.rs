//! # queuecalc
//!
//! Steady-state performance metrics for Markovian queues.
//!
//! Two pure functions form the core:
//! - [`single_server_metrics`]: M/M/1 (one server)
//! - [`multi_server_metrics`]: M/M/S (`s` identical servers, Erlang C)
//!
//! Both validate their inputs first and return a typed [`QueueError`] for
//! out-of-domain input or an unstable system (ρ ≥ 1); they never produce
//! negative or infinite waiting times.
//!
//! ## Example
//!
//! ```rust
//! use queuecalc::prelude::*;
//!
//! let m = single_server_metrics(9.0, 12.0, None)?;
//! assert!((m[Metric::Rho] - 0.75).abs() < 1e-12);
//! assert!((m[Metric::Wq] - 0.25).abs() < 1e-12);
//!
//! let err = multi_server_metrics(1.0, 1.0, 0).unwrap_err();
//! assert!(matches!(err, QueueError::InvalidArgument { .. }));
//! # Ok::<(), QueueError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Formulas are written as published
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod equation;
pub mod error;
pub mod laws;
pub mod metrics;
pub mod models;
pub mod params;
pub mod units;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ModelSpec, Scenario, ScenarioFile, ScenarioOutcome};
    pub use crate::equation::GoverningEquation;
    pub use crate::error::{ModelKind, QueueError, QueueResult};
    pub use crate::laws::LittlesLaw;
    pub use crate::metrics::{Metric, QueueMetrics};
    pub use crate::models::{
        erlang_c, multi_server_metrics, single_server_metrics, Mm1Params, MmsParams,
        MultiServerQueue, QueueInput, SingleServerQueue,
    };
    pub use crate::units::{Rate, RateUnit};
}

/// Re-export for public API
pub use error::{QueueError, QueueResult};
pub use metrics::{Metric, QueueMetrics};
pub use models::{multi_server_metrics, single_server_metrics};
