//! Conversion of raw, user-entered values into typed model inputs.
//!
//! The model functions take `f64` rates and integer counts. Front ends that
//! read text fields or loosely typed files go through these helpers so that
//! non-numeric, negative or non-integral entries surface as
//! [`QueueError::InvalidArgument`] with the offending parameter named.

use crate::error::{QueueError, QueueResult};

/// Parse a rate from text.
///
/// # Errors
///
/// Returns `InvalidArgument` if the text is not a finite number.
pub fn parse_rate(parameter: &'static str, text: &str) -> QueueResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| QueueError::invalid_argument(parameter, trimmed, "not a number"))?;
    if !value.is_finite() {
        return Err(QueueError::invalid_argument(
            parameter,
            trimmed,
            "must be a finite number",
        ));
    }
    Ok(value)
}

/// Convert a real number to a non-negative integer count.
fn integral_count(parameter: &'static str, value: f64, min: u32) -> QueueResult<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(QueueError::invalid_argument(
            parameter,
            value,
            "must be an integer",
        ));
    }
    if value < f64::from(min) {
        let reason = if min == 0 {
            "must not be negative".to_string()
        } else {
            format!("must be at least {min}")
        };
        return Err(QueueError::invalid_argument(parameter, value, reason));
    }
    if value > f64::from(u32::MAX) {
        return Err(QueueError::invalid_argument(parameter, value, "too large"));
    }
    Ok(value as u32)
}

/// Validate a customer count `n` for the `Pn` metric.
///
/// # Errors
///
/// Returns `InvalidArgument` if `value` is negative or not an integer.
pub fn customer_count(value: f64) -> QueueResult<u32> {
    integral_count("n", value, 0)
}

/// Validate a server count `s`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `value` is below 1 or not an integer.
pub fn server_count(value: f64) -> QueueResult<u32> {
    integral_count("s", value, 1)
}

/// Parse a customer count from text. Empty text means "not requested".
///
/// # Errors
///
/// Returns `InvalidArgument` for non-numeric, negative or non-integral text.
pub fn parse_customer_count(text: &str) -> QueueResult<Option<u32>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    customer_count(parse_rate("n", trimmed)?).map(Some)
}

/// Parse a server count from text.
///
/// # Errors
///
/// Returns `InvalidArgument` for non-numeric, non-positive or non-integral text.
pub fn parse_server_count(text: &str) -> QueueResult<u32> {
    server_count(parse_rate("s", text)?)
}
