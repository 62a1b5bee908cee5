//! Governing equation metadata shared by the queueing models.
//!
//! Each model documents the closed-form equations it evaluates, the
//! variables involved with their domains, and a literature citation. The
//! [`GoverningEquation`] trait also lets callers check a set of observed
//! values against the model.

use std::fmt;

/// A variable in a governing equation with its metadata.
#[derive(Debug, Clone)]
pub struct EquationVariable {
    /// Symbol used in the equation (e.g., "λ", "μ", "s")
    pub symbol: String,
    /// Human-readable name
    pub name: String,
    /// Units (e.g., "customers/hour")
    pub units: String,
    /// Description of what this variable represents
    pub description: String,
    /// Valid range constraints
    pub constraints: Option<VariableConstraints>,
}

/// Constraints on variable values.
#[derive(Debug, Clone)]
pub struct VariableConstraints {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (exclusive for utilization, inclusive otherwise)
    pub max: Option<f64>,
    /// Must be strictly positive
    pub positive: bool,
    /// Must be an integer
    pub integer: bool,
}

impl VariableConstraints {
    /// Strictly positive real.
    #[must_use]
    pub const fn positive_real() -> Self {
        Self {
            min: None,
            max: None,
            positive: true,
            integer: false,
        }
    }

    /// Integer with a lower bound.
    #[must_use]
    pub const fn integer_at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            positive: false,
            integer: true,
        }
    }

    /// Check a value against the constraints.
    #[must_use]
    pub fn admits(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        if self.positive && value <= 0.0 {
            return false;
        }
        if self.integer && value.fract() != 0.0 {
            return false;
        }
        if self.min.is_some_and(|min| value < min) {
            return false;
        }
        !self.max.is_some_and(|max| value > max)
    }
}

impl EquationVariable {
    /// Create a new equation variable.
    #[must_use]
    pub fn new(symbol: &str, name: &str, units: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            units: units.to_string(),
            description: String::new(),
            constraints: None,
        }
    }

    /// Add a description.
    #[must_use]
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Add constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: VariableConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }
}

/// A citation for the governing equation's source.
#[derive(Debug, Clone)]
pub struct Citation {
    /// List of author names
    pub authors: Vec<String>,
    /// Publication title
    pub title: String,
    /// Journal, publisher or conference name
    pub venue: String,
    /// Publication year
    pub year: u32,
    /// DOI if available
    pub doi: Option<String>,
}

impl Citation {
    /// Create a new citation.
    #[must_use]
    pub fn new(authors: &[&str], venue: &str, year: u32) -> Self {
        Self {
            authors: authors.iter().map(|s| (*s).to_string()).collect(),
            title: String::new(),
            venue: venue.to_string(),
            year,
            doi: None,
        }
    }

    /// Add the publication title.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Add DOI.
    #[must_use]
    pub fn with_doi(mut self, doi: &str) -> Self {
        self.doi = Some(doi.to_string());
        self
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authors = self.authors.join(", ");
        write!(
            f,
            "{authors} ({}) \"{}\", {}",
            self.year, self.title, self.venue
        )?;
        if let Some(ref doi) = self.doi {
            write!(f, ", doi:{doi}")?;
        }
        Ok(())
    }
}

/// Trait for the closed-form equations behind a queueing model.
pub trait GoverningEquation {
    /// Get the LaTeX representation of the equation set.
    fn latex(&self) -> &str;

    /// Get the primary citation for this equation.
    fn citation(&self) -> Citation;

    /// Get all input variables of this equation.
    fn variables(&self) -> Vec<EquationVariable>;

    /// Get a human-readable description.
    fn description(&self) -> &str;

    /// Get the equation name.
    fn name(&self) -> &'static str;

    /// Validate that a set of named values satisfies the equation within a
    /// relative tolerance.
    ///
    /// # Errors
    /// Returns error message if the values don't satisfy the equation within tolerance.
    fn validate_consistency(&self, values: &[(&str, f64)], tolerance: f64) -> Result<(), String>;
}

/// Look up a named value in a consistency-check slice.
pub(crate) fn lookup(values: &[(&str, f64)], name: &str) -> Result<f64, String> {
    values
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
        .ok_or_else(|| format!("missing value for '{name}'"))
}

/// Relative difference between an observed and an expected value.
pub(crate) fn relative_error(observed: f64, expected: f64) -> f64 {
    if expected.abs() > f64::EPSILON {
        (observed - expected).abs() / expected.abs()
    } else {
        (observed - expected).abs()
    }
}
