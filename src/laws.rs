//! Little's Law, the identity every stable queue satisfies.

use crate::equation::{relative_error, Citation, EquationVariable, GoverningEquation, VariableConstraints};

/// Little's Law: `L = λW`.
///
/// - L: Average number of customers in the system (or queue)
/// - λ: Average arrival rate
/// - W: Average time a customer spends in the system (or queue)
///
/// Holds for any stable queue regardless of arrival distribution, service
/// distribution or discipline, so both model formula sets must satisfy it.
#[derive(Debug, Clone)]
pub struct LittlesLaw {
    latex: String,
    description: String,
}

impl LittlesLaw {
    /// Create a new Little's Law equation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latex: r"L = \lambda W".to_string(),
            description: "Little's Law relates the average number of customers in a stable \
                          system (L) to the arrival rate (λ) and the average time spent (W)."
                .to_string(),
        }
    }

    /// Evaluate L = λW.
    #[must_use]
    pub fn evaluate(&self, lambda: f64, w: f64) -> f64 {
        lambda * w
    }

    /// Validate that observed values satisfy Little's Law within tolerance.
    ///
    /// # Errors
    /// Returns error message if `|L - λW| / λW > tolerance`.
    pub fn validate(&self, l: f64, lambda: f64, w: f64, tolerance: f64) -> Result<(), String> {
        let expected = self.evaluate(lambda, w);
        let err = relative_error(l, expected);

        if err <= tolerance {
            Ok(())
        } else {
            Err(format!(
                "Little's Law violation: L={l:.6}, λW={expected:.6}, relative_error={err:.6} > tolerance={tolerance:.6}"
            ))
        }
    }
}

impl Default for LittlesLaw {
    fn default() -> Self {
        Self::new()
    }
}

impl GoverningEquation for LittlesLaw {
    fn latex(&self) -> &str {
        &self.latex
    }

    fn citation(&self) -> Citation {
        Citation::new(&["Little, J.D.C."], "Operations Research", 1961)
            .with_title("A Proof for the Queuing Formula: L = λW")
            .with_doi("10.1287/opre.9.3.383")
    }

    fn variables(&self) -> Vec<EquationVariable> {
        vec![
            EquationVariable::new("L", "wip", "customers")
                .with_description("Average number of customers present"),
            EquationVariable::new("λ", "arrival_rate", "customers/time")
                .with_description("Average arrival rate")
                .with_constraints(VariableConstraints::positive_real()),
            EquationVariable::new("W", "sojourn_time", "time")
                .with_description("Average time a customer spends"),
        ]
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn name(&self) -> &'static str {
        "Little's Law"
    }

    fn validate_consistency(&self, values: &[(&str, f64)], tolerance: f64) -> Result<(), String> {
        let l = crate::equation::lookup(values, "L")?;
        let lambda = crate::equation::lookup(values, "λ")?;
        let w = crate::equation::lookup(values, "W")?;
        self.validate(l, lambda, w, tolerance)
    }
}
