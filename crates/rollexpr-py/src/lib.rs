// ABOUTME: Python bindings for the rollexpr library using PyO3.
// ABOUTME: Exposes roll and render functions to Python.

use ::rollexpr as core;
use ::rollexpr::{FastRng, RollOutcome, Value};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Result of rolling a dice expression.
#[pyclass]
#[derive(Clone)]
pub struct RollResult {
    #[pyo3(get)]
    pub expression: String,
    #[pyo3(get)]
    pub rolls: String,
    #[pyo3(get)]
    pub values: Vec<f64>,
    #[pyo3(get)]
    pub is_list: bool,
    report: String,
}

#[pymethods]
impl RollResult {
    fn __repr__(&self) -> String {
        format!(
            "RollResult(expression={:?}, rolls={:?}, values={:?})",
            self.expression, self.rolls, self.values
        )
    }

    fn __str__(&self) -> String {
        self.report.clone()
    }
}

impl From<RollOutcome> for RollResult {
    fn from(outcome: RollOutcome) -> Self {
        Self {
            report: outcome.to_string(),
            values: outcome.value.to_f64s(),
            is_list: matches!(outcome.value, Value::List(_)),
            expression: outcome.expression,
            rolls: outcome.rolls,
        }
    }
}

/// Roll dice using the given expression.
///
/// Args:
///     expr: A dice expression like "2d6 + 4" or "d20, d20"
///     seed: Optional seed for reproducible rolls
///
/// Returns:
///     RollResult with the rendered formula, the rolls, and the values
///
/// Example:
///     >>> result = roll("2d6 + 4")
///     >>> print(result.rolls)
///     2d6:(3, 5) + 4
///     >>> print(result.values)
///     [12.0]
#[pyfunction]
#[pyo3(signature = (expr, seed=None))]
fn roll(expr: &str, seed: Option<u64>) -> PyResult<RollResult> {
    let mut rng = match seed {
        Some(seed) => FastRng::with_seed(seed),
        None => FastRng::new(),
    };
    core::roll_with_rng(expr, &mut rng)
        .map(RollResult::from)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Parse an expression and render it back without rolling.
///
/// Example:
///     >>> render("1+2*3")
///     '1 + 2x3'
#[pyfunction]
fn render(expr: &str) -> PyResult<String> {
    core::parse(expr)
        .map(|parsed| parsed.to_string())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Python module for rollexpr.
#[pymodule]
fn rollexpr(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(roll, m)?)?;
    m.add_function(wrap_pyfunction!(render, m)?)?;
    m.add_class::<RollResult>()?;
    Ok(())
}
