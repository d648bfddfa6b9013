use crate::evaluator;
use crate::evaluator::error::EvaluateError;
use std::f64::consts;
use thiserror::Error;

/// Scale factor keeping ten fractional digits when rounding a result for
/// display.
const DISPLAY_PRECISION: f64 = 10_000_000_000.0;

/// Largest input whose factorial still fits in an `f64`.
const FACTORIAL_LIMIT: f64 = 170.0;

/// A failure raised by a calculator session operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Evaluate(#[from] EvaluateError),
    /// The computation produced infinity or NaN.
    #[error("result is not a finite number")]
    NonFiniteResult,
    /// A function was applied outside its domain.
    #[error("{0}")]
    InvalidInput(String),
}

impl SessionError {
    fn invalid_input(reason: impl Into<String>) -> Self {
        SessionError::InvalidInput(reason.into())
    }
}

/// A stateful calculator session owned by the presentation layer.
///
/// The session accumulates the expression as a buffer of pushed entries
/// (an entry may be a multi-character unit such as `**` or an inserted
/// constant) and drives the stateless expression evaluator. Evaluating
/// replaces the buffer with the formatted result, so the result seeds the
/// next computation.
#[derive(Debug, Default)]
pub struct Calculator {
    entries: Vec<String>,
}

impl Calculator {
    pub fn new() -> Self {
        Calculator::default()
    }

    /// The accumulated expression, as typed.
    pub fn expression(&self) -> String {
        self.entries.concat()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pushes one entry onto the expression buffer. No validation happens
    /// here; the evaluator reports malformed input when the expression is
    /// evaluated.
    pub fn append(&mut self, value: &str) {
        self.entries.push(value.to_string());
    }

    /// Removes the most recently pushed entry.
    pub fn backspace(&mut self) {
        self.entries.pop();
    }

    /// Pushes the decimal expansion of π.
    pub fn append_pi(&mut self) {
        self.entries.push(consts::PI.to_string());
    }

    /// Pushes the decimal expansion of e.
    pub fn append_e(&mut self) {
        self.entries.push(consts::E.to_string());
    }

    /// Evaluates the accumulated expression.
    ///
    /// An empty buffer is a no-op returning `None`. Otherwise the result
    /// is rounded for display, replaces the buffer one character per
    /// entry and is returned. Non-finite results are rejected before they
    /// reach the display.
    pub fn evaluate(&mut self) -> Result<Option<f64>, SessionError> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        let result = evaluator::evaluate(self.expression())?;
        let displayed = self.display_result(result)?;
        Ok(Some(displayed))
    }

    /// Squares the current value.
    pub fn square(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(value * value))
    }

    pub fn square_root(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| {
            if value < 0.0 {
                return Err(SessionError::invalid_input(
                    "square root of a negative number",
                ));
            }
            Ok(value.sqrt())
        })
    }

    /// 10 raised to the current value.
    pub fn ten_power(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(10f64.powf(value)))
    }

    pub fn reciprocal(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| {
            if value == 0.0 {
                return Err(EvaluateError::DivisionByZero.into());
            }
            Ok(1.0 / value)
        })
    }

    pub fn absolute(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(value.abs()))
    }

    pub fn factorial(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| {
            if value < 0.0 || value.fract() != 0.0 {
                return Err(SessionError::invalid_input(
                    "factorial requires a non-negative integer",
                ));
            }
            if value > FACTORIAL_LIMIT {
                return Err(SessionError::invalid_input("factorial input too large"));
            }
            let mut product = 1.0;
            for factor in 2..=(value as u64) {
                product *= factor as f64;
            }
            Ok(product)
        })
    }

    /// e raised to the current value.
    pub fn exponential(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(value.exp()))
    }

    /// Base-10 logarithm of the current value.
    pub fn logarithm(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| {
            if value <= 0.0 {
                return Err(SessionError::invalid_input(
                    "logarithm requires a positive number",
                ));
            }
            Ok(value.log10())
        })
    }

    /// Natural logarithm of the current value.
    pub fn natural_log(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| {
            if value <= 0.0 {
                return Err(SessionError::invalid_input(
                    "logarithm requires a positive number",
                ));
            }
            Ok(value.ln())
        })
    }

    /// Sine of the current value, in degrees.
    pub fn sine(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(value.to_radians().sin()))
    }

    /// Cosine of the current value, in degrees.
    pub fn cosine(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(value.to_radians().cos()))
    }

    /// Tangent of the current value, in degrees.
    pub fn tangent(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(value.to_radians().tan()))
    }

    pub fn toggle_sign(&mut self) -> Result<f64, SessionError> {
        self.apply_unary(|value| Ok(-value))
    }

    /// Evaluates the buffer, applies the operation to the value and shows
    /// the result.
    fn apply_unary(
        &mut self,
        operation: impl FnOnce(f64) -> Result<f64, SessionError>,
    ) -> Result<f64, SessionError> {
        let value = self.current_value()?;
        let result = operation(value)?;
        self.display_result(result)
    }

    /// The numeric value of the accumulated expression.
    fn current_value(&self) -> Result<f64, SessionError> {
        if self.entries.is_empty() {
            return Err(SessionError::invalid_input("no value to operate on"));
        }
        let value = evaluator::evaluate(self.expression())?;
        if !value.is_finite() {
            return Err(SessionError::NonFiniteResult);
        }
        Ok(value)
    }

    /// Rounds the result for display and replaces the buffer with it, one
    /// character per entry, mirroring how typed input arrives.
    fn display_result(&mut self, result: f64) -> Result<f64, SessionError> {
        if !result.is_finite() {
            return Err(SessionError::NonFiniteResult);
        }
        let rounded = round_for_display(result);
        self.entries = rounded.to_string().chars().map(String::from).collect();
        Ok(rounded)
    }
}

/// Formats a result the way the display shows it: rounded to ten
/// fractional digits, or `Error` for a non-finite value.
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return "Error".to_string();
    }
    round_for_display(value).to_string()
}

/// Rounds to ten fractional digits.
///
/// Scaling by 1e10 overflows to infinity for magnitudes above ~1.8e298;
/// such values are already displayed in full precision and are returned
/// unchanged.
fn round_for_display(value: f64) -> f64 {
    let scaled = value * DISPLAY_PRECISION;
    if scaled.is_finite() {
        scaled.round() / DISPLAY_PRECISION
    } else {
        value
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn calculator_with(expression: &str) -> Calculator {
        let mut calculator = Calculator::new();
        calculator.append(expression);
        calculator
    }

    #[test]
    fn appended_entries_join_into_the_expression() {
        let mut calculator = Calculator::new();

        calculator.append("2");
        calculator.append("+");
        calculator.append("3");

        assert_eq!(calculator.expression(), "2+3");
    }

    #[test]
    fn backspace_removes_the_last_entry() {
        let mut calculator = Calculator::new();

        calculator.append("2");
        calculator.append("**");
        calculator.backspace();

        assert_eq!(calculator.expression(), "2");
    }

    #[test]
    fn clear_empties_the_expression() {
        let mut calculator = calculator_with("2+3");

        calculator.clear();

        assert!(calculator.is_empty());
    }

    #[test]
    fn evaluating_replaces_the_buffer_with_the_result() {
        let mut calculator = calculator_with("2+3*4");

        let result = calculator.evaluate().unwrap();

        assert_eq!(result, Some(14.0));
        assert_eq!(calculator.expression(), "14");
    }

    #[test]
    fn evaluating_an_empty_buffer_is_a_no_op() {
        let mut calculator = Calculator::new();

        let result = calculator.evaluate().unwrap();

        assert_eq!(result, None);
        assert!(calculator.is_empty());
    }

    #[test]
    fn a_result_seeds_the_next_computation() {
        let mut calculator = calculator_with("2+3");

        calculator.evaluate().unwrap();
        calculator.append("+5");
        let result = calculator.evaluate().unwrap();

        assert_eq!(result, Some(10.0));
    }

    #[test]
    fn backspace_after_evaluation_removes_one_character() {
        let mut calculator = calculator_with("10+15");

        calculator.evaluate().unwrap();
        calculator.backspace();

        assert_eq!(calculator.expression(), "2");
    }

    #[test]
    fn results_are_rounded_to_ten_fractional_digits() {
        let mut calculator = calculator_with("0.1+0.2");

        let result = calculator.evaluate().unwrap();

        assert_eq!(result, Some(0.3));
        assert_eq!(calculator.expression(), "0.3");
    }

    #[test]
    fn malformed_expressions_are_reported() {
        let mut calculator = calculator_with("(2+3");

        let error = calculator.evaluate().unwrap_err();

        assert!(matches!(
            error,
            SessionError::Evaluate(EvaluateError::MalformedExpression(_))
        ));
    }

    #[test]
    fn division_by_zero_is_reported() {
        let mut calculator = calculator_with("5/0");

        let error = calculator.evaluate().unwrap_err();

        assert_eq!(
            error,
            SessionError::Evaluate(EvaluateError::DivisionByZero)
        );
    }

    #[test]
    fn non_finite_results_are_rejected() {
        let mut calculator = calculator_with("10%0");

        let error = calculator.evaluate().unwrap_err();

        assert_eq!(error, SessionError::NonFiniteResult);
    }

    #[test]
    fn overflowing_exponentiation_is_rejected() {
        let mut calculator = calculator_with("10**10000");

        let error = calculator.evaluate().unwrap_err();

        assert_eq!(error, SessionError::NonFiniteResult);
    }

    #[test]
    fn square_replaces_the_value() {
        let mut calculator = calculator_with("3+4");

        let result = calculator.square().unwrap();

        assert_eq!(result, 49.0);
        assert_eq!(calculator.expression(), "49");
    }

    #[test]
    fn square_root_of_a_negative_value_is_rejected() {
        let mut calculator = calculator_with("3-5");

        let error = calculator.square_root().unwrap_err();

        assert!(matches!(error, SessionError::InvalidInput(_)));
    }

    #[test]
    fn reciprocal_of_zero_is_division_by_zero() {
        let mut calculator = calculator_with("0");

        let error = calculator.reciprocal().unwrap_err();

        assert_eq!(
            error,
            SessionError::Evaluate(EvaluateError::DivisionByZero)
        );
    }

    #[test]
    fn factorial_of_a_small_integer() {
        let mut calculator = calculator_with("5");

        let result = calculator.factorial().unwrap();

        assert_eq!(result, 120.0);
    }

    #[test]
    fn factorial_of_zero_is_one() {
        let mut calculator = calculator_with("0");

        assert_eq!(calculator.factorial().unwrap(), 1.0);
    }

    #[test]
    fn factorial_of_a_fraction_is_rejected() {
        let mut calculator = calculator_with("2.5");

        let error = calculator.factorial().unwrap_err();

        assert!(matches!(error, SessionError::InvalidInput(_)));
    }

    #[test]
    fn factorial_beyond_the_limit_is_rejected() {
        let mut calculator = calculator_with("171");

        let error = calculator.factorial().unwrap_err();

        assert!(matches!(error, SessionError::InvalidInput(_)));
    }

    #[test]
    fn trigonometry_works_in_degrees() {
        let mut calculator = calculator_with("30");

        let result = calculator.sine().unwrap();

        assert_eq!(result, 0.5);
    }

    #[test]
    fn cosine_of_sixty_degrees() {
        let mut calculator = calculator_with("60");

        assert_eq!(calculator.cosine().unwrap(), 0.5);
    }

    #[test]
    fn toggle_sign_negates_the_value() {
        let mut calculator = calculator_with("7");

        let result = calculator.toggle_sign().unwrap();

        assert_eq!(result, -7.0);
        assert_eq!(calculator.expression(), "-7");
    }

    #[test]
    fn logarithm_of_a_non_positive_value_is_rejected() {
        let mut calculator = calculator_with("0");

        let error = calculator.logarithm().unwrap_err();

        assert!(matches!(error, SessionError::InvalidInput(_)));
    }

    #[test]
    fn ten_power_of_two_is_a_hundred() {
        let mut calculator = calculator_with("2");

        assert_eq!(calculator.ten_power().unwrap(), 100.0);
    }

    #[test]
    fn inserted_pi_evaluates() {
        let mut calculator = Calculator::new();

        calculator.append_pi();
        let result = calculator.evaluate().unwrap().unwrap();

        assert_eq!(result, 3.1415926536);
    }

    #[test]
    fn applying_a_function_to_an_empty_buffer_is_rejected() {
        let mut calculator = Calculator::new();

        let error = calculator.square().unwrap_err();

        assert!(matches!(error, SessionError::InvalidInput(_)));
    }

    #[test]
    fn formatting_rounds_and_rejects_non_finite_values() {
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(14.0), "14");
        assert_eq!(format_result(f64::INFINITY), "Error");
        assert_eq!(format_result(f64::NAN), "Error");
    }

    #[test]
    fn huge_values_skip_display_rounding() {
        let mut calculator = calculator_with("2**1000");
        let expected = evaluator::evaluate("2**1000".to_string()).unwrap();

        let result = calculator.evaluate().unwrap();

        assert_eq!(result, Some(expected));
    }
}
