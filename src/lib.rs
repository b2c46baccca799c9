pub mod calculator;
pub mod expr;

pub use calculator::{Calculator, Error};

/// Evaluates a single expression string against an optional previous answer.
pub fn evaluate_expression(input: &str, previous_answer: Option<f64>) -> Result<f64, Error> {
    let mut calculator = Calculator::new(1);
    calculator.evaluate(input, previous_answer)
}
