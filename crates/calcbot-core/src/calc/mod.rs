//! Arithmetic expression evaluator.
//!
//! `+ - * /`, parentheses and decimal numbers, evaluated as `f64`:
//! tokenize → shunting-yard to postfix → operand stack.
//!
//! Everything here is pure and allocation-local; call it from any task.

mod error;
mod eval;
mod format;
mod parser;
mod token;

pub use error::EvalError;
pub use eval::evaluate_postfix;
pub use format::format_number;
pub use parser::to_postfix;
pub use token::{tokenize, Operator, Token};

/// Evaluate an infix expression and render the result for display.
pub fn evaluate(expression: &str) -> Result<String, EvalError> {
    evaluate_value(expression).map(format_number)
}

/// Evaluate an infix expression to its numeric value.
pub fn evaluate_value(expression: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    let postfix = to_postfix(tokens)?;
    evaluate_postfix(&postfix)
}
