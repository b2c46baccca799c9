use crate::expr::{EvalError, Token};
use log::debug;

/// Evaluates a postfix token sequence over a transient value stack.
///
/// Each operator or function pops exactly its arity; for binary operations
/// the second value popped is the left-hand operand, so operands apply in
/// the order they appeared in the source expression. An empty sequence
/// evaluates to zero.
pub fn evaluate_postfix(tokens: &[Token]) -> Result<f64, EvalError> {
    if tokens.is_empty() {
        return Ok(0.0);
    }

    let mut stack: Vec<f64> = Vec::new();
    for token in tokens {
        match token {
            Token::Number(value) => stack.push(*value),
            Token::Constant(constant) => stack.push(constant.value()),
            Token::Operator(op) => {
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (right, left),
                    _ => return Err(EvalError::TooFewOperands),
                };
                stack.push(op.apply(left, right));
            }
            Token::Function(function) => {
                let arity = function.arity();
                if stack.len() < arity {
                    return Err(EvalError::TooFewOperands);
                }
                let args = stack.split_off(stack.len() - arity);
                stack.push(function.apply(&args)?);
            }
            // Brackets and separators never survive conversion to postfix.
            Token::OpenParen | Token::CloseParen | Token::ArgSeparator => {
                return Err(EvalError::UnexpectedToken(*token));
            }
        }
    }

    if stack.len() > 1 {
        return Err(EvalError::TooManyOperands);
    }
    let result = stack.pop().ok_or(EvalError::TooFewOperands)?;
    debug!("postfix result: {result}");
    Ok(result)
}
