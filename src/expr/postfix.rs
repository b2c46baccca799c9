use crate::expr::{ParseError, Token};
use log::debug;

/// Converts an infix token sequence to postfix (reverse Polish) order.
///
/// Operators pop any stacked operator of equal or higher precedence before
/// being pushed, which makes every operator left-associative, `^` included.
/// Functions stay on the stack until their closing paren is reached, so
/// `sin ( x )` comes out as `x sin`. Bracket matching is validated as the
/// stack drains.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ParseError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) | Token::Constant(_) => output.push(*token),
            Token::Function(_) => stack.push(*token),
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(*token);
            }
            Token::OpenParen => stack.push(*token),
            Token::ArgSeparator => loop {
                match stack.pop() {
                    Some(Token::OpenParen) => {
                        stack.push(Token::OpenParen);
                        break;
                    }
                    Some(top) => output.push(top),
                    None => return Err(ParseError::UnmatchedParen),
                }
            },
            Token::CloseParen => {
                loop {
                    match stack.pop() {
                        Some(Token::OpenParen) => break,
                        Some(top) => output.push(top),
                        None => return Err(ParseError::UnmatchedParen),
                    }
                }
                if let Some(Token::Function(function)) = stack.last() {
                    output.push(Token::Function(*function));
                    stack.pop();
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top == Token::OpenParen {
            return Err(ParseError::UnmatchedParen);
        }
        output.push(top);
    }

    debug!("postfix: {output:?}");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Function, Operator, Tokenizer};

    fn postfix_of(input: &str) -> Result<Vec<Token>, ParseError> {
        to_postfix(&Tokenizer::tokenize(input, None).unwrap())
    }

    #[test]
    fn test_precedence_ordering() {
        assert_eq!(
            postfix_of("2+3*4").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Number(3.0),
                Token::Number(4.0),
                Token::Operator(Operator::Multiply),
                Token::Operator(Operator::Add),
            ]
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            postfix_of("(2+3)*4").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Number(3.0),
                Token::Operator(Operator::Add),
                Token::Number(4.0),
                Token::Operator(Operator::Multiply),
            ]
        );
    }

    #[test]
    fn test_equal_precedence_is_left_associative() {
        assert_eq!(
            postfix_of("10-3-4").unwrap(),
            vec![
                Token::Number(10.0),
                Token::Number(3.0),
                Token::Operator(Operator::Subtract),
                Token::Number(4.0),
                Token::Operator(Operator::Subtract),
            ]
        );
    }

    #[test]
    fn test_power_is_left_associative() {
        assert_eq!(
            postfix_of("2^3^2").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Number(3.0),
                Token::Operator(Operator::Power),
                Token::Number(2.0),
                Token::Operator(Operator::Power),
            ]
        );
    }

    #[test]
    fn test_modulo_binds_tightest() {
        assert_eq!(
            postfix_of("2*3%4").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Number(3.0),
                Token::Number(4.0),
                Token::Operator(Operator::Modulo),
                Token::Operator(Operator::Multiply),
            ]
        );
    }

    #[test]
    fn test_function_emitted_at_closing_paren() {
        assert_eq!(
            postfix_of("sin(2)").unwrap(),
            vec![Token::Number(2.0), Token::Function(Function::Sin)]
        );
    }

    #[test]
    fn test_binary_function_with_separator() {
        assert_eq!(
            postfix_of("root(27,3)").unwrap(),
            vec![
                Token::Number(27.0),
                Token::Number(3.0),
                Token::Function(Function::Root),
            ]
        );
    }

    #[test]
    fn test_separator_flushes_pending_operators() {
        assert_eq!(
            postfix_of("root(2^3,2)").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Number(3.0),
                Token::Operator(Operator::Power),
                Token::Number(2.0),
                Token::Function(Function::Root),
            ]
        );
    }

    #[test]
    fn test_nested_function_calls() {
        assert_eq!(
            postfix_of("sqrt(abs(0-16))").unwrap(),
            vec![
                Token::Number(0.0),
                Token::Number(16.0),
                Token::Operator(Operator::Subtract),
                Token::Function(Function::Abs),
                Token::Function(Function::Sqrt),
            ]
        );
    }

    #[test]
    fn test_unclosed_paren() {
        assert_eq!(postfix_of("(2+3"), Err(ParseError::UnmatchedParen));
    }

    #[test]
    fn test_stray_close_paren() {
        assert_eq!(postfix_of("2+3)"), Err(ParseError::UnmatchedParen));
    }

    #[test]
    fn test_separator_outside_call() {
        assert_eq!(postfix_of("2,3"), Err(ParseError::UnmatchedParen));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let first = postfix_of("sqrt(16)+root(27,3)*2^2").unwrap();
        let second = postfix_of("sqrt(16)+root(27,3)*2^2").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adjacent_values_pass_through() {
        // No operator between 2 and (3); conversion succeeds and leaves
        // two values for the evaluator to reject.
        assert_eq!(
            postfix_of("2(3)").unwrap(),
            vec![Token::Number(2.0), Token::Number(3.0)]
        );
    }
}
