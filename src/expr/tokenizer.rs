use crate::expr::{Constant, Function, Operator, ParseError, Token};
use log::debug;

/// Raw scan output. The exponent marker only exists between the character
/// scan and the folding pass; it never leaves the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RawToken {
    Token(Token),
    ExpMarker,
}

pub struct Tokenizer;

impl Tokenizer {
    /// Turns an expression string into a token sequence.
    ///
    /// Runs three passes: a left-to-right character scan, a pass merging
    /// unary minus into the numeric literal that follows it, and a pass
    /// folding `<number> exp <number>` into a single number.
    ///
    /// `previous_answer` is substituted wherever the input says `ans`;
    /// tokenizing fails if `ans` appears and no answer was supplied.
    pub fn tokenize(
        input: &str,
        previous_answer: Option<f64>,
    ) -> Result<Vec<Token>, ParseError> {
        debug!("tokenizing: {input:?}");
        let raw = Self::scan(input, previous_answer)?;
        let raw = Self::merge_negative_numbers(raw);
        let tokens = Self::fold_exponents(raw)?;
        debug!("tokens: {tokens:?}");
        Ok(tokens)
    }

    fn scan(input: &str, previous_answer: Option<f64>) -> Result<Vec<RawToken>, ParseError> {
        let chars: Vec<char> = input.chars().collect();
        let mut out = Vec::new();
        let mut number = String::new();

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() || c == '.' {
                number.push(c);
                i += 1;
            } else if c.is_whitespace() {
                Self::flush_number(&mut number, &mut out)?;
                i += 1;
            } else if c == '(' {
                Self::flush_number(&mut number, &mut out)?;
                out.push(RawToken::Token(Token::OpenParen));
                i += 1;
            } else if c == ')' {
                Self::flush_number(&mut number, &mut out)?;
                out.push(RawToken::Token(Token::CloseParen));
                i += 1;
            } else if c == ',' {
                Self::flush_number(&mut number, &mut out)?;
                out.push(RawToken::Token(Token::ArgSeparator));
                i += 1;
            } else if let Ok(op) = Operator::try_from(c) {
                Self::flush_number(&mut number, &mut out)?;
                out.push(RawToken::Token(Token::Operator(op)));
                i += 1;
            } else if c.is_ascii_alphabetic() {
                Self::flush_number(&mut number, &mut out)?;
                i = Self::scan_name(&chars, i, previous_answer, &mut out)?;
            } else {
                return Err(ParseError::InvalidCharacter(c));
            }
        }
        Self::flush_number(&mut number, &mut out)?;
        Ok(out)
    }

    /// Greedy longest-match scan over a run of letters, case-insensitive.
    ///
    /// The candidate name grows one letter at a time and the scan stops at
    /// the first known function, constant, `exp` or `ans`. One exception: a
    /// lone `e` followed by `x` keeps scanning, so `exp` is never misread
    /// as the constant e.
    fn scan_name(
        chars: &[char],
        start: usize,
        previous_answer: Option<f64>,
        out: &mut Vec<RawToken>,
    ) -> Result<usize, ParseError> {
        let mut name = String::new();
        let mut i = start;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            name.push(chars[i].to_ascii_lowercase());
            i += 1;

            if name == "e" && chars.get(i).map(|c| c.to_ascii_lowercase()) == Some('x') {
                continue;
            }
            if name == "exp" {
                out.push(RawToken::ExpMarker);
                return Ok(i);
            }
            if name == "ans" {
                let answer = previous_answer.ok_or(ParseError::NoPreviousAnswer)?;
                out.push(RawToken::Token(Token::Number(answer)));
                return Ok(i);
            }
            if let Ok(function) = Function::try_from(name.as_str()) {
                out.push(RawToken::Token(Token::Function(function)));
                return Ok(i);
            }
            if let Ok(constant) = Constant::try_from(name.as_str()) {
                out.push(RawToken::Token(Token::Constant(constant)));
                return Ok(i);
            }
        }
        Err(ParseError::UnrecognizedToken(name))
    }

    fn flush_number(buffer: &mut String, out: &mut Vec<RawToken>) -> Result<(), ParseError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let value: f64 = buffer
            .parse()
            .map_err(|_| ParseError::InvalidNumber(buffer.clone()))?;
        if !value.is_finite() {
            return Err(ParseError::InvalidNumber(buffer.clone()));
        }
        out.push(RawToken::Token(Token::Number(value)));
        buffer.clear();
        Ok(())
    }

    /// Reinterprets `-` as the sign of the numeric literal that follows it
    /// when it cannot be binary subtraction: at the start of the input, or
    /// after an operator, an open paren, an argument separator, or the
    /// exponent marker.
    fn merge_negative_numbers(raw: Vec<RawToken>) -> Vec<RawToken> {
        let mut out: Vec<RawToken> = Vec::with_capacity(raw.len());
        let mut iter = raw.into_iter().peekable();
        while let Some(token) = iter.next() {
            let is_minus = token == RawToken::Token(Token::Operator(Operator::Subtract));
            let unary_position = matches!(
                out.last(),
                None | Some(RawToken::ExpMarker)
                    | Some(RawToken::Token(Token::Operator(_)))
                    | Some(RawToken::Token(Token::OpenParen))
                    | Some(RawToken::Token(Token::ArgSeparator))
            );
            if is_minus && unary_position {
                if let Some(&RawToken::Token(Token::Number(value))) = iter.peek() {
                    iter.next();
                    out.push(RawToken::Token(Token::Number(-value)));
                    continue;
                }
            }
            out.push(token);
        }
        out
    }

    /// Folds `<mantissa> exp <exponent>` into `mantissa * 10^exponent`.
    /// Both neighbors must already be numbers; the exponent may have been
    /// negative-merged by the previous pass.
    fn fold_exponents(raw: Vec<RawToken>) -> Result<Vec<Token>, ParseError> {
        let mut out: Vec<Token> = Vec::with_capacity(raw.len());
        let mut iter = raw.into_iter();
        while let Some(token) = iter.next() {
            match token {
                RawToken::ExpMarker => {
                    let mantissa = match out.pop() {
                        Some(Token::Number(value)) => value,
                        _ => return Err(ParseError::MalformedExponent),
                    };
                    let exponent = match iter.next() {
                        Some(RawToken::Token(Token::Number(value))) => value,
                        _ => return Err(ParseError::MalformedExponent),
                    };
                    let folded = mantissa * 10f64.powf(exponent);
                    if !folded.is_finite() {
                        return Err(ParseError::MalformedExponent);
                    }
                    out.push(Token::Number(folded));
                }
                RawToken::Token(t) => out.push(t),
            }
        }
        Ok(out)
    }
}
