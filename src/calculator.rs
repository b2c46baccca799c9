use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;
use thiserror::Error;

use crate::expr::{evaluate_postfix, to_postfix, EvalError, ParseError, Tokenizer};

/// User-facing failure categories. The messages are what the REPL prints.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Please enter a valid input!")]
    InvalidInput,
    #[error("Unmatched brackets in expression")]
    UnmatchedBrackets,
    #[error("Too few operands for the operators given")]
    TooFewOperands,
    #[error("Too many operands left over")]
    TooManyOperands,
    #[error("{0}")]
    DomainError(String),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnmatchedParen => Error::UnmatchedBrackets,
            _ => Error::InvalidInput,
        }
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::TooFewOperands => Error::TooFewOperands,
            EvalError::TooManyOperands => Error::TooManyOperands,
            EvalError::DomainError(reason) => Error::DomainError(reason),
            EvalError::UnexpectedToken(_) => Error::InvalidInput,
        }
    }
}

/// Orchestrates the tokenize, convert and evaluate stages for one input
/// string and keeps a small cache of recent results.
pub struct Calculator {
    cache: LruCache<(String, Option<u64>), f64>,
}

impl Calculator {
    /// Creates a new `Calculator` with a given maximum cache size.
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(max_cache_size).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Evaluates an expression string against an optional previous answer.
    ///
    /// # Arguments
    ///
    /// * `input` - The expression to evaluate.
    /// * `previous_answer` - The value substituted for `ans`, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` with the result rounded to 10 decimal places. The caller
    ///   should retain it as the previous answer for the next call.
    /// * `Err(Error)` naming the first stage failure.
    pub fn evaluate(&mut self, input: &str, previous_answer: Option<f64>) -> Result<f64, Error> {
        // The previous answer is part of the key: the same text means
        // something else under a different `ans`.
        let key = (input.to_string(), previous_answer.map(f64::to_bits));
        if let Some(value) = self.cache.get(&key) {
            debug!("cache hit for {input:?}");
            return Ok(*value);
        }

        let result = Self::evaluate_uncached(input, previous_answer)?;
        self.cache.put(key, result);
        Ok(result)
    }

    fn evaluate_uncached(input: &str, previous_answer: Option<f64>) -> Result<f64, Error> {
        let tokens = Tokenizer::tokenize(input, previous_answer)?;
        let postfix = to_postfix(&tokens)?;
        let value = evaluate_postfix(&postfix)?;
        Ok(round_result(value))
    }
}

/// Rounds to 10 decimal places to absorb floating-point noise from the
/// transcendental functions. Values too large to scale, infinities and NaN
/// pass through unchanged.
fn round_result(value: f64) -> f64 {
    const SCALE: f64 = 1e10;
    let scaled = value * SCALE;
    if scaled.is_finite() {
        scaled.round() / SCALE
    } else {
        value
    }
}
