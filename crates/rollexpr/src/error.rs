// ABOUTME: Error types for the rollexpr library.
// ABOUTME: Covers lexical, syntax, and arithmetic/roll errors.

use std::fmt;
use thiserror::Error;

/// A character that matched no token rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalChar {
    pub ch: char,
    pub pos: usize,
}

impl fmt::Display for IllegalChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal character '{}' at position {}", self.ch, self.pos)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", join_illegal(.0))]
    IllegalCharacters(Vec<IllegalChar>),

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Expected {expected}, found {found} at position {pos}")]
    Expected {
        expected: String,
        found: String,
        pos: usize,
    },

    #[error("Expression nested too deeply (max {0} levels)")]
    TooDeep(usize),

    #[error("Invalid dice count: {0}")]
    InvalidDiceCount(String),

    #[error("Invalid dice sides: {0}")]
    InvalidDiceSides(String),

    #[error("Too many dice (max {0} per roll)")]
    TooManyDice(u64),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow")]
    Overflow,

    #[error("A list cannot be used as an operand")]
    ListInArithmetic,
}

fn join_illegal(chars: &[IllegalChar]) -> String {
    chars
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
