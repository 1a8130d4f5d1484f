// ABOUTME: Lexer for dice expressions.
// ABOUTME: Lazily tokenizes strings like "2d6 + 4, d20" and records illegal characters.

use crate::error::IllegalChar;
use std::fmt;
use tracing::warn;

/// A token in the dice expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A non-negative integer literal.
    Integer(i64),
    /// The 'd' dice operator.
    D,
    /// Addition operator.
    Plus,
    /// Subtraction or unary minus.
    Minus,
    /// Multiplication operator, '*' or 'x'.
    Times,
    /// Division operator.
    Slash,
    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// List separator.
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "integer {}", n),
            Token::D => write!(f, "'d'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Times => write!(f, "multiplication operator"),
            Token::Slash => write!(f, "'/'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// A lexer for dice expressions.
///
/// The lexer is an iterator of [`Spanned`] tokens. Cloning it yields an
/// independent lexer positioned at the same point, so a token stream can be
/// restarted from any place. Characters that match no token are skipped and
/// recorded; see [`Lexer::errors`].
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    errors: Vec<IllegalChar>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            errors: Vec::new(),
        }
    }

    /// Illegal characters seen so far, in input order.
    pub fn errors(&self) -> &[IllegalChar] {
        &self.errors
    }

    /// Consume the lexer, returning the illegal characters it saw.
    pub fn into_errors(self) -> Vec<IllegalChar> {
        self.errors
    }

    fn next_token(&mut self) -> Option<Spanned> {
        loop {
            let &(pos, ch) = self.chars.peek()?;

            let token = match ch {
                ' ' | '\t' => {
                    self.chars.next();
                    continue;
                }
                '0'..='9' => return Some(Spanned { token: self.integer(), pos }),
                'd' => Token::D,
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' | 'x' => Token::Times,
                '/' => Token::Slash,
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                _ => {
                    warn!(character = %ch, pos, "illegal character, skipping");
                    self.errors.push(IllegalChar { ch, pos });
                    self.chars.next();
                    continue;
                }
            };

            self.chars.next();
            return Some(Spanned { token, pos });
        }
    }

    fn integer(&mut self) -> Token {
        let mut value: i64 = 0;

        while let Some(&(_, ch)) = self.chars.peek() {
            if let Some(digit) = ch.to_digit(10) {
                self.chars.next();
                value = value.saturating_mul(10).saturating_add(i64::from(digit));
            } else {
                break;
            }
        }

        Token::Integer(value)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Spanned;

    fn next(&mut self) -> Option<Spanned> {
        self.next_token()
    }
}

/// Tokenize an input string lazily.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}
