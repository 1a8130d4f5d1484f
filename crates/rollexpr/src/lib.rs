// ABOUTME: Core library for parsing, rolling, and rendering dice expressions.
// ABOUTME: Shows both the formula and every die result alongside the total.

//! # rollexpr
//!
//! A dice expression language for tabletop games: arithmetic, `NdM` dice,
//! negation and comma-separated lists.
//!
//! ## Quick Start
//!
//! ```
//! use rollexpr::{roll_with_rng, FastRng};
//!
//! let mut rng = FastRng::with_seed(7);
//! let outcome = roll_with_rng("2d6 + 4", &mut rng).unwrap();
//! println!("{}", outcome);
//! // evaluating: 2d6 + 4
//! // rolls: 2d6:(3, 5) + 4
//! // 12
//! ```
//!
//! ## Supported Notation
//!
//! - Dice: `2d6`, `d20` (same as `1d20`)
//! - Arithmetic: `+`, `-`, `*` or `x`, `/` (true division), parentheses
//! - Unary minus: `-d6`, `2 - -1`
//! - Lists: `2d6, 1d20` rolls each element independently

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod roller;
pub mod value;

use std::fmt;

pub use ast::{Dice, Expr, Op, Rolled};
pub use error::{Error, IllegalChar, Result};
pub use parser::MAX_DEPTH;
pub use render::to_text;
pub use roller::{
    evaluate, evaluate_with_rng, soft_evaluate, soft_evaluate_with_rng, FastRng, Rng, MAX_DICE,
};
pub use value::{Scalar, Value};

/// The result of rolling one expression.
#[derive(Debug, Clone)]
pub struct RollOutcome {
    /// The parsed expression as written.
    pub expression: String,
    /// The expression with every die result shown.
    pub rolls: String,
    /// The rolled tree; evaluating it again gives `value`.
    pub rolled: Expr,
    /// The final result.
    pub value: Value,
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evaluating: {}", self.expression)?;
        writeln!(f, "rolls: {}", self.rolls)?;
        write!(f, "{}", self.value)
    }
}

/// Parse and roll a dice expression in one step.
///
/// # Examples
///
/// ```
/// let outcome = rollexpr::roll("2d6 + 5").unwrap();
/// println!("Total: {}", outcome.value);
/// println!("Rolls: {}", outcome.rolls);
/// ```
pub fn roll(expr: &str) -> Result<RollOutcome> {
    roll_with_rng(expr, &mut FastRng::new())
}

/// Parse and roll with a custom RNG.
///
/// Useful for testing or when you need reproducible results.
///
/// # Examples
///
/// ```
/// use rollexpr::{roll_with_rng, FastRng};
///
/// let mut rng = FastRng::with_seed(42);
/// let outcome = roll_with_rng("2d6", &mut rng).unwrap();
/// ```
pub fn roll_with_rng(expr: &str, rng: &mut impl Rng) -> Result<RollOutcome> {
    let parsed = parser::parse(expr)?;
    let rolled = roller::soft_evaluate_with_rng(&parsed, rng)?;
    let value = roller::evaluate_with_rng(&rolled, rng)?;

    Ok(RollOutcome {
        expression: parsed.to_string(),
        rolls: rolled.to_string(),
        rolled,
        value,
    })
}

/// Parse a dice expression without rolling.
///
/// Returns the tree wrapped in [`Expr::Root`].
///
/// # Examples
///
/// ```
/// use rollexpr::Expr;
///
/// let expr = rollexpr::parse("1+2-3").unwrap();
/// match expr {
///     Expr::Root(inner) => assert!(matches!(*inner, Expr::Sum(ref items) if items.len() == 3)),
///     _ => panic!("Expected a root"),
/// }
/// ```
pub fn parse(input: &str) -> Result<Expr> {
    parser::parse(input)
}
