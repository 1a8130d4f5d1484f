// ABOUTME: Text rendering for dice expression trees.
// ABOUTME: Shows formulas like "1 + 2x3" and rolled dice like "2d6:(3, 5)".

use crate::ast::{Dice, Expr, Rolled};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::BinOp { op, left, right } => {
                if op.is_multiplicative() {
                    write!(f, "{}{}{}", left, op, right)
                } else {
                    write!(f, "({} {} {})", left, op, right)
                }
            }
            Expr::Neg(inner) => write!(f, "(-{})", inner),
            Expr::Dice(dice) => write!(f, "{}", dice),
            Expr::Rolled(rolled) => write!(f, "{}", rolled),
            Expr::Sum(items) => {
                write!(f, "(")?;
                write_terms(f, items)?;
                write!(f, ")")
            }
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_bare(f, item)?;
                }
                write!(f, "]")
            }
            Expr::Root(inner) => write_bare(f, inner),
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl fmt::Display for Rolled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [roll] = self.rolls.as_slice() {
            return write!(f, "{}:{}", self.dice, roll);
        }
        let rolls = self
            .rolls
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}:({})", self.dice, rolls)
    }
}

/// Render an expression, dropping the outer parentheses of a Sum.
fn write_bare(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Sum(items) => write_terms(f, items),
        other => write!(f, "{}", other),
    }
}

/// Render the elements of a Sum as "a + b - c".
fn write_terms(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        match (i, item) {
            (0, Expr::Neg(inner)) => write!(f, "-{}", inner)?,
            (0, term) => write!(f, "{}", term)?,
            (_, Expr::Neg(inner)) => write!(f, " - {}", inner)?,
            (_, term) => write!(f, " + {}", term)?,
        }
    }
    Ok(())
}

/// Render an expression to display text.
pub fn to_text(expr: &Expr) -> String {
    expr.to_string()
}
