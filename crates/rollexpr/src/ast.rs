// ABOUTME: Abstract Syntax Tree types for dice expressions.
// ABOUTME: Covers both parsed trees and trees whose dice have been rolled.

use std::fmt;

/// A dice expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal integer.
    Number(i64),
    /// A binary arithmetic operation.
    BinOp {
        op: Op,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary minus.
    Neg(Box<Expr>),
    /// An unrolled dice expression (e.g. "2d6").
    Dice(Dice),
    /// A dice expression after its dice were rolled.
    Rolled(Rolled),
    /// A flattened chain of additions and subtractions.
    ///
    /// Subtracted elements are wrapped in [`Expr::Neg`].
    Sum(Vec<Expr>),
    /// Comma-separated expressions, each evaluated on its own.
    List(Vec<Expr>),
    /// The top-level wrapper returned by the parser.
    Root(Box<Expr>),
}

impl Expr {
    /// Wrap an expression in a negation.
    pub fn neg(expr: Expr) -> Self {
        Expr::Neg(Box::new(expr))
    }

    /// Build a binary operation.
    pub fn bin_op(op: Op, left: Expr, right: Expr) -> Self {
        Expr::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build an unrolled dice node with literal count and sides.
    pub fn dice(count: i64, sides: i64) -> Self {
        Expr::Dice(Dice::new(Expr::Number(count), Expr::Number(sides)))
    }

    /// Wrap an expression as the top-level node.
    pub fn root(expr: Expr) -> Self {
        Expr::Root(Box::new(expr))
    }
}

/// A dice roll (e.g. "3d8"): how many dice and how many sides each.
#[derive(Debug, Clone, PartialEq)]
pub struct Dice {
    pub count: Box<Expr>,
    pub sides: Box<Expr>,
}

impl Dice {
    pub fn new(count: Expr, sides: Expr) -> Self {
        Self {
            count: Box::new(count),
            sides: Box::new(sides),
        }
    }
}

/// The concrete results of rolling one [`Dice`] node.
///
/// Keeps a copy of the dice it came from so it can still be shown as
/// "2d6:(3, 5)" after the original tree is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct Rolled {
    pub dice: Dice,
    pub rolls: Vec<i64>,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Whether this operator binds at the multiplicative tier.
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add => write!(f, "+"),
            Op::Sub => write!(f, "-"),
            Op::Mul => write!(f, "x"),
            Op::Div => write!(f, "/"),
        }
    }
}
