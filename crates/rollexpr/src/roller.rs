// ABOUTME: Dice rolling and expression evaluation logic.
// ABOUTME: Evaluates trees to numbers and materializes dice into rolled trees.

use crate::ast::{Dice, Expr, Op, Rolled};
use crate::error::{Error, Result};
use crate::value::{Scalar, Value};
use tracing::debug;

/// Maximum number of dice a single dice node may roll.
pub const MAX_DICE: u64 = 10_000;

/// Trait for random number generation, allowing for testing with fixed values.
pub trait Rng {
    /// Generate a random number in the range [1, sides].
    fn roll(&mut self, sides: u64) -> u64;
}

/// Default RNG using fastrand.
pub struct FastRng(fastrand::Rng);

impl FastRng {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for FastRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng for FastRng {
    fn roll(&mut self, sides: u64) -> u64 {
        self.0.u64(1..=sides)
    }
}

/// Evaluate an expression to a number with the default RNG.
pub fn evaluate(expr: &Expr) -> Result<Value> {
    evaluate_with_rng(expr, &mut FastRng::new())
}

/// Evaluate an expression to a number.
///
/// Every unrolled dice node is rolled again on each call; rolled nodes
/// only sum what they already hold.
pub fn evaluate_with_rng(expr: &Expr, rng: &mut impl Rng) -> Result<Value> {
    Evaluator { rng }.value(expr)
}

/// Roll every dice node with the default RNG, returning a new tree.
pub fn soft_evaluate(expr: &Expr) -> Result<Expr> {
    soft_evaluate_with_rng(expr, &mut FastRng::new())
}

/// Roll every dice node once, left to right, returning a new tree.
///
/// The returned tree has the same shape as `expr`, with each [`Expr::Dice`]
/// replaced by an [`Expr::Rolled`] holding its results. Evaluating the
/// returned tree is deterministic.
pub fn soft_evaluate_with_rng(expr: &Expr, rng: &mut impl Rng) -> Result<Expr> {
    Evaluator { rng }.soften(expr)
}

struct Evaluator<'a, R: Rng> {
    rng: &'a mut R,
}

impl<R: Rng> Evaluator<'_, R> {
    fn value(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Root(inner) => self.value(inner),
            Expr::List(items) => items
                .iter()
                .map(|item| self.scalar(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            other => self.scalar(other).map(Value::Scalar),
        }
    }

    fn scalar(&mut self, expr: &Expr) -> Result<Scalar> {
        match expr {
            Expr::Number(n) => Ok(Scalar::Int(*n)),
            Expr::BinOp { op, left, right } => {
                let left = self.scalar(left)?;
                let right = self.scalar(right)?;
                match op {
                    Op::Add => left.checked_add(right),
                    Op::Sub => left.checked_sub(right),
                    Op::Mul => left.checked_mul(right),
                    Op::Div => left.checked_div(right),
                }
            }
            Expr::Neg(inner) => self.scalar(inner)?.checked_neg(),
            Expr::Dice(dice) => {
                let rolls = self.roll_dice(dice)?;
                sum_rolls(&rolls)
            }
            Expr::Rolled(rolled) => sum_rolls(&rolled.rolls),
            Expr::Sum(items) => items.iter().try_fold(Scalar::Int(0), |total, item| {
                total.checked_add(self.scalar(item)?)
            }),
            Expr::List(_) => Err(Error::ListInArithmetic),
            Expr::Root(inner) => self.scalar(inner),
        }
    }

    fn soften(&mut self, expr: &Expr) -> Result<Expr> {
        Ok(match expr {
            Expr::Number(_) | Expr::Rolled(_) => expr.clone(),
            Expr::BinOp { op, left, right } => {
                let left = self.soften(left)?;
                let right = self.soften(right)?;
                Expr::bin_op(*op, left, right)
            }
            Expr::Neg(inner) => Expr::neg(self.soften(inner)?),
            Expr::Dice(dice) => Expr::Rolled(Rolled {
                dice: dice.clone(),
                rolls: self.roll_dice(dice)?,
            }),
            Expr::Sum(items) => Expr::Sum(self.soften_all(items)?),
            Expr::List(items) => Expr::List(self.soften_all(items)?),
            Expr::Root(inner) => Expr::root(self.soften(inner)?),
        })
    }

    fn soften_all(&mut self, items: &[Expr]) -> Result<Vec<Expr>> {
        items.iter().map(|item| self.soften(item)).collect()
    }

    fn roll_dice(&mut self, dice: &Dice) -> Result<Vec<i64>> {
        let count = match self.scalar(&dice.count)? {
            Scalar::Int(n) if n >= 0 => n as u64,
            other => return Err(Error::InvalidDiceCount(other.to_string())),
        };
        let sides = match self.scalar(&dice.sides)? {
            Scalar::Int(n) if n >= 1 => n as u64,
            other => return Err(Error::InvalidDiceSides(other.to_string())),
        };
        if count > MAX_DICE {
            return Err(Error::TooManyDice(MAX_DICE));
        }

        // sides fits in i64, so every roll does too
        let rolls: Vec<i64> = (0..count).map(|_| self.rng.roll(sides) as i64).collect();
        debug!(count, sides, ?rolls, "rolled dice");
        Ok(rolls)
    }
}

fn sum_rolls(rolls: &[i64]) -> Result<Scalar> {
    rolls
        .iter()
        .try_fold(0i64, |total, &roll| total.checked_add(roll))
        .map(Scalar::Int)
        .ok_or(Error::Overflow)
}
