// ABOUTME: Numeric results of evaluating dice expressions.
// ABOUTME: Integers stay exact until a division turns them into reals.

use crate::error::{Error, Result};
use std::fmt;

/// A single numeric result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Real(f64),
}

impl Scalar {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::Int(n) => n as f64,
            Scalar::Real(x) => x,
        }
    }

    pub fn checked_add(self, rhs: Scalar) -> Result<Scalar> {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => {
                a.checked_add(b).map(Scalar::Int).ok_or(Error::Overflow)
            }
            (a, b) => Ok(Scalar::Real(a.as_f64() + b.as_f64())),
        }
    }

    pub fn checked_sub(self, rhs: Scalar) -> Result<Scalar> {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => {
                a.checked_sub(b).map(Scalar::Int).ok_or(Error::Overflow)
            }
            (a, b) => Ok(Scalar::Real(a.as_f64() - b.as_f64())),
        }
    }

    pub fn checked_mul(self, rhs: Scalar) -> Result<Scalar> {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => {
                a.checked_mul(b).map(Scalar::Int).ok_or(Error::Overflow)
            }
            (a, b) => Ok(Scalar::Real(a.as_f64() * b.as_f64())),
        }
    }

    /// True division: the result is always real.
    pub fn checked_div(self, rhs: Scalar) -> Result<Scalar> {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Scalar::Real(self.as_f64() / divisor))
    }

    pub fn checked_neg(self) -> Result<Scalar> {
        match self {
            Scalar::Int(n) => n.checked_neg().map(Scalar::Int).ok_or(Error::Overflow),
            Scalar::Real(x) => Ok(Scalar::Real(-x)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Real(x) => write_real(f, *x),
        }
    }
}

/// Shortest round-trip digits in positional form, always with a fractional part.
fn write_real(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if !x.is_finite() {
        return write!(f, "{}", x);
    }
    let digits = x.to_string();
    if digits.contains('.') {
        f.write_str(&digits)
    } else {
        write!(f, "{}.0", digits)
    }
}

/// The result of evaluating a whole expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single expression's result.
    Scalar(Scalar),
    /// One result per element of a comma-separated list.
    List(Vec<Scalar>),
}

impl Value {
    /// All results as floats, in order.
    pub fn to_f64s(&self) -> Vec<f64> {
        match self {
            Value::Scalar(s) => vec![s.as_f64()],
            Value::List(items) => items.iter().map(Scalar::as_f64).collect(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::List(items) => {
                let joined = items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", joined)
            }
        }
    }
}
