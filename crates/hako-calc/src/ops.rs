//! Operator sets and their pure evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Largest n whose factorial is finite as an f64.
pub const MAX_FACTORIAL: u32 = 170;

/// Binary operators awaiting a right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Evaluate `lhs op rhs`. Division by zero yields +∞, which is reported
    /// as [`CalcError::NotFinite`] like any other overflow.
    pub fn evaluate(self, lhs: f64, rhs: f64) -> Result<f64> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    f64::INFINITY
                } else {
                    lhs / rhs
                }
            }
        };
        finite(value)
    }
}

/// Single-operand functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    SquareRoot,
    Square,
    Reciprocal,
    Percent,
    SignToggle,
    Factorial,
    Pi,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::SquareRoot => "√",
            Self::Square => "x²",
            Self::Reciprocal => "¹/x",
            Self::Percent => "%",
            Self::SignToggle => "+/-",
            Self::Factorial => "n!",
            Self::Pi => "π",
        }
    }

    /// Whether the next digit starts a fresh number after this function.
    /// `None` leaves the flag as it was.
    pub fn awaits_new_entry(self) -> Option<bool> {
        match self {
            Self::Pi => Some(false),
            Self::SignToggle => None,
            _ => Some(true),
        }
    }

    /// Apply to the displayed value. `Pi` ignores its input.
    pub fn apply(self, value: f64) -> Result<f64> {
        match self {
            Self::SquareRoot => square_root(value),
            Self::Square => finite(value * value),
            Self::Reciprocal => {
                if value == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    finite(1.0 / value)
                }
            }
            Self::Percent => finite(value / 100.0),
            Self::SignToggle => Ok(if value == 0.0 { 0.0 } else { -value }),
            Self::Factorial => factorial(value),
            Self::Pi => Ok(std::f64::consts::PI),
        }
    }
}

/// Memory register operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryOp {
    Clear,
    Recall,
    Add,
    Subtract,
}

impl MemoryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Add => "M+",
            Self::Subtract => "M-",
        }
    }
}

/// n! for integral n in `0..=170`.
pub fn factorial(value: f64) -> Result<f64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(CalcError::IntegersOnly);
    }
    if value < 0.0 {
        return Err(CalcError::PositiveOnly);
    }
    if value > f64::from(MAX_FACTORIAL) {
        return Err(CalcError::TooLarge);
    }

    let n = value as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}

pub fn square_root(value: f64) -> Result<f64> {
    if value < 0.0 {
        return Err(CalcError::NegativeSquareRoot);
    }
    finite(value.sqrt())
}

pub(crate) fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}
