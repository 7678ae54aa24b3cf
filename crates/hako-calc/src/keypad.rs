//! Keys and the button layout.

use std::str::FromStr;

use crate::ops::{BinaryOp, MemoryOp, UnaryOp};

/// A single button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `0`..=`9`
    Digit(u8),
    Point,
    Operator(BinaryOp),
    Equals,
    Clear,
    Unary(UnaryOp),
    Memory(MemoryOp),
}

/// Button category, used by front ends for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Digit,
    Operator,
    Function,
}

/// Seven rows of four buttons, top to bottom.
pub const KEYPAD: [[(&str, KeyKind); 4]; 7] = [
    [
        ("MC", KeyKind::Function),
        ("MR", KeyKind::Function),
        ("M+", KeyKind::Function),
        ("M-", KeyKind::Function),
    ],
    [
        ("AC", KeyKind::Function),
        ("+/-", KeyKind::Function),
        ("%", KeyKind::Function),
        ("n!", KeyKind::Function),
    ],
    [
        ("π", KeyKind::Function),
        ("√", KeyKind::Function),
        ("x²", KeyKind::Function),
        ("¹/x", KeyKind::Function),
    ],
    [
        ("7", KeyKind::Digit),
        ("8", KeyKind::Digit),
        ("9", KeyKind::Digit),
        ("÷", KeyKind::Operator),
    ],
    [
        ("4", KeyKind::Digit),
        ("5", KeyKind::Digit),
        ("6", KeyKind::Digit),
        ("×", KeyKind::Operator),
    ],
    [
        ("1", KeyKind::Digit),
        ("2", KeyKind::Digit),
        ("3", KeyKind::Digit),
        ("-", KeyKind::Operator),
    ],
    [
        ("0", KeyKind::Digit),
        (".", KeyKind::Digit),
        ("=", KeyKind::Operator),
        ("+", KeyKind::Operator),
    ],
];

impl Key {
    /// The character this key appends to an entry, if it is a digit or point.
    pub fn entry_char(self) -> Option<char> {
        match self {
            Key::Digit(d) => char::from_digit(u32::from(d), 10),
            Key::Point => Some('.'),
            _ => None,
        }
    }
}

/// Unrecognized key label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let key = match label {
            "." => Key::Point,
            "+" => Key::Operator(BinaryOp::Add),
            "-" => Key::Operator(BinaryOp::Subtract),
            "×" | "*" | "x" => Key::Operator(BinaryOp::Multiply),
            "÷" | "/" => Key::Operator(BinaryOp::Divide),
            "=" => Key::Equals,
            "AC" | "C" => Key::Clear,
            "√" | "sqrt" => Key::Unary(UnaryOp::SquareRoot),
            "x²" | "sq" => Key::Unary(UnaryOp::Square),
            "¹/x" | "1/x" => Key::Unary(UnaryOp::Reciprocal),
            "%" => Key::Unary(UnaryOp::Percent),
            "+/-" | "neg" => Key::Unary(UnaryOp::SignToggle),
            "n!" | "!" => Key::Unary(UnaryOp::Factorial),
            "π" | "pi" => Key::Unary(UnaryOp::Pi),
            "MC" => Key::Memory(MemoryOp::Clear),
            "MR" => Key::Memory(MemoryOp::Recall),
            "M+" => Key::Memory(MemoryOp::Add),
            "M-" => Key::Memory(MemoryOp::Subtract),
            _ => {
                let mut chars = label.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(d), None) => Key::Digit(d as u8),
                    _ => return Err(UnknownKey(label.to_string())),
                }
            }
        };
        Ok(key)
    }
}
