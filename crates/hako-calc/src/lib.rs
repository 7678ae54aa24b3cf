//! Calculator engine for Hako.
//!
//! Holds the pending operator and operand, evaluates four-function and
//! scientific operations, and renders results. Every failure is a
//! [`CalcError`] value shown on the display; no operation panics.

pub mod engine;
pub mod error;
pub mod format;
pub mod keypad;
pub mod ops;

pub use engine::{Calculator, Display};
pub use error::{CalcError, ERROR_LITERAL};
pub use format::format_number;
pub use keypad::{Key, KeyKind, UnknownKey, KEYPAD};
pub use ops::{BinaryOp, MemoryOp, UnaryOp};
