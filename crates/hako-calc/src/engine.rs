//! Stateful calculator driven by key presses.

use crate::error::{CalcError, Result};
use crate::format::format_number;
use crate::keypad::Key;
use crate::ops::{finite, BinaryOp, MemoryOp, UnaryOp};

/// What the display currently holds. The text is always derived from this.
#[derive(Debug, Clone, PartialEq)]
pub enum Display {
    /// Number being typed, kept verbatim (`"12."`, `"0.50"`).
    Entry(String),
    /// Result of an operation.
    Value(f64),
    Error(CalcError),
}

impl Display {
    pub fn render(&self) -> String {
        match self {
            Display::Entry(text) => text.clone(),
            Display::Value(value) => format_number(*value),
            Display::Error(err) => err.to_string(),
        }
    }

    pub fn value(&self) -> Result<f64> {
        match self {
            Display::Entry(text) => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(CalcError::InvalidNumber),
            Display::Value(value) => Ok(*value),
            Display::Error(err) => Err(*err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Display::Error(_))
    }
}

/// Calculator state: pending operation, entry flag, memory register and display.
#[derive(Debug, Clone)]
pub struct Calculator {
    accumulator: f64,
    pending: BinaryOp,
    awaiting_new_entry: bool,
    memory: f64,
    memory_active: bool,
    display: Display,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            pending: BinaryOp::Add,
            awaiting_new_entry: true,
            memory: 0.0,
            memory_active: false,
            display: Display::Value(0.0),
        }
    }

    /// Dispatch one key press.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(_) | Key::Point => {
                if let Some(c) = key.entry_char() {
                    self.input_digit(c);
                }
            }
            Key::Operator(op) => self.apply_binary_operator(op),
            Key::Equals => self.evaluate_equals(),
            Key::Clear => self.clear(),
            Key::Unary(op) => self.apply_unary(op),
            Key::Memory(op) => self.apply_memory(op),
        }
    }

    /// Type a digit or decimal point. Other characters are ignored.
    pub fn input_digit(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        self.recover();

        if self.awaiting_new_entry {
            let text = if c == '.' { "0.".to_string() } else { c.to_string() };
            self.display = Display::Entry(text);
            self.awaiting_new_entry = false;
            return;
        }

        let mut text = match &self.display {
            Display::Entry(text) => text.clone(),
            other => other.render(),
        };
        if c == '.' && text.contains('.') {
            return;
        }
        text.push(c);
        self.display = Display::Entry(text);
    }

    /// Complete the pending operation and make `op` the new pending operator.
    ///
    /// On failure the accumulator keeps its previous value.
    pub fn apply_binary_operator(&mut self, op: BinaryOp) {
        self.recover();
        if let Ok(value) = self.evaluate_pending() {
            self.accumulator = value;
        }
        self.pending = op;
        self.awaiting_new_entry = true;
    }

    /// Complete the pending operation, then reset regardless of outcome.
    pub fn evaluate_equals(&mut self) {
        self.recover();
        // The outcome is already on the display.
        let _ = self.evaluate_pending();
        self.reset();
    }

    /// Apply a single-operand function to the displayed value.
    pub fn apply_unary(&mut self, op: UnaryOp) {
        self.recover();
        let outcome = match op {
            UnaryOp::Pi => op.apply(0.0),
            _ => self.display.value().and_then(|v| op.apply(v)),
        };
        self.show(outcome);
        if let Some(flag) = op.awaits_new_entry() {
            self.awaiting_new_entry = flag;
        }
    }

    /// Memory register operations. They never touch the pending operation and
    /// do not clear an error on the display (except `Recall`, which replaces it).
    pub fn apply_memory(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Clear => {
                self.memory = 0.0;
                self.memory_active = false;
            }
            MemoryOp::Recall => {
                self.show(finite(self.memory));
                self.awaiting_new_entry = false;
            }
            MemoryOp::Add | MemoryOp::Subtract => match self.display.value() {
                Ok(value) => {
                    let updated = if op == MemoryOp::Add {
                        self.memory + value
                    } else {
                        self.memory - value
                    };
                    // An overflowing update leaves the register as it was.
                    match finite(updated) {
                        Ok(updated) => {
                            self.memory = updated;
                            self.memory_active = true;
                        }
                        Err(err) => self.show(Err(err)),
                    }
                }
                Err(err) => tracing::debug!("{} ignored: {}", op.symbol(), err),
            },
        }
    }

    /// `AC`: show zero and reset the pending operation.
    pub fn clear(&mut self) {
        self.display = Display::Value(0.0);
        self.reset();
    }

    /// Restore the pending operation to `+ 0` and await a new entry.
    /// Memory is kept.
    pub fn reset(&mut self) {
        self.pending = BinaryOp::Add;
        self.accumulator = 0.0;
        self.awaiting_new_entry = true;
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_text(&self) -> String {
        self.display.render()
    }

    pub fn has_error(&self) -> bool {
        self.display.is_error()
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn pending_operator(&self) -> BinaryOp {
        self.pending
    }

    pub fn is_awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// `"M: <value>"` while the memory register is in use.
    pub fn memory_indicator(&self) -> Option<String> {
        self.memory_active
            .then(|| format!("M: {}", format_number(self.memory)))
    }

    /// An error on the display is cleared before any other input is handled.
    fn recover(&mut self) {
        if self.has_error() {
            tracing::debug!("Clearing error before next input");
            self.clear();
        }
    }

    fn evaluate_pending(&mut self) -> Result<f64> {
        let outcome = self
            .display
            .value()
            .and_then(|rhs| self.pending.evaluate(self.accumulator, rhs));
        self.show(outcome);
        outcome
    }

    fn show(&mut self, outcome: Result<f64>) {
        self.display = match outcome {
            Ok(value) => Display::Value(value),
            Err(err) => {
                tracing::debug!("Calculation failed: {}", err);
                Display::Error(err)
            }
        };
    }
}
