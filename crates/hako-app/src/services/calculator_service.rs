//! Calculator session: key labels in, display text out.

use hako_calc::{Calculator, Key, KeyKind, KEYPAD};
use hako_core::{AppError, CalculatorConfig};

use crate::error_mapping::IntoAppError;

pub struct CalculatorService {
    calculator: Calculator,
    show_memory_indicator: bool,
}

impl CalculatorService {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            calculator: Calculator::new(),
            show_memory_indicator: config.show_memory_indicator,
        }
    }

    /// Button grid, row by row.
    pub fn keypad(&self) -> &'static [[(&'static str, KeyKind); 4]] {
        &KEYPAD
    }

    pub fn press(&mut self, key: Key) {
        self.calculator.press(key);
    }

    /// Press the key with the given label. Unknown labels leave the
    /// calculator untouched.
    pub fn press_label(&mut self, label: &str) -> Result<(), AppError> {
        let key = label
            .parse::<Key>()
            .map_err(IntoAppError::into_app_error)?;
        tracing::debug!("Key {:?}", key);
        self.calculator.press(key);
        Ok(())
    }

    /// Press every label in order and return the final display text.
    pub fn run<'a, I>(&mut self, labels: I) -> Result<String, AppError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for label in labels {
            self.press_label(label)?;
        }
        Ok(self.display_text())
    }

    pub fn display_text(&self) -> String {
        self.calculator.display_text()
    }

    /// `"M: <value>"` when memory is in use and the indicator is enabled.
    pub fn memory_label(&self) -> Option<String> {
        if self.show_memory_indicator {
            self.calculator.memory_indicator()
        } else {
            None
        }
    }

    /// The error currently on the display, in application terms.
    pub fn error(&self) -> Option<AppError> {
        self.calculator
            .display()
            .value()
            .err()
            .map(IntoAppError::into_app_error)
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn reset(&mut self) {
        self.calculator.reset();
    }
}

impl Default for CalculatorService {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}
