use hako_calc::{CalcError, UnknownKey};
use hako_core::{AppError, ArithmeticError, InputError};

use super::IntoAppError;

impl IntoAppError for CalcError {
    fn into_app_error(self) -> AppError {
        match self {
            CalcError::DivisionByZero => AppError::Arithmetic(ArithmeticError::DivisionByZero),
            CalcError::TooLarge => AppError::Arithmetic(ArithmeticError::Overflow),
            CalcError::NotFinite => AppError::Arithmetic(ArithmeticError::NotANumber),
            CalcError::InvalidNumber => AppError::Input(InputError::NotANumber(self.to_string())),
            CalcError::IntegersOnly | CalcError::PositiveOnly | CalcError::NegativeSquareRoot => {
                AppError::Input(InputError::OutOfDomain(self.to_string()))
            }
        }
    }
}

impl IntoAppError for UnknownKey {
    fn into_app_error(self) -> AppError {
        AppError::Input(InputError::UnknownKey(self.0))
    }
}
