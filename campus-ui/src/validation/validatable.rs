//! Values that can be fed to the validator.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Something a form field holds.
///
/// Text inputs validate as `String`, checkboxes as `bool`, numeric inputs as
/// `Option<f64>` (empty input is `None`) and selects as `Option<usize>`.
pub trait Validatable {
    /// The value type rules are written against.
    type Value;

    /// Extract the current value for validation.
    fn validation_value(&self) -> Self::Value;
}

impl Validatable for String {
    type Value = String;

    fn validation_value(&self) -> String {
        self.clone()
    }
}

impl Validatable for &str {
    type Value = String;

    fn validation_value(&self) -> String {
        (*self).to_string()
    }
}

impl Validatable for bool {
    type Value = bool;

    fn validation_value(&self) -> bool {
        *self
    }
}

impl Validatable for Option<f64> {
    type Value = Option<f64>;

    fn validation_value(&self) -> Option<f64> {
        *self
    }
}

impl Validatable for Option<Decimal> {
    type Value = Option<f64>;

    fn validation_value(&self) -> Option<f64> {
        self.and_then(|d| d.to_f64())
    }
}

impl Validatable for Option<usize> {
    type Value = Option<usize>;

    fn validation_value(&self) -> Option<usize> {
        *self
    }
}

impl<T> Validatable for Vec<T> {
    type Value = usize;

    fn validation_value(&self) -> usize {
        self.len()
    }
}
