//! Validator builder for fluent validation API.

use regex::Regex;

use super::result::{FieldError, ValidationResult};
use super::validatable::Validatable;

/// Type alias for validation rule closures.
type Rule<V> = Box<dyn Fn(&V) -> Result<(), String> + Send + Sync>;

/// A field whose rules have run.
struct FieldEntry {
    name: String,
    errors: Vec<String>,
}

/// Builder for validating multiple form fields.
#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to validate. The value is captured at this point.
    pub fn field<W: Validatable>(self, value: &W, name: impl Into<String>) -> FieldBuilder<W::Value> {
        FieldBuilder {
            validator: self,
            value: value.validation_value(),
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Collect the first error of each failing field.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .into_iter()
            .filter_map(|field| {
                field.errors.into_iter().next().map(|message| FieldError {
                    field_name: field.name,
                    message,
                })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder<V> {
    validator: Validator,
    value: V,
    name: String,
    rules: Vec<Rule<V>>,
}

impl<V: 'static> FieldBuilder<V> {
    /// Add a custom validation rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Continue to the next field.
    pub fn field<W: Validatable>(self, value: &W, name: impl Into<String>) -> FieldBuilder<W::Value> {
        self.finalize().field(value, name)
    }

    /// Finalize and run all validations.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    /// Run this field's rules and return the validator.
    fn finalize(self) -> Validator {
        let errors = self
            .rules
            .iter()
            .filter_map(|rule| rule(&self.value).err())
            .collect();

        let mut validator = self.validator;
        validator.fields.push(FieldEntry {
            name: self.name,
            errors,
        });
        validator
    }
}

// Built-in rules for String values
impl FieldBuilder<String> {
    /// Require a non-blank value.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require at least `min` characters.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    /// Require at most `max` characters.
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Require the value to match a regex pattern. Empty values pass.
    pub fn pattern(self, re: Regex, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.is_empty() || re.is_match(v), msg)
    }

    /// Require a valid email address. Empty values pass.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    /// Require the value to be an absolute URL. Empty values pass.
    pub fn url(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_empty() || url::Url::parse(v).is_ok(), msg)
    }
}

// Built-in rules for bool values
impl FieldBuilder<bool> {
    /// Require the checkbox to be checked.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule(|&v| v, msg)
    }
}

// Built-in rules for numeric input
impl FieldBuilder<Option<f64>> {
    /// Require a number to be entered.
    pub fn present(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_some(), msg)
    }

    /// Require `min <= value <= max`. Missing values pass.
    pub fn range(self, min: f64, max: f64, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.is_none_or(|n| (min..=max).contains(&n)), msg)
    }
}

// Built-in rules for Option<usize> values
impl FieldBuilder<Option<usize>> {
    /// Require that an option is selected.
    pub fn selected(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_some(), msg)
    }
}

// Built-in rules for list lengths
impl FieldBuilder<usize> {
    /// Require at least `min` entries.
    pub fn min_items(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |&n| n >= min, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn reports_first_error_per_field() {
        let title = String::new();
        let result = Validator::new()
            .field(&title, "title")
            .required("required")
            .min_length(3, "too short")
            .validate();
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.error_for("title"), Some("required"));
    }

    #[test]
    fn optional_rules_skip_empty_values() {
        let website = String::new();
        let slug = String::new();
        let result = Validator::new()
            .field(&website, "website")
            .url("bad url")
            .field(&slug, "slug")
            .pattern(Regex::new("^[a-z-]+$").unwrap(), "bad slug")
            .validate();
        assert!(result.is_valid());
    }

    #[test]
    fn numeric_rules() {
        let price: Option<Decimal> = Some(Decimal::new(-100, 2));
        let seats: Option<f64> = None;
        let result = Validator::new()
            .field(&price, "price")
            .present("price required")
            .range(0.0, 10_000.0, "price out of range")
            .field(&seats, "seats")
            .present("seats required")
            .validate();
        assert_eq!(result.error_for("price"), Some("price out of range"));
        assert_eq!(result.error_for("seats"), Some("seats required"));
    }

    #[test]
    fn list_and_select_rules() {
        let tags: Vec<String> = Vec::new();
        let level: Option<usize> = Some(1);
        let result = Validator::new()
            .field(&tags, "tags")
            .min_items(1, "add a tag")
            .field(&level, "level")
            .selected("pick a level")
            .validate();
        assert_eq!(result.first_error().map(|e| e.field_name.as_str()), Some("tags"));
        assert!(result.error_for("level").is_none());
    }
}
