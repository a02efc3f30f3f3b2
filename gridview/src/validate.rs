//! Declarative form validation.
//!
//! A page builds one [`Validator`] per submit attempt, runs each field
//! through a chain of checks, and maps the resulting errors back onto
//! its inputs. Only the first failing check per field is reported.

use email_address::EmailAddress;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<'v>(&'v mut self, name: &str, value: &str) -> FieldCheck<'v> {
        FieldCheck {
            validator: self,
            name: name.to_string(),
            value: value.to_string(),
            failed: false,
        }
    }

    pub fn finish(self) -> ValidationResult {
        if self.errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.errors)
        }
    }
}

/// Check chain for one field. Checks after the first failure are
/// skipped, so ordering encodes priority.
pub struct FieldCheck<'v> {
    validator: &'v mut Validator,
    name: String,
    value: String,
    failed: bool,
}

impl FieldCheck<'_> {
    fn fail(mut self, message: &str) -> Self {
        if !self.failed {
            self.validator.errors.push(FieldError {
                field: self.name.clone(),
                message: message.to_string(),
            });
            self.failed = true;
        }
        self
    }

    pub fn required(self, message: &str) -> Self {
        if self.value.trim().is_empty() {
            self.fail(message)
        } else {
            self
        }
    }

    pub fn min_length(self, min: usize, message: &str) -> Self {
        if !self.value.is_empty() && self.value.chars().count() < min {
            self.fail(message)
        } else {
            self
        }
    }

    pub fn max_length(self, max: usize, message: &str) -> Self {
        if self.value.chars().count() > max {
            self.fail(message)
        } else {
            self
        }
    }

    pub fn email(self, message: &str) -> Self {
        if !self.value.is_empty() && !EmailAddress::is_valid(&self.value) {
            self.fail(message)
        } else {
            self
        }
    }

    pub fn pattern(self, regex: &Regex, message: &str) -> Self {
        if !self.value.is_empty() && !regex.is_match(&self.value) {
            self.fail(message)
        } else {
            self
        }
    }

    pub fn equals(self, other: &str, message: &str) -> Self {
        if self.value != other {
            self.fail(message)
        } else {
            self
        }
    }

    /// Arbitrary predicate over the raw value.
    pub fn check(self, ok: bool, message: &str) -> Self {
        if ok {
            self
        } else {
            self.fail(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_per_field_wins() {
        let mut v = Validator::new();
        v.field("password", "")
            .required("Password is required")
            .min_length(8, "Password must be at least 8 characters");
        let result = v.finish();
        assert_eq!(result.errors().len(), 1);
        assert_eq!(
            result.error_for("password"),
            Some("Password is required")
        );
    }

    #[test]
    fn empty_optional_fields_skip_format_checks() {
        let mut v = Validator::new();
        v.field("email", "").email("Invalid email");
        assert!(v.finish().is_valid());
    }

    #[test]
    fn email_format_is_checked() {
        let mut v = Validator::new();
        v.field("email", "not-an-email").email("Invalid email");
        assert_eq!(v.finish().error_for("email"), Some("Invalid email"));
    }

    #[test]
    fn equals_catches_mismatched_confirmation() {
        let mut v = Validator::new();
        v.field("confirm", "hunter2")
            .equals("hunter3", "Passwords do not match");
        assert!(!v.finish().is_valid());
    }

    #[test]
    fn errors_collect_across_fields() {
        let mut v = Validator::new();
        v.field("name", "").required("Name is required");
        v.field("email", "nope").email("Invalid email");
        let result = v.finish();
        assert_eq!(result.errors().len(), 2);
    }
}
