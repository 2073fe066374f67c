//! Field validation run before any request is issued.
//!
//! Each rule checks one constraint and returns the message to show when it
//! fails. A field's rules run in order and stop at the first failure, so only
//! one message per field reaches the user. Forms check every field, so a form
//! reports at most one message for each invalid field.

pub mod forms;

pub use self::forms::{
    ChangePasswordForm, ForgotPasswordForm, LoginForm, ResetPasswordForm, VerifyOtpForm,
};

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Number of digits in a one-time passcode.
pub const OTP_LENGTH: usize = 6;

pub fn is_required(value: &str, label: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| format!("{label} is required."))
}

pub fn is_valid_email(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let valid = Regex::new(r"\S+@\S+\.\S+").is_ok_and(|re| re.is_match(value));
    (!valid).then(|| "Please enter a valid email address.".to_string())
}

pub fn has_min_length(value: &str, min: usize, label: &str) -> Option<String> {
    (!value.is_empty() && value.chars().count() < min)
        .then(|| format!("{label} must be at least {min} characters long."))
}

pub fn is_matching(value: &str, other: &str, label: &str) -> Option<String> {
    (value != other).then(|| format!("{label} does not match."))
}

pub fn is_not_same_as(value: &str, other: &str, label: &str) -> Option<String> {
    (value == other).then(|| format!("{label} must be different from the current password."))
}

pub fn is_numeric_and_length(value: &str, length: usize, label: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let valid = Regex::new(&format!("^[0-9]{{{length}}}$")).is_ok_and(|re| re.is_match(value));
    (!valid).then(|| format!("{label} must be exactly {length} digits."))
}

pub fn has_uppercase(value: &str, label: &str) -> Option<String> {
    character_class(value, "[A-Z]", label, "an uppercase letter")
}

pub fn has_lowercase(value: &str, label: &str) -> Option<String> {
    character_class(value, "[a-z]", label, "a lowercase letter")
}

pub fn has_number(value: &str, label: &str) -> Option<String> {
    character_class(value, "[0-9]", label, "a number")
}

pub fn has_symbol(value: &str, label: &str) -> Option<String> {
    character_class(value, "[^A-Za-z0-9]", label, "a symbol")
}

fn character_class(value: &str, class: &str, label: &str, what: &str) -> Option<String> {
    let found = Regex::new(class).is_ok_and(|re| re.is_match(value));
    (!found).then(|| format!("{label} must contain at least {what}."))
}

/// One step of a field chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule<'a> {
    Required,
    Email,
    MinLength(usize),
    Matching(&'a str),
    NotSameAs(&'a str),
    NumericLength(usize),
    Uppercase,
    Lowercase,
    Number,
    Symbol,
}

impl Rule<'_> {
    #[must_use]
    pub fn check(&self, value: &str, label: &str) -> Option<String> {
        match *self {
            Self::Required => is_required(value, label),
            Self::Email => is_valid_email(value),
            Self::MinLength(min) => has_min_length(value, min, label),
            Self::Matching(other) => is_matching(value, other, label),
            Self::NotSameAs(other) => is_not_same_as(value, other, label),
            Self::NumericLength(length) => is_numeric_and_length(value, length, label),
            Self::Uppercase => has_uppercase(value, label),
            Self::Lowercase => has_lowercase(value, label),
            Self::Number => has_number(value, label),
            Self::Symbol => has_symbol(value, label),
        }
    }
}

/// Runs `rules` in order and returns the first failure.
#[must_use]
pub fn validate(value: &str, label: &str, rules: &[Rule<'_>]) -> Option<String> {
    rules.iter().find_map(|rule| rule.check(value, label))
}

/// Password rules shared by the reset and change-password forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_complexity: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_complexity: true,
        }
    }
}

impl PasswordPolicy {
    /// Rules for a new password, starting with `Required`.
    #[must_use]
    pub fn rules(&self) -> Vec<Rule<'static>> {
        let mut rules = vec![Rule::Required, Rule::MinLength(self.min_length)];
        if self.require_complexity {
            rules.extend([Rule::Uppercase, Rule::Lowercase, Rule::Number, Rule::Symbol]);
        }
        rules
    }
}

/// First failing message per field, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one field chain and records its failure, if any.
    #[must_use]
    pub fn check(mut self, field: &str, label: &str, value: &str, rules: &[Rule<'_>]) -> Self {
        if let Some(message) = validate(value, label, rules) {
            self.0.insert(field.to_string(), message);
        }
        self
    }

    /// Builds field errors from a `VALIDATION_ERROR` details object
    /// (`{"field": ["message", ...]}`), keeping the first message per field.
    #[must_use]
    pub fn from_details(details: &Value) -> Self {
        let Some(map) = details.as_object() else {
            return Self::default();
        };

        let errors = map
            .iter()
            .filter_map(|(field, messages)| {
                let message = match messages {
                    Value::Array(list) => list.iter().find_map(Value::as_str),
                    Value::String(message) => Some(message.as_str()),
                    _ => None,
                }?;
                Some((field.clone(), message.to_string()))
            })
            .collect();

        Self(errors)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// `Ok(())` when no field failed.
    ///
    /// # Errors
    /// Returns the collected errors when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
