//! Validation helpers and the pluggable validator hierarchy
//!
//! This module provides the free-standing string/email validation helpers
//! together with the `DataValidator` trait used by `GenericDataContainer`
//! to gate every store operation. Validators are pure predicates: they
//! never fail with an error, they only report pass/fail. Malformed input
//! is treated as a failed validation (fail-safe).

use crate::constants::{DEFAULT_MAX_STRING_LENGTH, DEFAULT_MIN_STRING_LENGTH};
use crate::value::Value;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;

/// Rules applied by `StringValidator` and `validate_string`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringRules {
    /// Minimum length in characters
    pub min_length: usize,
    /// Maximum length in characters
    pub max_length: usize,
    /// Require the first character to be alphabetic
    pub start_with_alpha: bool,
    /// Require at least one space character
    pub contain_at_least_one_space: bool,
    /// Accept an absent value
    pub can_be_none: bool,
}

impl Default for StringRules {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_STRING_LENGTH,
            max_length: DEFAULT_MAX_STRING_LENGTH,
            start_with_alpha: true,
            contain_at_least_one_space: false,
            can_be_none: false,
        }
    }
}

impl StringRules {
    /// Set the minimum accepted length
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the maximum accepted length
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Require or relax the leading-alphabetic rule
    pub fn start_with_alpha(mut self, required: bool) -> Self {
        self.start_with_alpha = required;
        self
    }

    /// Require at least one space character
    pub fn contain_at_least_one_space(mut self, required: bool) -> Self {
        self.contain_at_least_one_space = required;
        self
    }

    /// Accept an absent value
    pub fn can_be_none(mut self, allowed: bool) -> Self {
        self.can_be_none = allowed;
        self
    }
}

/// Inclusive numeric bounds applied by `NumberValidator`
///
/// An absent bound leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl NumericRange {
    /// Create a range with both bounds set
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: Some(max_value),
        }
    }

    /// Create a range bounded only from below
    pub fn at_least(min_value: f64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: None,
        }
    }

    /// Create a range bounded only from above
    pub fn at_most(max_value: f64) -> Self {
        Self {
            min_value: None,
            max_value: Some(max_value),
        }
    }

    /// Check a candidate against the bounds (inclusive)
    pub fn contains(&self, candidate: f64) -> bool {
        if let Some(min) = self.min_value {
            if candidate < min {
                return false;
            }
        }
        if let Some(max) = self.max_value {
            if candidate > max {
                return false;
            }
        }
        true
    }
}

/// Broad category of a validator, used by containers to reject a validator
/// of the wrong kind for their declared shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    /// Validates textual values
    String,
    /// Validates numeric values
    Numeric,
}

/// Capability implemented by every concrete validator.
///
/// There is deliberately no default implementation: a validator that has
/// not decided what to accept cannot exist.
pub trait DataValidator: Send + Sync {
    /// The category this validator belongs to
    fn kind(&self) -> ValidatorKind;

    /// Inspect a candidate value, returning pass/fail. Never errors;
    /// input the validator does not understand fails.
    fn validate(&self, value: &Value) -> bool;
}

/// Validator applying `StringRules` to textual candidates
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    rules: StringRules,
}

impl StringValidator {
    /// Create a validator with the given rules
    pub fn new(rules: StringRules) -> Self {
        Self { rules }
    }

    /// The rules this validator applies
    pub fn rules(&self) -> &StringRules {
        &self.rules
    }
}

impl DataValidator for StringValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::String
    }

    fn validate(&self, value: &Value) -> bool {
        match value {
            Value::Null => validate_string(None, &self.rules),
            Value::Text(s) => validate_string(Some(s), &self.rules),
            _ => false,
        }
    }
}

/// Validator applying an inclusive `NumericRange` to numeric candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValidator {
    range: NumericRange,
}

impl NumberValidator {
    /// Create a validator with the given range
    pub fn new(range: NumericRange) -> Self {
        Self { range }
    }

    /// The range this validator applies
    pub fn range(&self) -> &NumericRange {
        &self.range
    }
}

impl DataValidator for NumberValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Numeric
    }

    fn validate(&self, value: &Value) -> bool {
        let candidate = match value {
            Value::Int(i) => Some(*i as f64),
            Value::Float(v) => Some(*v),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        };

        match candidate {
            Some(v) => self.range.contains(v),
            None => false,
        }
    }
}

/// Validate a possibly-absent string against the given rules
pub fn validate_string(input: Option<&str>, rules: &StringRules) -> bool {
    let input = match input {
        Some(s) => s,
        None => return rules.can_be_none,
    };

    let length = input.chars().count();
    if length < rules.min_length {
        return false;
    }
    if length > rules.max_length {
        return false;
    }
    if rules.start_with_alpha {
        match input.chars().next() {
            Some(first) if first.is_alphabetic() => {}
            Some(_) => return false,
            None => {}
        }
    }
    if rules.contain_at_least_one_space && !input.contains(' ') {
        return false;
    }
    true
}

/// Basic sanity check for an email address
///
/// Rejects anything containing a space or 7 characters or fewer; otherwise
/// the address must match `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(' ') {
        return false;
    }
    if email.len() > 7 {
        if let Ok(re) = Regex::new(r"[^@]+@[^@]+\.[^@]+") {
            return re.is_match(email);
        }
    }
    false
}
