//! Field definitions, coercion and validation rules

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"));

/// Accepted date layouts, ISO first
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// How a raw input string is turned into a typed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Integer,
    Float,
}

/// Predicate applied to a coerced value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Any non-empty value
    Present,
    /// Exactly this many ASCII digits
    Digits(usize),
    MinInteger(i64),
    MinFloat(f64),
    Email,
    Date,
}

/// A coerced field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Text(s) => JsonValue::String(s.clone()),
            FieldValue::Integer(n) => JsonValue::from(*n),
            FieldValue::Float(x) => JsonValue::from(*x),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Integer(_) | FieldValue::Float(_) => None,
        }
    }
}

/// Declaration of a single form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Wire key in the submitted payload
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub coercion: Coercion,
    pub rule: Rule,
    /// Shown when coercion or the rule fails
    pub message: &'static str,
    /// Shown when a required field is empty
    pub required_message: &'static str,
}

impl FieldSpec {
    /// Required free-text field
    pub const fn text(
        name: &'static str,
        label: &'static str,
        required_message: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            required: true,
            coercion: Coercion::Text,
            rule: Rule::Present,
            message: required_message,
            required_message,
        }
    }

    pub const fn with_rule(self, coercion: Coercion, rule: Rule, message: &'static str) -> Self {
        Self {
            coercion,
            rule,
            message,
            ..self
        }
    }

    /// Coerce and check a raw value.
    ///
    /// `Ok(None)` means an optional field was left empty.
    pub fn validate(&self, raw: &str) -> Result<Option<FieldValue>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return if self.required {
                Err(self.required_message.to_string())
            } else {
                Ok(None)
            };
        }

        let value = self.coerce(trimmed).ok_or_else(|| self.message.to_string())?;
        if self.rule_holds(&value) {
            Ok(Some(value))
        } else {
            Err(self.message.to_string())
        }
    }

    fn coerce(&self, trimmed: &str) -> Option<FieldValue> {
        match self.coercion {
            Coercion::Text => Some(FieldValue::Text(trimmed.to_string())),
            Coercion::Integer => trimmed.parse::<i64>().ok().map(FieldValue::Integer),
            Coercion::Float => trimmed
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(FieldValue::Float),
        }
    }

    fn rule_holds(&self, value: &FieldValue) -> bool {
        match (self.rule, value) {
            (Rule::Present, _) => true,
            (Rule::Digits(n), FieldValue::Text(s)) => {
                s.chars().count() == n && s.chars().all(|c| c.is_ascii_digit())
            }
            (Rule::MinInteger(min), FieldValue::Integer(v)) => *v >= min,
            (Rule::MinFloat(min), FieldValue::Float(v)) => *v >= min,
            (Rule::Email, FieldValue::Text(s)) => EMAIL_RE.is_match(s),
            (Rule::Date, FieldValue::Text(s)) => DATE_FORMATS
                .iter()
                .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok()),
            // Rule and coercion disagree: the schema is malformed
            _ => false,
        }
    }
}
