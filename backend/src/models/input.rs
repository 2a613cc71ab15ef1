//! Prediction input and its schema-level parsing.
//!
//! Parsing collects every field-level problem instead of stopping at the first
//! one, so a client sees all rejected fields in a single response. The bounds
//! checked here are the loose schema bounds; the realism envelope lives in
//! [`crate::services::realism`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key used for errors that are not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const FIELD_REQUIRED: &str = "This field is required.";
const FIELD_NULL: &str = "This field may not be null.";
const INVALID_INTEGER: &str = "A valid integer is required.";
const INVALID_BOOLEAN: &str = "Must be a valid boolean.";

const TRUE_VALUES: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];
const FALSE_VALUES: [&str; 6] = ["false", "f", "no", "n", "off", "0"];

/// Inclusive schema bounds for an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBounds {
    pub field: &'static str,
    pub min: i64,
    pub max: i64,
}

pub const HOURS_STUDIED: IntBounds = IntBounds {
    field: "hours_studied",
    min: 1,
    max: 24,
};

pub const PREVIOUS_SCORES: IntBounds = IntBounds {
    field: "previous_scores",
    min: 0,
    max: 100,
};

pub const SLEEP_HOURS: IntBounds = IntBounds {
    field: "sleep_hours",
    min: 1,
    max: 24,
};

pub const SAMPLE_PAPERS: IntBounds = IntBounds {
    field: "sample_papers",
    min: 0,
    max: 20,
};

pub const EXTRACURRICULAR: &str = "extracurricular";

impl IntBounds {
    /// Check a parsed value against the bounds.
    pub fn check(&self, value: i64) -> Result<i64, String> {
        if value < self.min {
            Err(format!(
                "Ensure this value is greater than or equal to {}.",
                self.min
            ))
        } else if value > self.max {
            Err(format!(
                "Ensure this value is less than or equal to {}.",
                self.max
            ))
        } else {
            Ok(value)
        }
    }

    fn extract(&self, map: &Map<String, Value>, errors: &mut SchemaErrors) -> Option<i64> {
        let raw = lookup(map, self.field, errors)?;
        match parse_integer(raw).and_then(|v| self.check(v)) {
            Ok(value) => Some(value),
            Err(msg) => {
                errors.add(self.field, msg);
                None
            }
        }
    }
}

/// A schema-valid prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Hours studied per day
    pub hours_studied: i64,
    /// Previous academic score (0-100)
    pub previous_scores: i64,
    /// Participation in extracurricular activities
    pub extracurricular: bool,
    /// Hours of sleep per day
    pub sleep_hours: i64,
    /// Number of sample papers practiced
    pub sample_papers: i64,
}

impl PredictionInput {
    pub const fn new(
        hours_studied: i64,
        previous_scores: i64,
        extracurricular: bool,
        sleep_hours: i64,
        sample_papers: i64,
    ) -> Self {
        Self {
            hours_studied,
            previous_scores,
            extracurricular,
            sleep_hours,
            sample_papers,
        }
    }

    /// Parse and schema-validate a raw JSON request body.
    ///
    /// Unknown keys are ignored. Integer fields accept JSON integers, integral
    /// floats and numeric strings; the boolean field accepts the usual textual
    /// and 0/1 spellings.
    ///
    /// # Errors
    /// Returns every field-level violation found, keyed by field name.
    pub fn from_json(body: &Value) -> Result<Self, SchemaErrors> {
        let map = match body {
            Value::Object(map) => map,
            Value::Null => return Err(SchemaErrors::non_field("No data provided")),
            other => {
                return Err(SchemaErrors::non_field(format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(other)
                )))
            }
        };

        let mut errors = SchemaErrors::default();
        let hours_studied = HOURS_STUDIED.extract(map, &mut errors);
        let previous_scores = PREVIOUS_SCORES.extract(map, &mut errors);
        let extracurricular = extract_bool(map, EXTRACURRICULAR, &mut errors);
        let sleep_hours = SLEEP_HOURS.extract(map, &mut errors);
        let sample_papers = SAMPLE_PAPERS.extract(map, &mut errors);

        match (
            hours_studied,
            previous_scores,
            extracurricular,
            sleep_hours,
            sample_papers,
        ) {
            (Some(h), Some(p), Some(e), Some(s), Some(n)) if errors.is_empty() => {
                Ok(Self::new(h, p, e, s, n))
            }
            _ => Err(errors),
        }
    }
}

/// Field-level schema violations, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaErrors(BTreeMap<String, Vec<String>>);

impl SchemaErrors {
    /// Errors consisting of a single non-field message.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msgs)| format!("{}: {}", field, msgs.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for SchemaErrors {}

fn lookup<'a>(
    map: &'a Map<String, Value>,
    field: &str,
    errors: &mut SchemaErrors,
) -> Option<&'a Value> {
    match map.get(field) {
        None => {
            errors.add(field, FIELD_REQUIRED);
            None
        }
        Some(Value::Null) => {
            errors.add(field, FIELD_NULL);
            None
        }
        Some(value) => Some(value),
    }
}

fn parse_integer(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                // `as` saturates, so huge integral values still fail the range check
                Some(f) if f.fract() == 0.0 => Ok(f as i64),
                _ => Err(INVALID_INTEGER.to_string()),
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            // "8.000" is accepted as 8, "8.5" is not
            let digits = match trimmed.split_once('.') {
                Some((int_part, frac)) if frac.chars().all(|c| c == '0') => int_part,
                _ => trimmed,
            };
            match digits.parse::<i64>() {
                Ok(i) => Ok(i),
                Err(_) => saturate_integer(digits).ok_or_else(|| INVALID_INTEGER.to_string()),
            }
        }
        _ => Err(INVALID_INTEGER.to_string()),
    }
}

/// Clamp a well-formed integer literal that overflows `i64` to the nearest
/// bound, so the range check reports it instead of the type check.
fn saturate_integer(digits: &str) -> Option<i64> {
    let (negative, magnitude) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.strip_prefix('+').unwrap_or(digits)),
    };
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => {
            let lowered = s.trim().to_lowercase();
            if TRUE_VALUES.contains(&lowered.as_str()) {
                Some(true)
            } else if FALSE_VALUES.contains(&lowered.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn extract_bool(map: &Map<String, Value>, field: &str, errors: &mut SchemaErrors) -> Option<bool> {
    let raw = lookup(map, field, errors)?;
    let parsed = parse_bool(raw);
    if parsed.is_none() {
        errors.add(field, INVALID_BOOLEAN);
    }
    parsed
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
