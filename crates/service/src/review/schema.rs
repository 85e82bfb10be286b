//! Declarative field rules and the single validator that checks them.
//!
//! A schema is an ordered table of [`FieldRule`]s. [`validate`] walks it in
//! order, stops at the first failing field and reports that field's message.
//! Keys not named in the schema are ignored.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string; empty strings are rejected when required, NUL characters always.
    Text,
    /// Whole number within `min..=max`. Numeric strings are converted.
    Integer { min: i64, max: i64 },
    /// RFC 3339 string or epoch milliseconds.
    Timestamp,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub const REVIEW_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule::required("title", FieldKind::Text),
        FieldRule::required("artist", FieldKind::Text),
        FieldRule::required("reviewer", FieldKind::Text),
        FieldRule::required("rating", FieldKind::Integer { min: 1, max: 5 }),
        FieldRule::required("review", FieldKind::Text),
        FieldRule::optional("picture", FieldKind::Text),
        FieldRule::optional("date", FieldKind::Timestamp),
    ],
};

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

/// Typed values of the fields that passed validation.
#[derive(Debug, Default)]
pub struct Checked(HashMap<&'static str, FieldValue>);

impl Checked {
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.0.remove(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn take_integer(&mut self, name: &str) -> Option<i64> {
        match self.0.remove(name) {
            Some(FieldValue::Integer(n)) => Some(n),
            _ => None,
        }
    }

    pub fn take_timestamp(&mut self, name: &str) -> Option<DateTime<Utc>> {
        match self.0.remove(name) {
            Some(FieldValue::Timestamp(t)) => Some(t),
            _ => None,
        }
    }
}

fn fail(msg: String) -> ServiceError {
    ServiceError::Validation(msg)
}

/// Check `value` against `schema`, returning the typed fields on success.
pub fn validate(schema: &Schema, value: &Value) -> Result<Checked, ServiceError> {
    let obj = value
        .as_object()
        .ok_or_else(|| fail("\"value\" must be of type object".into()))?;

    let mut checked = Checked::default();
    for rule in schema.fields {
        let raw = match obj.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    return Err(fail(format!("\"{}\" is required", rule.name)));
                }
                continue;
            }
            Some(v) => v,
        };
        if let Some(v) = check_field(rule, raw)? {
            checked.0.insert(rule.name, v);
        }
    }
    Ok(checked)
}

fn check_field(rule: &FieldRule, raw: &Value) -> Result<Option<FieldValue>, ServiceError> {
    let name = rule.name;
    match rule.kind {
        FieldKind::Text => {
            let s = raw
                .as_str()
                .ok_or_else(|| fail(format!("\"{name}\" must be a string")))?;
            if s.is_empty() {
                // an empty optional field is treated as absent
                if rule.required {
                    return Err(fail(format!("\"{name}\" is not allowed to be empty")));
                }
                return Ok(None);
            }
            if s.contains('\0') {
                return Err(fail(format!("\"{name}\" must not contain null characters")));
            }
            Ok(Some(FieldValue::Text(s.to_string())))
        }
        FieldKind::Integer { min, max } => {
            let n = match raw {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
                _ => None,
            }
            .ok_or_else(|| fail(format!("\"{name}\" must be a number")))?;
            if n.fract() != 0.0 {
                return Err(fail(format!("\"{name}\" must be an integer")));
            }
            if n < min as f64 {
                return Err(fail(format!("\"{name}\" must be greater than or equal to {min}")));
            }
            if n > max as f64 {
                return Err(fail(format!("\"{name}\" must be less than or equal to {max}")));
            }
            Ok(Some(FieldValue::Integer(n as i64)))
        }
        FieldKind::Timestamp => {
            let parsed = match raw {
                Value::String(s) => DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|d| d.with_timezone(&Utc)),
                Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
                _ => None,
            };
            parsed
                .map(|t| Some(FieldValue::Timestamp(t)))
                .ok_or_else(|| fail(format!("\"{name}\" must be a valid date")))
        }
    }
}
