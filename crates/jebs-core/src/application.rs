//! # Employment Applications
//!
//! Schema-less form submissions and the plain-text email built from them.
//!
//! A submission is any JSON object. Field order is preserved from the
//! request body, empty values are dropped, and every remaining field is
//! rendered as one `key: value` line. No field name is special-cased except
//! when building the subject line.

use crate::error::{ApiError, ApiResult};
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// Sender identity used for application emails
pub const APPLICATION_SENDER: &str = "Jeb's Website <noreply@resend.dev>";

/// First line of every application email body
pub const APPLICATION_BANNER: &str = "New employment application submitted:";

/// Value of one submitted form field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(Number),
    /// JSON `null`
    Absent,
    /// Arrays and nested objects. Arrays render as their elements joined
    /// with `,` (`Mon,Fri`), objects as compact JSON.
    Structured(Value),
}

impl FieldValue {
    /// Absent values and empty text are dropped from the transcript
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            FieldValue::Structured(_) => true,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Structured(other),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => f.write_str(&plain_number(n)),
            FieldValue::Absent => Ok(()),
            FieldValue::Structured(v) => f.write_str(&plain_text(v)),
        }
    }
}

/// Whole-valued floats print without a fraction (`19.0` → `19`)
fn plain_number(n: &Number) -> String {
    match n.as_f64() {
        Some(x) if !n.is_i64() && !n.is_u64() && x.fract() == 0.0 && x.abs() < 1e21 => {
            format!("{x:.0}")
        }
        _ => n.to_string(),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => plain_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// An application form submission, in the order the fields were posted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationSubmission {
    fields: Vec<(String, FieldValue)>,
}

impl ApplicationSubmission {
    /// Parse a request body. Anything but a JSON object is rejected.
    pub fn from_json(body: &[u8]) -> ApiResult<Self> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ApiError::Serialization(format!(
                "Application body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rendered value of a field, or `""` when it is missing or falsy
    pub fn field_text(&self, key: &str) -> String {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .filter(|(_, v)| v.is_truthy())
            .map(|(_, v)| v.to_string())
            .unwrap_or_default()
    }

    /// `key: value` lines for every non-empty field, newline separated
    pub fn transcript(&self) -> String {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn subject(&self) -> String {
        format!(
            "Employment Application - {} {}",
            self.field_text("firstName"),
            self.field_text("lastName")
        )
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for ApplicationSubmission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A plain-text transactional email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    /// Build the notification email for a submission
    pub fn application(submission: &ApplicationSubmission, to: impl Into<String>) -> Self {
        Self {
            from: APPLICATION_SENDER.to_string(),
            to: vec![to.into()],
            subject: submission.subject(),
            text: format!("{APPLICATION_BANNER}\n\n{}", submission.transcript()),
        }
    }
}
