//! # Error Map
//!
//! Field-level validation messages shown inline in the form. The map is
//! replaced wholesale on every submit attempt and cleared with the session.

use serde_json::Value;
use std::collections::BTreeMap;

/// Key under which non-field messages are stored
pub const GENERIC_ERROR_KEY: &str = "error";

/// Shape of a rejected submit, decided once from the response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// `{"errors": {"field": "message", ...}}`
    FieldErrors(BTreeMap<String, String>),
    /// `{"error": "message"}`, or anything unrecognized
    GenericError(String),
}

impl SubmitFailure {
    /// Classify the body of a 400 response.
    ///
    /// `fallback` is used when the body carries neither an `errors` object
    /// nor an `error` string.
    pub fn from_bad_request(body: &str, fallback: &str) -> Self {
        let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(body) else {
            return SubmitFailure::GenericError(fallback.to_string());
        };

        if let Some(Value::Object(errors)) = object.remove("errors") {
            let fields = errors
                .into_iter()
                .map(|(field, message)| (field, message_text(message)))
                .collect();
            return SubmitFailure::FieldErrors(fields);
        }

        match object.remove(GENERIC_ERROR_KEY) {
            Some(Value::String(message)) => SubmitFailure::GenericError(message),
            _ => SubmitFailure::GenericError(fallback.to_string()),
        }
    }
}

fn message_text(message: Value) -> String {
    match message {
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(message_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with the messages of `failure`
    pub fn replace(&mut self, failure: SubmitFailure) {
        self.entries = match failure {
            SubmitFailure::FieldErrors(fields) => fields,
            SubmitFailure::GenericError(message) => {
                BTreeMap::from([(GENERIC_ERROR_KEY.to_string(), message)])
            }
        };
    }

    /// Replace every entry with one generic message
    pub fn replace_with_generic(&mut self, message: impl Into<String>) {
        self.replace(SubmitFailure::GenericError(message.into()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Message not tied to a field
    pub fn generic(&self) -> Option<&str> {
        self.get(GENERIC_ERROR_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}
