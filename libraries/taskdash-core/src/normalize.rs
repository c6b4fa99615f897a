//! Identifier normalization.
//!
//! Records coming back from the store do not agree on how identifiers are
//! written: the same project may be referenced as `7` in one place and `"7"`
//! in another. Everything here rewrites identifier-shaped fields into a
//! single [`CanonicalForm`] so that comparisons downstream are exact.
//!
//! A field is identifier-shaped when its key is `id`, ends with `Id`
//! (`projectId`, `assignedToId`, ...) or is `members`. Only those fields are
//! coerced; any other field is left alone, although nested objects and
//! arrays under it are still walked.
//!
//! All functions are pure and total. They never fail and never mutate their
//! input, and applying them twice gives the same result as applying them
//! once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Representation identifiers are normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalForm {
    /// Numeric-looking strings become JSON integers
    #[default]
    Number,
    /// Integers become their decimal string
    String,
}

/// Whether `key` names a field holding one or more entity references.
pub fn is_identifier_key(key: &str) -> bool {
    key == "id" || key == "members" || key.ends_with("Id")
}

/// Parse text that is entirely a base-10 integer.
///
/// Leading or trailing whitespace, decimals, the empty string and values
/// outside the `i64` range are rejected.
pub fn parse_numeric_id(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// Coerce the value of an identifier-shaped field.
///
/// Scalars are rewritten into `form` when they denote an integer. Arrays are
/// coerced element-wise and elements that do not denote an integer pass
/// through. Objects are deep-normalized.
pub fn coerce_identifier(value: &Value, form: CanonicalForm) -> Value {
    match value {
        Value::String(text) => match (form, parse_numeric_id(text)) {
            (CanonicalForm::Number, Some(n)) => Value::from(n),
            (CanonicalForm::String, Some(n)) => Value::String(n.to_string()),
            (_, None) => value.clone(),
        },
        Value::Number(number) => match (form, number.as_i64()) {
            (CanonicalForm::String, Some(n)) => Value::String(n.to_string()),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| coerce_identifier(item, form))
                .collect(),
        ),
        Value::Object(_) => normalize(value, form),
        Value::Bool(_) | Value::Null => value.clone(),
    }
}

/// Rebuild `value` with every identifier-shaped field coerced into `form`.
pub fn normalize(value: &Value, form: CanonicalForm) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| normalize(item, form)).collect()),
        Value::Object(fields) => Value::Object(normalize_fields(fields, form)),
        _ => value.clone(),
    }
}

fn normalize_fields(fields: &Map<String, Value>, form: CanonicalForm) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| {
            let value = if is_identifier_key(key) {
                coerce_identifier(value, form)
            } else {
                normalize(value, form)
            };
            (key.clone(), value)
        })
        .collect()
}

/// A [`normalize`] bound to one canonical form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    form: CanonicalForm,
}

impl Normalizer {
    pub fn new(form: CanonicalForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> CanonicalForm {
        self.form
    }

    pub fn normalize(&self, value: &Value) -> Value {
        normalize(value, self.form)
    }
}
