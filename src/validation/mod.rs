//! Schema validation for submitted records
//!
//! Input arrives as an untyped JSON object (the body of a form submission).
//! Validation never fails hard: every broken constraint becomes one
//! human-readable message keyed by the wire name of the field.

mod coerce;
pub mod equipment;
pub mod maintenance;

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{RecordKind, ValidatedRecord};

pub use equipment::validate_equipment;
pub use maintenance::validate_maintenance;

/// Field-level validation messages, keyed by camelCase field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Names of the fields that failed, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Merge `validator` derive errors; fields already flagged during
    /// coercion keep their coercion message only.
    fn absorb(&mut self, errors: validator::ValidationErrors) {
        for (field, list) in errors.field_errors() {
            let name = camel_case(&field.to_string());
            if self.contains(&name) {
                continue;
            }
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.add(name.clone(), message);
            }
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validate `input` as a record of `kind`, with dates checked against the
/// current UTC day.
pub fn validate(kind: RecordKind, input: &Value) -> Result<ValidatedRecord, FieldErrors> {
    validate_at(kind, input, Utc::now().date_naive())
}

/// Validate `input` as a record of `kind` against a fixed `today`.
pub fn validate_at(
    kind: RecordKind,
    input: &Value,
    today: NaiveDate,
) -> Result<ValidatedRecord, FieldErrors> {
    match kind {
        RecordKind::Equipment => validate_equipment(input, today).map(ValidatedRecord::Equipment),
        RecordKind::Maintenance => {
            validate_maintenance(input, today).map(ValidatedRecord::Maintenance)
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
