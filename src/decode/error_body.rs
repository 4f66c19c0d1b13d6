//! Structured error body decoders
//!
//! Both wire formats map onto the same four display fields. Missing or
//! unrecognized fields default to the empty string, never null; a body
//! that claims a format but fails its parser is a distinct
//! malformed-payload condition.

use super::xml;
use crate::error::{Error, ErrorRecord, Result};
use serde_json::Value;

/// Decode a JSON error body into an [`ErrorRecord`].
///
/// Field mapping: object keys `code`, `name`, `message`, `action`, each
/// carried verbatim when present.
pub fn from_json(body: &str) -> Result<ErrorRecord> {
    let value: Value =
        serde_json::from_str(body).map_err(|source| Error::MalformedJson { source })?;
    Ok(record_from_value(&value))
}

/// Decode an XML error body into an [`ErrorRecord`].
///
/// Accepts the fields either directly under the document element or nested
/// one level down in an `<error>` element.
pub fn from_xml(body: &str) -> Result<ErrorRecord> {
    let value = xml::parse(body)?;
    let fields = match value.get("error") {
        Some(nested @ Value::Object(_)) => nested,
        _ => &value,
    };
    Ok(record_from_value(fields))
}

fn record_from_value(value: &Value) -> ErrorRecord {
    ErrorRecord {
        code: text_field(value, "code"),
        name: text_field(value, "name"),
        message: text_field(value, "message"),
        action: text_field(value, "action"),
        cause: None,
    }
}

/// A field as display text: strings verbatim, absent or null as empty
fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
