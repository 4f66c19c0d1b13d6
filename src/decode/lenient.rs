//! Scalar-or-array normalization
//!
//! Generic over the element decoder and independent of any particular
//! schema framework: the core is a standalone function over a parsed JSON
//! value, with a serde adapter layered on top for derived schemas.

use crate::error::Result;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// Decode a declared list field into a sequence regardless of wire arity.
///
/// By the token's kind:
/// - array: decode each element in order; an empty array yields an empty
///   sequence
/// - object, string, number, or boolean: decode the single token and wrap
///   it as a one-element sequence
/// - null: empty sequence, never an error
///
/// Decoding is total over every value kind; the only failures are those of
/// `element` itself. A stream that is not well-formed JSON at this
/// position cannot reach this function — it fails in the text-level parse
/// that produced the value, as a malformed-payload error.
pub fn decode_list<E, D>(token: &Value, element: D) -> Result<Vec<E>>
where
    D: Fn(&Value) -> Result<E>,
{
    match token {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(element).collect(),
        single => Ok(vec![element(single)?]),
    }
}

/// `#[serde(deserialize_with = "lenient_seq")]` adapter for list-typed
/// schema fields, built on the same normalization as [`decode_list`].
///
/// Pair with `#[serde(default)]` so an absent field also yields an empty
/// sequence.
pub fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let token = Value::deserialize(deserializer)?;
    match token {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect(),
        single => Ok(vec![serde_json::from_value(single).map_err(D::Error::custom)?]),
    }
}
