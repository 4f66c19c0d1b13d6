//! Response types consumed by the classifier

use serde::{Deserialize, Serialize};

/// Broad classification of a response's declared media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `application/xml` or `text/xml`
    Xml,
    /// Any other `text/*` type, including the HTML pages RPD serves when a
    /// request never reaches the application layer
    Text,
    /// Absent or unrecognized media type
    #[default]
    Unknown,
}

impl ContentType {
    /// Classify a raw `Content-Type` header value.
    ///
    /// Parameters (`; charset=...`) are ignored and matching is
    /// case-insensitive. An absent header maps to [`ContentType::Unknown`].
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Unknown;
        };
        let media_type = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match media_type.as_str() {
            "application/json" => Self::Json,
            "application/xml" | "text/xml" => Self::Xml,
            other if other.starts_with("text/") => Self::Text,
            _ => Self::Unknown,
        }
    }
}

/// A fully read HTTP response, produced by the transport and consumed once
/// by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Declared media type classification
    pub content_type: ContentType,
    /// Full response body as text
    pub body: String,
}

impl RawResponse {
    /// Create a response value from its parts
    pub fn new(status: u16, content_type: ContentType, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }
}
