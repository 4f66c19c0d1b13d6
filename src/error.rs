//! Error types for the RPD client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The taxonomy separates three failure families the caller can assert on:
//! the service answered with a structured error body (`Remote`), the
//! response matched no recognized shape (`UnrecognizedResponse`), or the
//! body claimed to be JSON/XML but would not parse (`MalformedJson`,
//! `MalformedXml`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The normalized, format-independent representation of a service-reported
/// failure.
///
/// All four display fields are plain strings and never null; fields the
/// wire body omits default to the empty string so display code can render
/// them without checks. `cause` carries diagnostic detail (for example the
/// underlying parse fault) and must never be the only information shown to
/// a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Service error code, or a synthesized "<operation> Error:" label
    #[serde(default)]
    pub code: String,
    /// Short error name
    #[serde(default)]
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub message: String,
    /// Remediation hint, shown to end users verbatim
    #[serde(default)]
    pub action: String,
    /// Underlying fault, diagnostics only
    #[serde(skip)]
    pub cause: Option<String>,
}

impl ErrorRecord {
    /// Create a record from the four display fields
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            message: message.into(),
            action: action.into(),
            cause: None,
        }
    }

    /// Attach an underlying fault description
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.code, self.message, self.action)
    }
}

/// The main error type for the RPD client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Classification Errors
    // ============================================================================
    /// The service responded in a recognized structured format (JSON or
    /// XML) indicating failure; fields are the service's own, verbatim.
    #[error("RPD error: {0}")]
    Remote(ErrorRecord),

    /// The status/content-type combination matched none of the success or
    /// structured-error rules (e.g. an HTML page from the wrong host).
    #[error("unrecognized RPD response: {0}")]
    UnrecognizedResponse(ErrorRecord),

    /// Body claimed to be JSON but failed to parse as such
    #[error("malformed JSON payload")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },

    /// Body claimed to be XML but failed to parse as such
    #[error("malformed XML payload: {message}")]
    MalformedXml { message: String },

    /// Success payload parsed as JSON but did not match the expected schema
    #[error("unexpected payload shape: {message}")]
    PayloadShape { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// Request never produced a readable response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Configuration value rejected
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Required entry absent or blank in the configuration file
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    /// Configuration file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Local file could not be read or removed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a malformed-XML error
    pub fn malformed_xml(message: impl Into<String>) -> Self {
        Self::MalformedXml {
            message: message.into(),
        }
    }

    /// Create a payload-shape error
    pub fn payload_shape(message: impl Into<String>) -> Self {
        Self::PayloadShape {
            message: message.into(),
        }
    }

    /// View this error as a displayable record.
    ///
    /// `Remote` and `UnrecognizedResponse` carry their record as-is; every
    /// other variant synthesizes a generic processing record with the
    /// source fault attached as `cause`.
    pub fn record(&self) -> ErrorRecord {
        match self {
            Self::Remote(record) | Self::UnrecognizedResponse(record) => record.clone(),
            Self::MalformedJson { source } => {
                ErrorRecord::new("Processing Error:", "", self.to_string(), NOTIFY_DEV_TEAM)
                    .with_cause(source.to_string())
            }
            Self::MalformedXml { message } => {
                ErrorRecord::new("Processing Error:", "", self.to_string(), NOTIFY_DEV_TEAM)
                    .with_cause(message.clone())
            }
            other => ErrorRecord::new("Processing Error:", "", other.to_string(), NOTIFY_DEV_TEAM),
        }
    }

    /// True when the failure came from a decoded service error body
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Standard remediation hint for faults the user cannot resolve themselves
pub const NOTIFY_DEV_TEAM: &str = "Please notify Dev Team.";

/// Result type alias for the RPD client
pub type Result<T> = std::result::Result<T, Error>;
