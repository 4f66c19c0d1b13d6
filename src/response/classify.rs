//! The four-rule response classifier
//!
//! RPD is known to answer with an HTML or plain-text body when a request
//! never reached the application layer (wrong host or port), so the
//! declared content type, not the status code alone, gates interpretation.
//! A 200 with a non-JSON content type is never treated as success.

use super::types::{ContentType, RawResponse};
use crate::decode::error_body;
use crate::error::{Error, ErrorRecord, Result, NOTIFY_DEV_TEAM};
use serde_json::Value;

/// Per-call-site classification parameters.
///
/// Each RPD operation supplies its own expected success status (202 for
/// job submission, 200 for everything else) and the operation name used
/// when synthesizing an error for an unclassifiable response. The
/// classifier is otherwise identical across call sites: pure, stateless,
/// and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    label: &'static str,
    success_status: u16,
}

impl Operation {
    /// Create an operation with an explicit label and success status
    pub fn new(label: &'static str, success_status: u16) -> Self {
        Self {
            label,
            success_status,
        }
    }

    /// Login form post, expects 200
    pub fn login() -> Self {
        Self::new("Login", 200)
    }

    /// Logout post, expects 200
    pub fn logout() -> Self {
        Self::new("Logout", 200)
    }

    /// Group membership lookup, expects 200
    pub fn check_group() -> Self {
        Self::new("Check Group", 200)
    }

    /// Multipart job submission, expects 202 (file accepted by RPD)
    pub fn submit_job() -> Self {
        Self::new("Submit Job", 202)
    }

    /// Vault stock fetch, expects 200
    pub fn vault_stock() -> Self {
        Self::new("Vault Stock", 200)
    }

    /// Password update patch, expects 200
    pub fn password_update() -> Self {
        Self::new("Password Update", 200)
    }

    /// Operation name used in synthesized error codes
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Expected HTTP success status
    pub fn success_status(&self) -> u16 {
        self.success_status
    }

    /// Classify a fully read response into a success payload or an error.
    ///
    /// Decision table, first match wins:
    /// 1. expected status and JSON content type: success, parsed body
    /// 2. JSON content type: failure, body decoded as a JSON error record
    /// 3. XML content type: failure, body decoded as an XML error record
    /// 4. anything else: failure, synthesized [`Error::UnrecognizedResponse`]
    ///
    /// Under rules 1-3 a body that fails its own format's parser surfaces
    /// as [`Error::MalformedJson`] / [`Error::MalformedXml`] with the parse
    /// fault attached, distinct from rule 4's wrong-content-type record.
    pub fn classify(&self, response: &RawResponse) -> Result<Value> {
        if response.status == self.success_status && response.content_type == ContentType::Json {
            return serde_json::from_str(&response.body)
                .map_err(|source| Error::MalformedJson { source });
        }

        match response.content_type {
            ContentType::Json => Err(Error::Remote(error_body::from_json(&response.body)?)),
            ContentType::Xml => Err(Error::Remote(error_body::from_xml(&response.body)?)),
            ContentType::Text | ContentType::Unknown => {
                Err(Error::UnrecognizedResponse(self.unrecognized(response)))
            }
        }
    }

    /// Build the rule-4 record for a response in no recognized format.
    ///
    /// The raw body rides along in `name` so diagnostics keep whatever the
    /// intermediary actually sent.
    fn unrecognized(&self, response: &RawResponse) -> ErrorRecord {
        ErrorRecord {
            code: format!("{} Error:", self.label),
            name: response.body.clone(),
            message: "Response is not valid JSON/XML".to_string(),
            action: NOTIFY_DEV_TEAM.to_string(),
            cause: None,
        }
    }
}
