//! Response classification
//!
//! Decides, per response, whether the body is a success payload, a
//! structured error payload (JSON or XML), or an unclassifiable fallback
//! page, and normalizes the failure cases into an [`ErrorRecord`].
//!
//! [`ErrorRecord`]: crate::error::ErrorRecord

mod classify;
mod types;

pub use classify::Operation;
pub use types::{ContentType, RawResponse};
