//! Success payload schemas
//!
//! Derived models for the JSON bodies RPD returns on success. Every
//! list-typed field goes through the lenient adapter: the service
//! collapses one-element collections to a bare object or scalar, so no
//! field can assume a real array on the wire.

use crate::decode::lenient_seq;
use serde::Deserialize;

/// Login response body; the token authenticates all later calls
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoginPayload {
    /// Opaque session token
    pub token: String,
}

/// Group membership response for the `User.Groups` attribute lookup
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GroupsPayload {
    /// Groups the user belongs to; a single group arrives as a bare string
    #[serde(
        rename = "User.Groups",
        default,
        deserialize_with = "lenient_seq"
    )]
    pub groups: Vec<String>,
}

impl GroupsPayload {
    /// Case-insensitive membership test
    pub fn is_member(&self, group: &str) -> bool {
        self.groups.iter().any(|name| name.eq_ignore_ascii_case(group))
    }
}

/// Vault stock document: card stock volumes per environment
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct VaultStock {
    /// Stock environments (production, test); one environment arrives as a
    /// bare object
    #[serde(default, deserialize_with = "lenient_seq")]
    pub environments: Vec<StockEnvironment>,
}

/// Stock held in one vault environment
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StockEnvironment {
    /// Environment name
    #[serde(default)]
    pub name: String,
    /// Stock line items; a single item arrives as a bare object
    #[serde(default, deserialize_with = "lenient_seq")]
    pub stock: Vec<StockItem>,
}

/// One card stock line item
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StockItem {
    /// Card class identifier
    #[serde(default)]
    pub class: String,
    /// Units held
    #[serde(default)]
    pub volume: u64,
    /// Physical location code
    #[serde(default)]
    pub location: String,
}
