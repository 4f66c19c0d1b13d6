//! Network configuration
//!
//! The RPD endpoint URLs are composed from a YAML file holding the
//! protocol/host/port triple and one relative path per operation. Every
//! entry is required; a missing entry fails at load time with the field
//! named, never at call time.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Raw file shape; all entries optional so missing ones can be reported
/// by name instead of as a serde parse failure.
#[derive(Debug, Default, Deserialize)]
struct NetworkConfigFile {
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    login: Option<String>,
    logout: Option<String>,
    vault: Option<String>,
    check_group: Option<String>,
    submit_job: Option<String>,
    password_update: Option<String>,
}

/// Validated RPD endpoint configuration.
///
/// A plain owned value handed to [`RpdClient`]; nothing here is
/// process-global or mutable after load.
///
/// [`RpdClient`]: crate::client::RpdClient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    base: String,
    login: String,
    logout: String,
    vault: String,
    check_group: String,
    submit_job: String,
    password_update: String,
}

impl NetworkConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Load and validate configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let file: NetworkConfigFile = serde_yaml::from_str(text)?;

        let protocol = require(file.protocol, "protocol")?;
        let host = require(file.host, "host")?;
        let port = file.port.ok_or_else(|| Error::missing_field("port"))?;
        let base = format!("{protocol}://{host}:{port}");

        // Catches an illegal character or empty host before any request is built
        Url::parse(&base)?;

        Ok(Self {
            login: join(&base, &require(file.login, "login")?),
            logout: join(&base, &require(file.logout, "logout")?),
            vault: join(&base, &require(file.vault, "vault")?),
            check_group: join(&base, &require(file.check_group, "check_group")?),
            submit_job: join(&base, &require(file.submit_job, "submit_job")?),
            password_update: join(&base, &require(file.password_update, "password_update")?),
            base,
        })
    }

    /// Base URL (`protocol://host:port`)
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Login endpoint
    pub fn login_url(&self) -> &str {
        &self.login
    }

    /// Logout endpoint; RPD takes the user name as a trailing path segment
    pub fn logout_url(&self, user_name: &str) -> String {
        format!("{}/{user_name}", self.logout.trim_end_matches('/'))
    }

    /// Vault stock endpoint
    pub fn vault_url(&self) -> &str {
        &self.vault
    }

    /// Group membership endpoint
    pub fn check_group_url(&self) -> &str {
        &self.check_group
    }

    /// Job submission endpoint
    pub fn submit_job_url(&self) -> &str {
        &self.submit_job
    }

    /// Password update endpoint; RPD takes the application name as a
    /// trailing path segment
    pub fn password_update_url(&self, app_name: &str) -> String {
        format!("{}/{app_name}", self.password_update.trim_end_matches('/'))
    }
}

fn require(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::missing_field(field)),
    }
}

fn join(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
