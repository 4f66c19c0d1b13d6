//! RPD operations
//!
//! [`RpdClient`] owns the HTTP transport and the endpoint configuration,
//! and drives the six RPD calls: login, logout, group check, job
//! submission, vault stock fetch, and password update. Each operation
//! reads the response fully into a [`RawResponse`] and routes it through
//! its [`Operation`] classifier; no interpretation happens on the wire.
//!
//! Timeout and retry policy around these calls belongs to the caller.

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::response::{ContentType, Operation, RawResponse};
use crate::schema::{GroupsPayload, LoginPayload, VaultStock};
use crate::session::Session;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace, warn};

#[cfg(test)]
mod tests;

/// Header RPD reads the session token from
const TOKEN_HEADER: &str = "token";

/// Client for the RPD REST service
#[derive(Debug, Clone)]
pub struct RpdClient {
    http: reqwest::Client,
    config: NetworkConfig,
}

impl RpdClient {
    /// Create a client for the configured RPD instance
    pub fn new(config: NetworkConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Endpoint configuration in use
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Log in with the supplied credentials and return the session token.
    ///
    /// The credentials travel as a web form (`name`, `pwd`); the token
    /// authenticates every later call.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(self.config.login_url())
            .header(ACCEPT, "application/json")
            .form(&[("name", user_name), ("pwd", password)])
            .send()
            .await?;

        let raw = read_response(response).await?;
        let payload = Operation::login().classify(&raw)?;
        trace!(body = %raw.body, "login response");

        let login: LoginPayload = decode_payload(payload)?;
        debug!(user = user_name, "logged in to RPD");
        Ok(login.token)
    }

    /// Log the session's user out of RPD
    pub async fn logout(&self, session: &Session) -> Result<()> {
        let response = self
            .http
            .post(self.config.logout_url(&session.user_name))
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, &session.token)
            .send()
            .await?;

        let raw = read_response(response).await?;
        Operation::logout().classify(&raw)?;
        debug!(user = %session.user_name, "logged out of RPD");
        Ok(())
    }

    /// True when the session's user belongs to the dev group.
    ///
    /// RPD returns the `User.Groups` attribute for the quoted user name; a
    /// user in a single group gets it as a bare string rather than an
    /// array.
    pub async fn is_user_admin(&self, session: &Session) -> Result<bool> {
        let criteria = format!("\"{}\"", session.user_name);
        let response = self
            .http
            .get(self.config.check_group_url())
            .query(&[("attribute", "User.Groups"), ("criteria", criteria.as_str())])
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, &session.token)
            .send()
            .await?;

        let raw = read_response(response).await?;
        let payload = Operation::check_group().classify(&raw)?;
        trace!(body = %raw.body, "group check response");

        let groups: GroupsPayload = decode_payload(payload)?;
        Ok(groups.is_member("dev"))
    }

    /// Submit a file to the RPD data input device.
    ///
    /// The file travels as a `file` multipart part with a text/plain body.
    /// RPD acknowledges receipt with 202; once accepted, the local file is
    /// deleted best-effort — a failed delete is logged, never an error.
    pub async fn submit_job(&self, session: &Session, file: &Path) -> Result<()> {
        let contents = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let part = multipart::Part::bytes(contents)
            .file_name(file_name)
            .mime_str("text/plain")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.config.submit_job_url())
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, &session.token)
            .multipart(form)
            .send()
            .await?;

        let raw = read_response(response).await?;
        Operation::submit_job().classify(&raw)?;

        debug!(path = %file.display(), "file accepted by RPD");
        if let Err(err) = tokio::fs::remove_file(file).await {
            warn!(path = %file.display(), %err, "submitted file could not be removed");
        }
        Ok(())
    }

    /// Fetch the current vault stock document
    pub async fn vault_stock(&self, session: &Session) -> Result<VaultStock> {
        let response = self
            .http
            .get(self.config.vault_url())
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, &session.token)
            .send()
            .await?;

        let raw = read_response(response).await?;
        let payload = Operation::vault_stock().classify(&raw)?;
        trace!(body = %raw.body, "vault stock response");

        decode_payload(payload)
    }

    /// Ask RPD to update the stored password for an application.
    ///
    /// May be refused by the service, for example when the new password is
    /// too similar to the previous one; that refusal arrives as a
    /// structured error body.
    pub async fn update_password(
        &self,
        session: &Session,
        app_name: &str,
        body: &Value,
    ) -> Result<()> {
        let response = self
            .http
            .patch(self.config.password_update_url(app_name))
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, &session.token)
            .json(body)
            .send()
            .await?;

        let raw = read_response(response).await?;
        Operation::password_update().classify(&raw)?;
        debug!(app = app_name, "password updated");
        Ok(())
    }
}

/// Read a transport response fully into a [`RawResponse`]
async fn read_response(response: reqwest::Response) -> Result<RawResponse> {
    let status = response.status().as_u16();
    let content_type = ContentType::from_header(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
    );
    let body = response.text().await?;
    Ok(RawResponse::new(status, content_type, body))
}

/// Decode a classified success payload into its schema type
fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| Error::payload_shape(err.to_string()))
}
