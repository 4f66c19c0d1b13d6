//! # RPD Client
//!
//! Client library for the RPD print-service REST API.
//!
//! RPD answers with inconsistently shaped bodies: JSON success payloads,
//! JSON error payloads, XML error payloads, or a raw HTML page when the
//! request never reached the application layer. This crate normalizes all
//! of them into one well-typed outcome.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rpd_client::{NetworkConfig, RpdClient, Session, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = NetworkConfig::from_file("network.yaml")?;
//!     let client = RpdClient::new(config)?;
//!
//!     let token = client.login("DespatchApp", "secret").await?;
//!     let session = Session::new("DespatchApp", token);
//!
//!     client.submit_job(&session, "batch-001.dat".as_ref()).await?;
//!     client.logout(&session).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         RpdClient                           │
//! │  login  logout  check group  submit  vault stock  password  │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │ RawResponse
//! ┌──────────────────────────────┴──────────────────────────────┐
//! │                     Operation::classify                     │
//! │  success JSON │ JSON error │ XML error │ unrecognized body  │
//! └───────┬───────────────┴────────────┴────────────┬───────────┘
//!         │ Value                                   │ ErrorRecord
//!   lenient schemas                            error taxonomy
//! ```
//!
//! Classification and decoding are pure functions over fully read
//! responses; the only shared data is the read-only per-operation
//! configuration, so calls may run concurrently without coordination.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy and the normalized error record
pub mod error;

/// Response classification (content-type-driven decision table)
pub mod response;

/// Lenient payload decoding and error-body decoders
pub mod decode;

/// Network configuration and endpoint URLs
pub mod config;

/// Session value for a logged-in user
pub mod session;

/// Success payload schemas
pub mod schema;

/// RPD operations
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::RpdClient;
pub use config::NetworkConfig;
pub use error::{Error, ErrorRecord, Result};
pub use response::{ContentType, Operation, RawResponse};
pub use schema::{GroupsPayload, LoginPayload, StockEnvironment, StockItem, VaultStock};
pub use session::Session;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
