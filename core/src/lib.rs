//! Synchronous client for the organisation accounts API.
//!
//! # Overview
//! `AccountsClient` performs fetch, create and delete against
//! `/v1/organisation/accounts`, one blocking HTTP round trip per call, and
//! maps each response to either a typed value or an `AccountsError`.
//!
//! # Design
//! - `ClientConfig` is validated once and held read-only by the client.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`); the `Transport` in between is a
//!   trait so the status mapping can be tested without a network.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use accounts_client::{AccountsClient, AccountsError, ClientConfig};
//!
//! let client = AccountsClient::new(ClientConfig::from_env()?);
//! match client.delete("ad27e265-9605-4b4b-a0e5-3003ea9cc4dc", 0) {
//!     Ok(()) | Err(AccountsError::NotFound { .. }) => {}
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::AccountsClient;
pub use config::ClientConfig;
pub use error::{AccountsError, ConfigError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{RawResponse, Transport, TransportError, UreqTransport};
pub use types::{AccountAttributes, AccountData, Envelope, ServerErrorBody, ACCOUNT_TYPE};
