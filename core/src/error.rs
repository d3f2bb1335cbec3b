//! Error types for the accounts API client.
//!
//! # Design
//! Every operation returns exactly one `AccountsError` on failure. Callers
//! branch on the variant (or on `kind()`), never on message text: a
//! `NotFound` on delete can be treated as already deleted, a `Conflict` on
//! create as a duplicate to skip.
//!
//! `InternalServer` has two construction paths. A transport failure keeps the
//! underlying cause and no status; a non-specific server status keeps the
//! status and the server's message.

use thiserror::Error;

/// Errors returned by `AccountsClient` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountsError {
    /// The request never got a response, or the server reported a failure
    /// status this client has no dedicated variant for.
    #[error("internal server error: {message}")]
    InternalServer {
        message: String,
        status: Option<u16>,
        cause: Option<String>,
    },

    /// The response arrived but its body could not be read in full.
    #[error("failed to read response body: {message}: {cause}")]
    ReadResponseBody { message: String, cause: String },

    /// The request payload could not be encoded as JSON.
    #[error("failed to serialize request: {message}: {cause}")]
    Serialization { message: String, cause: String },

    /// Unknown id, or a delete whose version does not match.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// An account with the same id already exists.
    #[error("conflict: {message}")]
    Conflict { message: String },
}

/// Fieldless mirror of `AccountsError` for callers that only discriminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InternalServer,
    ReadResponseBody,
    Serialization,
    NotFound,
    Conflict,
}

impl AccountsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::InternalServer { .. } => ErrorKind::InternalServer,
            AccountsError::ReadResponseBody { .. } => ErrorKind::ReadResponseBody,
            AccountsError::Serialization { .. } => ErrorKind::Serialization,
            AccountsError::NotFound { .. } => ErrorKind::NotFound,
            AccountsError::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    /// Human-readable message, without the kind prefix `Display` adds.
    pub fn message(&self) -> &str {
        match self {
            AccountsError::InternalServer { message, .. }
            | AccountsError::ReadResponseBody { message, .. }
            | AccountsError::Serialization { message, .. }
            | AccountsError::NotFound { message }
            | AccountsError::Conflict { message } => message,
        }
    }

    /// Underlying cause for client-local failures and transport failures.
    pub fn cause(&self) -> Option<&str> {
        match self {
            AccountsError::InternalServer { cause, .. } => cause.as_deref(),
            AccountsError::ReadResponseBody { cause, .. }
            | AccountsError::Serialization { cause, .. } => Some(cause),
            AccountsError::NotFound { .. } | AccountsError::Conflict { .. } => None,
        }
    }
}

/// Invalid client configuration. Raised before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid timeout {value:?}: expected whole seconds")]
    InvalidTimeout { value: String },
}
