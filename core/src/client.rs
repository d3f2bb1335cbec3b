//! Request builder, response parser and blocking round trip for the
//! accounts API.
//!
//! # Design
//! `AccountsClient` holds a read-only `ClientConfig` and a `Transport`. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that maps an `HttpResponse` to the typed outcome.
//! `fetch`, `create` and `delete` glue the two halves together around exactly
//! one call to the transport.
//!
//! The response body is drained and dropped inside `read_body` on every path,
//! before any status branch runs.

use std::io::Read;

use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::AccountsError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{RawResponse, Transport, UreqTransport};
use crate::types::{AccountData, Envelope, ServerErrorBody};

/// Path segments of the accounts collection, relative to the base URL.
const ACCOUNTS_PATH: [&str; 3] = ["v1", "organisation", "accounts"];

/// Longest slice of a non-JSON error body kept as a message.
const MAX_RAW_MESSAGE: usize = 512;

/// Synchronous client for the accounts resource.
///
/// Safe to share across threads when the transport is; the default
/// `UreqTransport` pools connections behind a cloneable agent.
#[derive(Debug, Clone)]
pub struct AccountsClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl AccountsClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self { config, transport }
    }
}

impl<T: Transport> AccountsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// `GET {base}/v1/organisation/accounts/{id}`.
    pub fn fetch(&self, id: &str) -> Result<AccountData, AccountsError> {
        let request = self.build_fetch(id);
        let response = self.execute(&request, "an error occurred when trying to fetch an account")?;
        self.parse_fetch(response)
    }

    /// `POST {base}/v1/organisation/accounts` with `{ "data": account }`.
    pub fn create(&self, account: &AccountData) -> Result<(), AccountsError> {
        let request = self.build_create(account)?;
        let response =
            self.execute(&request, "an error occurred when trying to create a new account")?;
        self.parse_create(response)
    }

    /// `DELETE {base}/v1/organisation/accounts/{id}?version={version}`.
    pub fn delete(&self, id: &str, version: u64) -> Result<(), AccountsError> {
        let request = self.build_delete(id, version);
        let response = self.execute(&request, "an error occurred when trying to delete an account")?;
        self.parse_delete(response)
    }

    pub fn build_fetch(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.resource_url(Some(id)).to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn build_create(&self, account: &AccountData) -> Result<HttpRequest, AccountsError> {
        let body = serde_json::to_string(&Envelope { data: account }).map_err(|e| {
            AccountsError::Serialization {
                message: "an error occurred when trying to encode the request as json".to_string(),
                cause: e.to_string(),
            }
        })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.resource_url(None).to_string(),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: &str, version: u64) -> HttpRequest {
        let mut url = self.resource_url(Some(id));
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
        HttpRequest {
            method: HttpMethod::Delete,
            url: url.to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    /// 2xx unwraps the envelope, 404 is `NotFound`, anything else is
    /// `InternalServer`.
    pub fn parse_fetch(&self, response: HttpResponse) -> Result<AccountData, AccountsError> {
        match response.status {
            404 => Err(AccountsError::NotFound {
                message: server_message(&response),
            }),
            _ if response.is_success() => decode_envelope(&response),
            _ => Err(server_failure(&response)),
        }
    }

    /// 201 is success, 409 is `Conflict`, anything else is `InternalServer`.
    pub fn parse_create(&self, response: HttpResponse) -> Result<(), AccountsError> {
        match response.status {
            201 => Ok(()),
            409 => Err(AccountsError::Conflict {
                message: server_message(&response),
            }),
            _ => Err(server_failure(&response)),
        }
    }

    /// 204 is success, 404 (unknown id or stale version) is `NotFound`,
    /// anything else is `InternalServer`.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), AccountsError> {
        match response.status {
            204 => Ok(()),
            404 => Err(AccountsError::NotFound {
                message: server_message(&response),
            }),
            _ => Err(server_failure(&response)),
        }
    }

    fn resource_url(&self, id: Option<&str>) -> Url {
        let mut url = self.config.base_url().clone();
        // Only fails for cannot-be-a-base urls, which ClientConfig rejects.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(ACCOUNTS_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn execute(&self, request: &HttpRequest, failure: &str) -> Result<HttpResponse, AccountsError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let raw = self.transport.send(request).map_err(|e| {
            error!(method = %request.method, url = %request.url, error = %e, "{failure}");
            AccountsError::InternalServer {
                message: failure.to_string(),
                status: None,
                cause: Some(e.0),
            }
        })?;
        let response = read_body(raw)?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }
}

/// Drain and release the body. The reader is dropped here whether or not the
/// read succeeded. Bytes that are not UTF-8 are replaced rather than failing
/// the read; the status still decides the outcome.
fn read_body(raw: RawResponse) -> Result<HttpResponse, AccountsError> {
    let RawResponse {
        status,
        headers,
        mut body,
    } = raw;
    let mut bytes = Vec::new();
    let read = body.read_to_end(&mut bytes);
    drop(body);

    read.map_err(|e| AccountsError::ReadResponseBody {
        message: "an error occurred when trying to read the response body".to_string(),
        cause: e.to_string(),
    })?;
    Ok(HttpResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn decode_envelope(response: &HttpResponse) -> Result<AccountData, AccountsError> {
    serde_json::from_str::<Envelope<AccountData>>(&response.body)
        .map(|envelope| envelope.data)
        .map_err(|e| AccountsError::InternalServer {
            message: "response body is not an account envelope".to_string(),
            status: Some(response.status),
            cause: Some(e.to_string()),
        })
}

fn server_failure(response: &HttpResponse) -> AccountsError {
    AccountsError::InternalServer {
        message: server_message(response),
        status: Some(response.status),
        cause: None,
    }
}

/// The server's `error_message`, or the raw body when it is not the expected
/// JSON shape, or the bare status when the body is empty.
fn server_message(response: &HttpResponse) -> String {
    if let Ok(body) = serde_json::from_str::<ServerErrorBody>(&response.body) {
        if !body.error_message.is_empty() {
            return body.error_message;
        }
    }

    let raw = response.body.trim();
    if raw.is_empty() {
        return format!("HTTP {}", response.status);
    }
    warn!(status = response.status, "error response without error_message");
    truncate(raw)
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_RAW_MESSAGE {
        return body.to_string();
    }
    let mut end = MAX_RAW_MESSAGE;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
