use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub organisation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub attributes: serde_json::Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub version: Option<String>,
}

/// Error response in the `{ "error_message": ... }` shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub type Db = Arc<RwLock<HashMap<String, Account>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(ACCOUNTS_PATH, post(create_account))
        .route(
            &format!("{ACCOUNTS_PATH}/{{id}}"),
            get(fetch_account).delete(delete_account),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_account(
    State(db): State<Db>,
    payload: Result<Json<Envelope<Account>>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Account>>), ApiError> {
    let Json(Envelope { data: mut account }) =
        payload.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
    validate(&account)?;

    let mut accounts = db.write().await;
    if accounts.contains_key(&account.id) {
        tracing::debug!(id = %account.id, "duplicate account rejected");
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint",
        ));
    }
    account.version = Some(0);
    accounts.insert(account.id.clone(), account.clone());
    tracing::info!(id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(Envelope { data: account })))
}

async fn fetch_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Account>>, ApiError> {
    require_uuid("id", &id)?;
    let accounts = db.read().await;
    accounts
        .get(&id)
        .cloned()
        .map(|data| Json(Envelope { data }))
        .ok_or_else(|| does_not_exist(&id))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, ApiError> {
    require_uuid("id", &id)?;
    let version: u64 = params
        .version
        .as_deref()
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "version is required"))?
        .parse()
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "invalid version number"))?;

    let mut accounts = db.write().await;
    let current = accounts.get(&id).ok_or_else(|| does_not_exist(&id))?;
    if current.version != Some(version) {
        tracing::debug!(%id, version, "delete with stale version rejected");
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "specified version incorrect",
        ));
    }
    accounts.remove(&id);
    tracing::info!(%id, version, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn validate(account: &Account) -> Result<(), ApiError> {
    if account.kind != "accounts" {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "validation failure: type must be accounts",
        ));
    }
    require_uuid("id", &account.id)?;
    require_uuid("organisation_id", &account.organisation_id)
}

fn require_uuid(field: &str, value: &str) -> Result<(), ApiError> {
    Uuid::parse_str(value).map(|_| ()).map_err(|_| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("validation failure: {field} must be of type uuid"),
        )
    })
}

fn does_not_exist(id: &str) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("record {id} does not exist"),
    )
}
