//! Avatar side-store HTTP service.
//!
//! Maps a profile PDA to the gateway URL of its pinned avatar.
//!
//! - `POST /api/fetchUrl` `{userPublicKey, programId}` -> `{url}` (null when unset)
//! - `POST /api/storeUrl` `{userPublicKey, programId, pinataUrl}` -> `{pda, url}`
//! - `GET /health`

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gmbio_sdk::side_store::{
    avatar_key, ErrorResponse, FetchUrlRequest, FetchUrlResponse, MemoryAvatarStore,
    StoreUrlRequest, StoreUrlResponse,
};
use solana_sdk::pubkey::Pubkey;
use tracing::{error, info};

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Default)]
pub struct AppState {
    pub store: MemoryAvatarStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/fetchUrl", post(fetch_url))
        .route("/api/storeUrl", post(store_url))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}

/// POST /api/fetchUrl - avatar URL for a wallet's profile
pub async fn fetch_url(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FetchUrlRequest>, JsonRejection>,
) -> Result<Json<FetchUrlResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| rejected("/api/fetchUrl", e))?;
    let (Some(owner), Some(program_id)) = (non_empty(req.user_public_key), non_empty(req.program_id))
    else {
        return Err(bad_request("Missing userPublicKey or programId"));
    };

    let pda = profile_key(&owner, &program_id).map_err(|e| {
        error!("/api/fetchUrl error: {}", e);
        internal(e)
    })?;

    Ok(Json(FetchUrlResponse {
        url: state.store.get_by_pda(&pda).filter(|u| !u.is_empty()),
    }))
}

/// POST /api/storeUrl - insert or replace the avatar URL
pub async fn store_url(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StoreUrlRequest>, JsonRejection>,
) -> Result<Json<StoreUrlResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| rejected("/api/storeUrl", e))?;
    let (Some(owner), Some(program_id), Some(url)) = (
        non_empty(req.user_public_key),
        non_empty(req.program_id),
        non_empty(req.pinata_url),
    ) else {
        return Err(bad_request("Missing userPublicKey, programId or pinataUrl"));
    };

    let pda = profile_key(&owner, &program_id).map_err(|e| {
        error!("/api/storeUrl error: {}", e);
        internal(e)
    })?;

    let record = state.store.upsert(pda, url);
    info!(pda = %record.pda, url = %record.pinata_url, "Avatar URL stored");

    Ok(Json(StoreUrlResponse {
        pda: record.pda,
        url: record.pinata_url,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn profile_key(owner: &str, program_id: &str) -> Result<String, String> {
    let owner = Pubkey::from_str(owner).map_err(|e| format!("Invalid public key input: {e}"))?;
    let program_id =
        Pubkey::from_str(program_id).map_err(|e| format!("Invalid program id input: {e}"))?;
    Ok(avatar_key(&owner, &program_id))
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Unreadable bodies share the `{error}` shape of every other failure.
fn rejected(route: &str, rejection: JsonRejection) -> ApiError {
    error!("{} error: {}", route, rejection.body_text());
    internal(rejection.body_text())
}

fn internal(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
}
