use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::state::RelayState;

/// POST /api/predictions — forward a job-creation body to the provider
/// verbatim, with the server-held credential attached.
pub async fn create_prediction(
    State(state): State<Arc<RelayState>>,
    Json(body): Json<Value>,
) -> Response {
    info!("received prediction request");

    let Some(token) = state.config.api_token.as_deref() else {
        error!("API token not found");
        return config_error();
    };

    let result = state
        .http
        .post(&state.config.provider_url)
        .header("Authorization", format!("Token {token}"))
        .json(&body)
        .send()
        .await;

    match result {
        Ok(resp) => {
            info!(status = resp.status().as_u16(), "provider response");
            passthrough(resp).await
        }
        Err(e) => network_error(e),
    }
}

/// GET /api/predictions/{id} — status-check passthrough for one job.
pub async fn get_prediction(
    State(state): State<Arc<RelayState>>,
    Path(id): Path<String>,
) -> Response {
    info!(%id, "checking prediction status");

    let Some(token) = state.config.api_token.as_deref() else {
        error!("API token not found");
        return config_error();
    };

    let result = state
        .http
        .get(state.status_url(&id))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await;

    match result {
        Ok(resp) => passthrough(resp).await,
        Err(e) => network_error(e),
    }
}

/// Hand the provider's status code and JSON body back unchanged,
/// error statuses included.
async fn passthrough(resp: reqwest::Response) -> Response {
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body: Value = match resp.json().await {
        Ok(body) => body,
        Err(e) => return network_error(e),
    };
    (status, Json(body)).into_response()
}

fn config_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "API token not configured" })),
    )
        .into_response()
}

fn network_error(e: reqwest::Error) -> Response {
    error!("provider request failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}
