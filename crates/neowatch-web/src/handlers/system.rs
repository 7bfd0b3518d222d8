//! Health probe, identity echo and the unmatched-route fallback.

use axum::{extract::State, Json};
use neowatch_common::error::ApiError;
use serde::Serialize;
use serde_json::Value;
use crate::auth::AuthUser;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    /// Seconds since startup
    pub uptime: f64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Value,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.service_name.clone(),
        uptime: state.uptime_secs(),
    })
}

/// GET /me: the Supabase user behind the bearer token.
pub async fn me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
