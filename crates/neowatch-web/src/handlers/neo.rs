//! NEO data endpoints: feed, summary and lookup.

use axum::{extract::State, Json};
use neowatch_common::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::service::{FeedResponse, LookupResponse, SummaryResponse};
use crate::state::SharedState;
use crate::validate::RangeQuery;

/// GET /feed?start_date=..&end_date=..
pub async fn feed(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<RangeQuery>,
) -> Result<Json<FeedResponse>, ApiError> {
    Ok(Json(state.neo.feed(&query).await?))
}

/// GET /summary?start_date=..&end_date=..
pub async fn summary(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<RangeQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    Ok(Json(state.neo.summary(&query).await?))
}

/// GET /lookup/{id}
pub async fn lookup(
    State(state): State<SharedState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<LookupResponse>, ApiError> {
    Ok(Json(state.neo.lookup(&id).await?))
}
