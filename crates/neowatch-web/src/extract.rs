//! Query and path extractors that reject through `ApiError`, so malformed
//! parameters get the same JSON error body as every other failure.

use axum::extract::{FromRequestParts, Path, Query};
use neowatch_common::error::ApiError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
