//! Bearer-token authentication against Supabase.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use neowatch_common::error::{ApiError, NeoWatchError};
use neowatch_common::sandbox::SandboxClient;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::state::SharedState;

/// Resolves a bearer token to the user it belongs to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the provider rejects the token.
    async fn verify_token(&self, token: &str) -> Result<Option<Value>, NeoWatchError>;
}

/// Supabase GoTrue: `GET {url}/auth/v1/user`.
pub struct SupabaseIdentity {
    client: SandboxClient,
    user_endpoint: String,
    anon_key: SecretString,
}

impl SupabaseIdentity {
    pub fn new(mut client: SandboxClient, url: &str, anon_key: SecretString) -> Result<Self, NeoWatchError> {
        client.allow_url_host(url)?;
        Ok(Self {
            client,
            user_endpoint: format!("{}/auth/v1/user", url.trim_end_matches('/')),
            anon_key,
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    #[instrument(skip(self, token))]
    async fn verify_token(&self, token: &str) -> Result<Option<Value>, NeoWatchError> {
        let resp = self
            .client
            .get(&self.user_endpoint)?
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await?;

        let status = resp.status();
        if status.is_client_error() {
            debug!(status = status.as_u16(), "Token rejected");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Identity provider error");
            return Err(NeoWatchError::UpstreamStatus {
                status: status.as_u16(),
                endpoint: self.user_endpoint.clone(),
            });
        }

        let user: Value = resp.json().await?;
        let has_user = user.as_object().is_some_and(|m| !m.is_empty());
        Ok(has_user.then_some(user))
    }
}

/// Token from `Authorization: Bearer <token>`, if present and non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// The verified caller. Extracting it runs verification before the handler body.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Value);

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let provider = state
            .identity
            .as_ref()
            .ok_or_else(|| ApiError::Unauthorized("Supabase is not configured on the server".to_string()))?;

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::InvalidToken("Missing Authorization bearer token".to_string()))?;

        match provider.verify_token(token).await? {
            Some(user) => Ok(AuthUser(user)),
            None => Err(ApiError::invalid_token()),
        }
    }
}
