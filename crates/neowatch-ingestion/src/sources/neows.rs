//! NASA NeoWs (Near Earth Object Web Service) client.
//!
//! Endpoints used:
//!   feed:   {base}/feed?start_date=..&end_date=..&api_key=..
//!   lookup: {base}/neo/{id}?api_key=..
//!
//! The API key is injected at construction. A client without a key still
//! builds; each call then fails with a configuration error before any
//! request leaves the process.

use async_trait::async_trait;
use neowatch_common::error::{NeoWatchError, Result};
use neowatch_common::sandbox::SandboxClient as Client;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::models::{NeoFeed, NeoLookup};
use super::NeoSource;

pub const NEOWS_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";

pub struct NeoWsClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl NeoWsClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| NeoWatchError::Config("NASA_API_KEY is not configured".to_string()))
    }

    /// Join path segments onto the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| NeoWatchError::Config(format!("Invalid NeoWs base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| NeoWatchError::Config(format!("NeoWs base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }
}

#[async_trait]
impl NeoSource for NeoWsClient {
    #[instrument(skip(self))]
    async fn fetch_feed(&self, start_date: &str, end_date: &str) -> Result<NeoFeed> {
        let api_key = self.api_key()?;
        let endpoint = self.endpoint(&["feed"])?;

        let resp = self.client
            .get(&endpoint)?
            .query(&[
                ("start_date", start_date),
                ("end_date", end_date),
                ("api_key", api_key),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "NeoWs feed request failed");
            return Err(NeoWatchError::UpstreamStatus { status: status.as_u16(), endpoint });
        }

        let feed: NeoFeed = resp.json().await?;
        debug!(
            groups = feed.near_earth_objects.len(),
            element_count = ?feed.element_count,
            "NeoWs feed fetched"
        );
        Ok(feed)
    }

    #[instrument(skip(self))]
    async fn fetch_lookup(&self, id: &str) -> Result<Option<NeoLookup>> {
        let api_key = self.api_key()?;
        let endpoint = self.endpoint(&["neo", id])?;

        let resp = self.client
            .get(&endpoint)?
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        let status = resp.status();
        // NeoWs answers 404 for unknown ids and 400 for ids it cannot parse.
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            debug!(status = status.as_u16(), "NeoWs does not recognise id");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "NeoWs lookup request failed");
            return Err(NeoWatchError::UpstreamStatus { status: status.as_u16(), endpoint });
        }

        let raw: Value = resp.json().await?;
        if raw.is_null() {
            return Ok(None);
        }
        Ok(Some(NeoLookup::from_value(raw)?))
    }
}
