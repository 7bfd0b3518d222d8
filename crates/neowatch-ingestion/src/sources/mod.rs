//! Upstream NEO data sources.

pub mod neows;

use async_trait::async_trait;
use neowatch_common::error::Result;
use crate::models::{NeoFeed, NeoLookup};

/// Read-only access to an NEO feed provider.
#[async_trait]
pub trait NeoSource: Send + Sync {
    /// Fetch all records whose close approach falls in `[start_date, end_date]`,
    /// grouped by date as the provider returns them.
    async fn fetch_feed(&self, start_date: &str, end_date: &str) -> Result<NeoFeed>;

    /// Fetch a single record by provider id, keeping the body as sent.
    /// `Ok(None)` when the provider does not know the id.
    async fn fetch_lookup(&self, id: &str) -> Result<Option<NeoLookup>>;
}
