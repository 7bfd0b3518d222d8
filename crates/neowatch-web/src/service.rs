//! Feed, summary and lookup orchestration.
//! Validate → fetch → normalise/score → assemble. Every call re-fetches.

use std::sync::Arc;

use neowatch_common::error::ApiError;
use neowatch_ingestion::NeoSource;
use neowatch_ranker::{normalize, score, NormalizedNeo, RiskBreakdown};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::validate::{DateRange, QueryValidator, RangeQuery};

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub range: DateRange,
    pub total: usize,
    pub neos: Vec<NormalizedNeo>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub range: DateRange,
    pub total: usize,
    pub hazardous: usize,
    pub risk_breakdown: RiskBreakdown,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub neo: NormalizedNeo,
    /// Upstream body exactly as received
    pub raw: Value,
}

pub struct NeoService {
    source: Arc<dyn NeoSource>,
    validator: QueryValidator,
}

impl NeoService {
    pub fn new(source: Arc<dyn NeoSource>) -> Self {
        Self { source, validator: QueryValidator::new() }
    }

    pub async fn feed(&self, query: &RangeQuery) -> Result<FeedResponse, ApiError> {
        let range = self.validator.validate_range(query)?;
        let feed = self.source.fetch_feed(&range.start_date, &range.end_date).await?;

        let neos: Vec<NormalizedNeo> = feed.records().map(normalize).collect();
        info!(start = %range.start_date, end = %range.end_date, total = neos.len(), "Feed served");

        Ok(FeedResponse { total: neos.len(), range, neos })
    }

    pub async fn summary(&self, query: &RangeQuery) -> Result<SummaryResponse, ApiError> {
        let range = self.validator.validate_range(query)?;
        let feed = self.source.fetch_feed(&range.start_date, &range.end_date).await?;

        let mut breakdown = RiskBreakdown::default();
        let mut hazardous = 0;
        for record in feed.records() {
            if record.is_hazardous() {
                hazardous += 1;
            }
            breakdown.record(score(record).label);
        }

        info!(
            start = %range.start_date,
            end = %range.end_date,
            total = breakdown.total(),
            hazardous,
            "Summary served"
        );

        Ok(SummaryResponse {
            range,
            total: breakdown.total(),
            hazardous,
            risk_breakdown: breakdown,
        })
    }

    pub async fn lookup(&self, id: &str) -> Result<LookupResponse, ApiError> {
        let id = self.validator.validate_id(id)?;
        let found = self
            .source
            .fetch_lookup(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("NEO not found".to_string()))?;

        info!(id, "Lookup served");
        Ok(LookupResponse { neo: normalize(&found.record), raw: found.raw })
    }
}
