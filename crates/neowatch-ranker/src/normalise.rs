//! Raw upstream record → stable `NormalizedNeo`.

use neowatch_ingestion::RawNeoRecord;
use serde::{Deserialize, Serialize};
use crate::extract::{coerce_number, first_velocity_km_s};
use crate::scorer::{assess, RiskAssessment, RiskFactors};

/// The shape served to clients. Optional fields serialise as `null`,
/// except `absolute_magnitude_h`, which is omitted when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedNeo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<f64>,
    pub is_potentially_hazardous: bool,
    pub diameter_m: Option<f64>,
    pub close_approach_date: Option<String>,
    pub miss_distance_km: Option<f64>,
    pub relative_velocity_km_s: Option<f64>,
    pub orbiting_body: Option<String>,
    pub risk: RiskAssessment,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// Never fails: every field has a fallback.
pub fn normalize(record: &RawNeoRecord) -> NormalizedNeo {
    let factors = RiskFactors::from_record(record);
    let approach = record.first_approach();

    NormalizedNeo {
        id: record.id.clone(),
        name: record.name.clone(),
        absolute_magnitude_h: record.absolute_magnitude_h.as_ref().and_then(coerce_number),
        is_potentially_hazardous: factors.hazardous,
        diameter_m: factors.diameter_m,
        close_approach_date: non_empty(approach.and_then(|a| a.close_approach_date.as_ref())),
        miss_distance_km: factors.miss_distance_km,
        relative_velocity_km_s: first_velocity_km_s(record),
        orbiting_body: non_empty(approach.and_then(|a| a.orbiting_body.as_ref())),
        risk: assess(factors),
    }
}
