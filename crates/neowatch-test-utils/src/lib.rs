//! Fixture builders for NeoWs-shaped records.
//!
//! Builds JSON in the provider's wire shape (numbers as strings where NeoWs
//! sends strings) so tests exercise the same deserialisation as production.

use neowatch_ingestion::{NeoFeed, NeoLookup, RawNeoRecord};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone)]
pub struct NeoFixture {
    id: String,
    name: String,
    magnitude: Option<Value>,
    hazardous: Option<bool>,
    meters: Option<(Option<Value>, Option<Value>)>,
    approaches: Vec<Value>,
}

impl NeoFixture {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            magnitude: None,
            hazardous: None,
            meters: None,
            approaches: Vec::new(),
        }
    }

    pub fn magnitude(mut self, h: f64) -> Self {
        self.magnitude = Some(json!(h));
        self
    }

    pub fn hazardous(mut self, flag: bool) -> Self {
        self.hazardous = Some(flag);
        self
    }

    /// Meter-unit diameter bounds.
    pub fn diameter_m(mut self, min: f64, max: f64) -> Self {
        self.meters = Some((Some(json!(min)), Some(json!(max))));
        self
    }

    /// Meter-unit diameter bounds as arbitrary JSON (missing, strings, junk).
    pub fn diameter_raw(mut self, min: Option<Value>, max: Option<Value>) -> Self {
        self.meters = Some((min, max));
        self
    }

    /// Close approach with a numeric miss distance, sent as a string like NeoWs does.
    pub fn approach(self, date: &str, miss_km: f64, velocity_km_s: f64) -> Self {
        self.approach_raw(
            date,
            json!(miss_km.to_string()),
            json!(velocity_km_s.to_string()),
        )
    }

    pub fn approach_raw(mut self, date: &str, miss_km: Value, velocity_km_s: Value) -> Self {
        self.approaches.push(json!({
            "close_approach_date": date,
            "relative_velocity": {
                "kilometers_per_second": velocity_km_s,
                "kilometers_per_hour": "0"
            },
            "miss_distance": {
                "astronomical": "0",
                "lunar": "0",
                "kilometers": miss_km
            },
            "orbiting_body": "Earth"
        }));
        self
    }

    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), json!(self.id));
        obj.insert("neo_reference_id".into(), json!(self.id));
        obj.insert("name".into(), json!(self.name));
        if let Some(h) = &self.magnitude {
            obj.insert("absolute_magnitude_h".into(), h.clone());
        }
        if let Some(flag) = self.hazardous {
            obj.insert("is_potentially_hazardous_asteroid".into(), json!(flag));
        }
        if let Some((min, max)) = &self.meters {
            let mut meters = Map::new();
            if let Some(v) = min {
                meters.insert("estimated_diameter_min".into(), v.clone());
            }
            if let Some(v) = max {
                meters.insert("estimated_diameter_max".into(), v.clone());
            }
            obj.insert("estimated_diameter".into(), json!({ "meters": meters }));
        }
        if !self.approaches.is_empty() {
            obj.insert("close_approach_data".into(), Value::Array(self.approaches.clone()));
        }
        Value::Object(obj)
    }

    pub fn build(&self) -> RawNeoRecord {
        serde_json::from_value(self.to_json()).expect("fixture must deserialise")
    }

    /// As the lookup endpoint would return it.
    pub fn lookup(&self) -> NeoLookup {
        NeoLookup::from_value(self.to_json()).expect("fixture must deserialise")
    }
}

/// Parsed feed; date order follows `groups`.
pub fn feed(groups: &[(&str, Vec<NeoFixture>)]) -> NeoFeed {
    use neowatch_ingestion::models::DateGroup;
    NeoFeed {
        element_count: Some(groups.iter().map(|(_, f)| f.len() as u64).sum()),
        near_earth_objects: groups
            .iter()
            .map(|(date, fixtures)| DateGroup {
                date: date.to_string(),
                records: fixtures.iter().map(NeoFixture::build).collect(),
            })
            .collect(),
    }
}
