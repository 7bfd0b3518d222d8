//! Data models for upstream NeoWs records.
//!
//! These mirror the provider's JSON loosely: every field the scorer reads is
//! optional, numeric fields stay as raw JSON values (NeoWs sends numbers as
//! strings in some places), and anything not named here is kept in `extra`
//! so a record can be echoed back unchanged.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One NEO as returned by the upstream feed or lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNeoRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_potentially_hazardous_asteroid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_data: Option<Vec<CloseApproach>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawNeoRecord {
    pub fn is_hazardous(&self) -> bool {
        self.is_potentially_hazardous_asteroid.unwrap_or(false)
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        self.close_approach_data.as_deref().unwrap_or(&[])
    }

    pub fn first_approach(&self) -> Option<&CloseApproach> {
        self.approaches().first()
    }
}

/// A lookup hit: the provider's body verbatim plus its typed view.
/// `raw` is what clients get echoed back; nulls and field order survive.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoLookup {
    pub raw: Value,
    pub record: RawNeoRecord,
}

impl NeoLookup {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let record = serde_json::from_value(raw.clone())?;
        Ok(Self { raw, record })
    }
}

/// Diameter estimates keyed by unit system. Only meters are read;
/// kilometers/miles/feet ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters: Option<DiameterRange>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter_min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter_max: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_velocity: Option<RelativeVelocity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miss_distance: Option<MissDistance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbiting_body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers_per_second: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the date-ranged feed endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub element_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_date_groups")]
    pub near_earth_objects: Vec<DateGroup>,
}

/// Records the provider grouped under one calendar date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateGroup {
    pub date: String,
    pub records: Vec<RawNeoRecord>,
}

impl NeoFeed {
    /// All records, date groups in upstream order, records in per-date order.
    pub fn records(&self) -> impl Iterator<Item = &RawNeoRecord> {
        self.near_earth_objects.iter().flat_map(|g| g.records.iter())
    }
}

/// `near_earth_objects` is a JSON object keyed by date. Visiting it entry by
/// entry keeps the provider's key order, which a map type would not.
fn deserialize_date_groups<'de, D>(deserializer: D) -> Result<Vec<DateGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DateGroupsVisitor;

    impl<'de> Visitor<'de> for DateGroupsVisitor {
        type Value = Vec<DateGroup>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping dates to lists of NEO records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((date, records)) = map.next_entry::<String, Vec<RawNeoRecord>>()? {
                groups.push(DateGroup { date, records });
            }
            Ok(groups)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(DateGroupsVisitor)
}
