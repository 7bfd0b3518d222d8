//! Best-effort numeric extraction from sparse upstream records.

use neowatch_ingestion::RawNeoRecord;
use serde_json::Value;

/// Coerce a JSON value to a finite number.
///
/// Numbers and numeric strings succeed when the result is finite.
/// Blank strings, booleans, null, arrays and objects never coerce.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn coerce_field(value: Option<&Value>) -> Option<f64> {
    value.and_then(coerce_number)
}

/// Minimum kilometre miss distance across all close approaches.
/// Entries whose distance does not coerce are skipped.
pub fn min_miss_distance_km(record: &RawNeoRecord) -> Option<f64> {
    record
        .approaches()
        .iter()
        .filter_map(|a| coerce_field(a.miss_distance.as_ref()?.kilometers.as_ref()))
        .fold(None, |min: Option<f64>, km| Some(min.map_or(km, |m| m.min(km))))
}

/// Mean of the meter-unit diameter bounds.
///
/// One usable bound wins over none: if only min or only max coerces, that
/// value is returned as-is.
pub fn diameter_meters(record: &RawNeoRecord) -> Option<f64> {
    let meters = record.estimated_diameter.as_ref()?.meters.as_ref()?;
    let min = coerce_field(meters.estimated_diameter_min.as_ref());
    let max = coerce_field(meters.estimated_diameter_max.as_ref());

    match (min, max) {
        (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Velocity of the first close approach in km/s.
pub fn first_velocity_km_s(record: &RawNeoRecord) -> Option<f64> {
    let approach = record.first_approach()?;
    coerce_field(approach.relative_velocity.as_ref()?.kilometers_per_second.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neowatch_test_utils::NeoFixture;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(42)), Some(42.0));
        assert_eq!(coerce_number(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_number(&json!("300000.25")), Some(300000.25));
        assert_eq!(coerce_number(&json!(" 12 ")), Some(12.0));
        assert_eq!(coerce_number(&json!("1e3")), Some(1000.0));
        assert_eq!(coerce_number(&json!("bad")), None);
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("   ")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("-Infinity")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({ "km": 1 })), None);
    }

    #[test]
    fn test_min_miss_distance_skips_non_numeric() {
        let rec = NeoFixture::new("1", "Mixed")
            .approach_raw("2026-01-01", json!(500000), json!("1"))
            .approach_raw("2026-01-02", json!("bad"), json!("1"))
            .approach_raw("2026-01-03", json!(300000), json!("1"))
            .build();
        assert_eq!(min_miss_distance_km(&rec), Some(300000.0));
    }

    #[test]
    fn test_min_miss_distance_is_not_first() {
        let rec = NeoFixture::new("1", "Later is closer")
            .approach("2026-01-01", 9_000_000.0, 10.0)
            .approach("2026-06-01", 420_000.5, 12.0)
            .build();
        assert_eq!(min_miss_distance_km(&rec), Some(420_000.5));
    }

    #[test]
    fn test_min_miss_distance_none() {
        assert_eq!(min_miss_distance_km(&NeoFixture::new("1", "No approaches").build()), None);

        let rec = NeoFixture::new("2", "All junk")
            .approach_raw("2026-01-01", json!("n/a"), json!("1"))
            .approach_raw("2026-01-02", json!(null), json!("1"))
            .build();
        assert_eq!(min_miss_distance_km(&rec), None);
    }

    #[test]
    fn test_diameter_mean_of_bounds() {
        let rec = NeoFixture::new("1", "Both").diameter_m(100.0, 200.0).build();
        assert_eq!(diameter_meters(&rec), Some(150.0));
    }

    #[test]
    fn test_diameter_single_bound_fallback() {
        let only_min = NeoFixture::new("1", "Min")
            .diameter_raw(Some(json!(100)), None)
            .build();
        assert_eq!(diameter_meters(&only_min), Some(100.0));

        let bad_max = NeoFixture::new("2", "Bad max")
            .diameter_raw(Some(json!(100)), Some(json!("unknown")))
            .build();
        assert_eq!(diameter_meters(&bad_max), Some(100.0));

        let only_max = NeoFixture::new("3", "Max")
            .diameter_raw(None, Some(json!("250.5")))
            .build();
        assert_eq!(diameter_meters(&only_max), Some(250.5));
    }

    #[test]
    fn test_diameter_none() {
        let neither = NeoFixture::new("1", "Neither").diameter_raw(None, None).build();
        assert_eq!(diameter_meters(&neither), None);

        let absent = NeoFixture::new("2", "Absent").build();
        assert_eq!(diameter_meters(&absent), None);
    }

    #[test]
    fn test_first_velocity() {
        let rec = NeoFixture::new("1", "Fast")
            .approach("2026-01-01", 1.0, 17.25)
            .approach("2026-01-02", 1.0, 30.0)
            .build();
        assert_eq!(first_velocity_km_s(&rec), Some(17.25));

        let junk = NeoFixture::new("2", "Junk")
            .approach_raw("2026-01-01", json!("1"), json!("fast"))
            .build();
        assert_eq!(first_velocity_km_s(&junk), None);
    }
}
