//! NEO risk score computation.
//!
//! score = round(clamp(base + diameter_factor + miss_factor, 0, 100))
//!
//!   base            60 if hazardous, else 20
//!   diameter_factor min(diameter_m / 1000 * 20, 20), 0 when unknown
//!   miss_factor     20 below 750 000 km, 10 below 2 000 000 km, else 0
//!
//! The diameter term saturates at 1 km. That is the observed provider-side
//! formula and is reproduced as-is.

use neowatch_ingestion::RawNeoRecord;
use serde::{Deserialize, Serialize};
use crate::extract::{diameter_meters, min_miss_distance_km};

pub const HAZARDOUS_BASE: f64 = 60.0;
pub const BENIGN_BASE: f64 = 20.0;
pub const DIAMETER_FACTOR_CAP: f64 = 20.0;
pub const CLOSE_MISS_KM: f64 = 750_000.0;
pub const NEAR_MISS_KM: f64 = 2_000_000.0;
pub const HIGH_THRESHOLD: u8 = 75;
pub const MEDIUM_THRESHOLD: u8 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskLabel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLabel::Medium
        } else {
            RiskLabel::Low
        }
    }
}

/// Raw inputs that produced a score, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub hazardous: bool,
    pub diameter_m: Option<f64>,
    pub miss_distance_km: Option<f64>,
}

impl RiskFactors {
    pub fn from_record(record: &RawNeoRecord) -> Self {
        Self {
            hazardous: record.is_hazardous(),
            diameter_m: diameter_meters(record),
            miss_distance_km: min_miss_distance_km(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub label: RiskLabel,
    pub factors: RiskFactors,
}

pub fn diameter_factor(diameter_m: Option<f64>) -> f64 {
    match diameter_m {
        Some(d) => (d / 1000.0 * 20.0).min(DIAMETER_FACTOR_CAP),
        None => 0.0,
    }
}

pub fn miss_factor(miss_km: Option<f64>) -> f64 {
    match miss_km {
        Some(km) if km < CLOSE_MISS_KM => 20.0,
        Some(km) if km < NEAR_MISS_KM => 10.0,
        _ => 0.0,
    }
}

/// Score already-extracted factors.
pub fn assess(factors: RiskFactors) -> RiskAssessment {
    let base = if factors.hazardous { HAZARDOUS_BASE } else { BENIGN_BASE };
    let raw = base + diameter_factor(factors.diameter_m) + miss_factor(factors.miss_distance_km);
    let score = raw.clamp(0.0, 100.0).round() as u8;

    RiskAssessment {
        score,
        label: RiskLabel::from_score(score),
        factors,
    }
}

/// Score a raw upstream record.
pub fn score(record: &RawNeoRecord) -> RiskAssessment {
    assess(RiskFactors::from_record(record))
}

/// Per-label tally used by the summary endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskBreakdown {
    pub fn record(&mut self, label: RiskLabel) {
        match label {
            RiskLabel::High   => self.high += 1,
            RiskLabel::Medium => self.medium += 1,
            RiskLabel::Low    => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neowatch_test_utils::NeoFixture;

    fn factors(hazardous: bool, diameter_m: Option<f64>, miss_distance_km: Option<f64>) -> RiskFactors {
        RiskFactors { hazardous, diameter_m, miss_distance_km }
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(RiskLabel::from_score(74), RiskLabel::Medium);
        assert_eq!(RiskLabel::from_score(75), RiskLabel::High);
        assert_eq!(RiskLabel::from_score(44), RiskLabel::Low);
        assert_eq!(RiskLabel::from_score(45), RiskLabel::Medium);
        assert_eq!(RiskLabel::from_score(0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_score(100), RiskLabel::High);
    }

    #[test]
    fn test_label_serialises_capitalised() {
        assert_eq!(serde_json::to_value(RiskLabel::Medium).unwrap(), serde_json::json!("Medium"));
    }

    #[test]
    fn test_hazardous_close_large_scenario() {
        let rec = NeoFixture::new("1", "Hazardous")
            .hazardous(true)
            .diameter_m(400.0, 600.0)
            .approach("2026-01-02", 600_000.0, 20.0)
            .build();
        let risk = score(&rec);
        assert_eq!(diameter_factor(risk.factors.diameter_m), 10.0);
        assert_eq!(miss_factor(risk.factors.miss_distance_km), 20.0);
        assert_eq!(risk.score, 90);
        assert_eq!(risk.label, RiskLabel::High);
        assert_eq!(risk.factors, factors(true, Some(500.0), Some(600_000.0)));
    }

    #[test]
    fn test_benign_small_far_scenario() {
        let rec = NeoFixture::new("2", "Benign")
            .hazardous(false)
            .diameter_m(40.0, 60.0)
            .approach("2026-01-02", 5_000_000.0, 5.0)
            .build();
        let risk = score(&rec);
        assert!((diameter_factor(Some(50.0)) - 1.0).abs() < 1e-9);
        assert_eq!(miss_factor(Some(5_000_000.0)), 0.0);
        assert_eq!(risk.score, 21);
        assert_eq!(risk.label, RiskLabel::Low);
    }

    #[test]
    fn test_miss_factor_thresholds() {
        assert_eq!(miss_factor(None), 0.0);
        assert_eq!(miss_factor(Some(749_999.9)), 20.0);
        assert_eq!(miss_factor(Some(750_000.0)), 10.0);
        assert_eq!(miss_factor(Some(1_999_999.0)), 10.0);
        assert_eq!(miss_factor(Some(2_000_000.0)), 0.0);
    }

    #[test]
    fn test_diameter_factor_caps_at_one_km() {
        assert_eq!(diameter_factor(None), 0.0);
        assert_eq!(diameter_factor(Some(0.0)), 0.0);
        assert_eq!(diameter_factor(Some(1000.0)), 20.0);
        assert_eq!(diameter_factor(Some(25_000.0)), 20.0);
    }

    #[test]
    fn test_score_always_in_range() {
        let cases = [
            factors(true, Some(1e9), Some(0.0)),
            factors(true, Some(-1e9), Some(0.0)),
            factors(false, None, None),
            factors(false, Some(-500.0), Some(1e12)),
            factors(true, Some(f64::MAX), Some(-1.0)),
        ];
        for f in cases {
            let risk = assess(f);
            assert!(risk.score <= 100, "score {} out of range", risk.score);
        }
        assert_eq!(assess(factors(true, Some(1e9), Some(0.0))).score, 100);
        assert_eq!(assess(factors(false, Some(-1e9), None)).score, 0);
    }

    #[test]
    fn test_rounding() {
        // 20 + 12.5 = 32.5 rounds half up
        assert_eq!(assess(factors(false, Some(625.0), None)).score, 33);
        assert_eq!(assess(factors(false, Some(620.0), None)).score, 32);
    }

    #[test]
    fn test_score_is_deterministic() {
        let rec = NeoFixture::new("3", "Repeat")
            .hazardous(true)
            .diameter_m(10.0, 30.0)
            .approach("2026-01-01", 1_000_000.0, 3.0)
            .build();
        let first = score(&rec);
        for _ in 0..10 {
            assert_eq!(score(&rec), first);
        }
    }

    #[test]
    fn test_breakdown_tally() {
        let mut breakdown = RiskBreakdown::default();
        for label in [RiskLabel::High, RiskLabel::Low, RiskLabel::Low, RiskLabel::Medium] {
            breakdown.record(label);
        }
        assert_eq!(breakdown, RiskBreakdown { high: 1, medium: 1, low: 2 });
        assert_eq!(breakdown.total(), 4);
    }
}
