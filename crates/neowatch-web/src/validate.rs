//! Request parameter validation. Runs before any upstream call.

use chrono::NaiveDate;
use neowatch_common::error::ApiError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Widest accepted `end_date - start_date`, in whole days.
pub const MAX_RANGE_DAYS: i64 = 7;

/// Raw `?start_date=..&end_date=..` parameters. Both optional here so a
/// missing parameter surfaces as a validation error rather than an extractor
/// rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeQuery {
    pub fn new(start_date: &str, end_date: &str) -> Self {
        Self {
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
        }
    }
}

/// A validated range, echoed back in feed and summary responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

pub struct QueryValidator {
    /// YYYY-MM-DD, ASCII digits only
    re_date: Regex,
    max_range_days: i64,
}

impl QueryValidator {
    pub fn new() -> Self {
        Self {
            re_date: Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"),
            max_range_days: MAX_RANGE_DAYS,
        }
    }

    fn parse_date(&self, value: Option<&str>, field: &str) -> Result<NaiveDate, ApiError> {
        let invalid = || ApiError::Validation(format!("{} must be in YYYY-MM-DD format", field));
        let value = value.ok_or_else(invalid)?;
        if !self.re_date.is_match(value) {
            return Err(invalid());
        }
        // Shape is right but the calendar may not be (2026-13-01, 2026-02-30).
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
    }

    pub fn validate_range(&self, query: &RangeQuery) -> Result<DateRange, ApiError> {
        let start = self.parse_date(query.start_date.as_deref(), "start_date")?;
        let end = self.parse_date(query.end_date.as_deref(), "end_date")?;

        let span = (end - start).num_days();
        if span < 0 {
            return Err(ApiError::Validation("end_date must be after start_date".to_string()));
        }
        if span > self.max_range_days {
            return Err(ApiError::Validation(format!(
                "Date range must be {} days or less",
                self.max_range_days
            )));
        }

        Ok(DateRange {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
        })
    }

    /// Rejects a blank id. A non-blank id is passed upstream untouched.
    pub fn validate_id<'a>(&self, id: &'a str) -> Result<&'a str, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::Validation("id is required".to_string()));
        }
        Ok(id)
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(start: &str, end: &str) -> Result<DateRange, ApiError> {
        QueryValidator::new().validate_range(&RangeQuery::new(start, end))
    }

    fn message(err: ApiError) -> String {
        match err {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_seven_day_span_accepted() {
        let range = check("2026-01-01", "2026-01-08").unwrap();
        assert_eq!(range.start_date, "2026-01-01");
        assert_eq!(range.end_date, "2026-01-08");
    }

    #[test]
    fn test_same_day_accepted() {
        assert!(check("2026-03-05", "2026-03-05").is_ok());
    }

    #[test]
    fn test_eight_day_span_rejected() {
        let msg = message(check("2026-01-01", "2026-01-09").unwrap_err());
        assert_eq!(msg, "Date range must be 7 days or less");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let msg = message(check("2026-01-01", "2025-12-31").unwrap_err());
        assert_eq!(msg, "end_date must be after start_date");
    }

    #[test]
    fn test_impossible_month_rejected() {
        let msg = message(check("2026-13-01", "2026-01-02").unwrap_err());
        assert_eq!(msg, "start_date must be in YYYY-MM-DD format");
        let msg = message(check("2026-02-01", "2026-02-30").unwrap_err());
        assert_eq!(msg, "end_date must be in YYYY-MM-DD format");
    }

    #[test]
    fn test_malformed_shapes_rejected() {
        for bad in ["2026-1-01", "26-01-01", "2026/01/01", "2026-01-01T00:00", " 2026-01-01", "२०२६-०१-०१"] {
            let msg = message(check(bad, "2026-01-02").unwrap_err());
            assert!(msg.starts_with("start_date"), "{bad}: {msg}");
        }
    }

    #[test]
    fn test_missing_params_name_the_field() {
        let validator = QueryValidator::new();
        let msg = message(validator.validate_range(&RangeQuery::default()).unwrap_err());
        assert_eq!(msg, "start_date must be in YYYY-MM-DD format");

        let query = RangeQuery { start_date: Some("2026-01-01".into()), end_date: None };
        let msg = message(validator.validate_range(&query).unwrap_err());
        assert_eq!(msg, "end_date must be in YYYY-MM-DD format");
    }

    #[test]
    fn test_span_crosses_month_and_leap_day() {
        assert!(check("2028-02-25", "2028-03-03").is_ok());
        assert!(check("2028-02-25", "2028-03-04").is_err());
    }

    #[test]
    fn test_validate_id() {
        let validator = QueryValidator::new();
        assert_eq!(validator.validate_id("3542519").unwrap(), "3542519");
        assert_eq!(validator.validate_id(" 3542519 ").unwrap(), " 3542519 ");
        assert!(matches!(validator.validate_id(""), Err(ApiError::Validation(_))));
        assert!(matches!(validator.validate_id("   "), Err(ApiError::Validation(_))));
    }
}
