//! Request DTOs for the log generation API
//!
//! Defines the structure of incoming HTTP request parameters.

use chrono::NaiveDate;
use serde::Deserialize;

/// Query parameters for the generation and download endpoints.
///
/// The date must be ISO formatted (`YYYY-MM-DD`); a missing or malformed
/// value is rejected by the extractor before reaching a handler.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateQuery {
    /// The calendar date the logs are requested for
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_query_deserialize() {
        let query: DateQuery = serde_json::from_str(r#"{"date":"2026-08-26"}"#).unwrap();
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2026, 8, 26).unwrap());
    }

    #[test]
    fn test_date_query_rejects_malformed() {
        let result: Result<DateQuery, _> = serde_json::from_str(r#"{"date":"26/08/2026"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_date_query_rejects_missing() {
        let result: Result<DateQuery, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
