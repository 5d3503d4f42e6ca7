//! Calendar-date key for daily counter records.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date used to key daily counter records.
///
/// Serializes as an ISO date string (`YYYY-MM-DD`), which is also the
/// byte prefix used when scanning a day's records. "Today" is local to
/// the server, matching what the polling front end displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The server-local current date.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Byte prefix for scanning this day's records (`"YYYY-MM-DD:"`).
    pub fn scan_prefix(&self) -> Vec<u8> {
        format!("{}:", self).into_bytes()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_iso_date() {
        let key = DateKey::new(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert_eq!(key.to_string(), "2026-08-30");
    }

    #[test]
    fn test_scan_prefix_ends_with_separator() {
        let key = DateKey::new(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(key.scan_prefix(), b"2026-01-02:".to_vec());
    }

    #[test]
    fn test_serializes_as_string() {
        let key = DateKey::new(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2026-08-30\"");
    }
}
