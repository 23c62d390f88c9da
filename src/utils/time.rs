//! Time utilities and helpers for consistent time handling
//!
//! The backend is not consistent about date formats: join dates arrive as
//! plain dates, withdrawal timestamps as RFC 3339 or space-separated
//! datetimes. `parse_date_flexible` accepts all observed shapes.

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Standard time format used throughout the application
pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Simple date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a DateTime as a standard string
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(STANDARD_TIME_FORMAT).to_string()
}

/// Format a DateTime as a plain date
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Parse a date or datetime string in any of the formats the backend emits
///
/// Accepted shapes, tried in order: RFC 3339, `%Y-%m-%d %H:%M:%S`,
/// `%Y-%m-%dT%H:%M:%S`, and a plain `%Y-%m-%d` date (taken as midnight UTC).
pub fn parse_date_flexible(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("Invalid date: {}", s))?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(anyhow!("Unrecognized date format: {}", s))
}

/// Human-readable membership duration since a join date
pub fn member_for(join_date: &DateTime<Utc>) -> String {
    let days = (now() - *join_date).num_days().max(0);
    match days {
        0 => "joined today".to_string(),
        1 => "member for 1 day".to_string(),
        d if d < 60 => format!("member for {d} days"),
        d => format!("member for {} months", d / 30),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_date_flexible("2024-03-01T10:30:00Z").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 10:30");
    }

    #[test]
    fn test_parse_space_separated() {
        let dt = parse_date_flexible("2024-03-01 10:30:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn test_parse_plain_date_is_midnight() {
        let dt = parse_date_flexible("2024-03-01").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-01 00:00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_flexible("").is_err());
        assert!(parse_date_flexible("yesterday").is_err());
        assert!(parse_date_flexible("31/12/2024").is_err());
    }

    #[test]
    fn test_member_for() {
        let recent = now() - chrono::Duration::days(10);
        assert_eq!(member_for(&recent), "member for 10 days");

        let old = now() - chrono::Duration::days(90);
        assert_eq!(member_for(&old), "member for 3 months");
    }
}
