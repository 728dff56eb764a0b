use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub fn day_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Parse an absolute date given on the command line (RFC3339 or
/// YYYY-MM-DD). Relative forms like "2 weeks ago" return `None` and are
/// left for git to interpret.
pub fn parse_absolute_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Some(Utc.from_utc_datetime(&datetime));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_is_utc_calendar_day() {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T23:30:00-02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(day_key(&ts), "2024-01-02");
    }

    #[test]
    fn absolute_dates_only() {
        assert!(parse_absolute_date("2024-05-01").is_some());
        assert!(parse_absolute_date("2024-05-01T12:00:00Z").is_some());
        assert!(parse_absolute_date("2 weeks ago").is_none());
        assert!(parse_absolute_date("yesterday").is_none());
    }
}
