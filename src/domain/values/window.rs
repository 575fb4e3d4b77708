use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Inclusive `[start, end]` range for the statistics queries.
/// Missing bounds default to the Unix epoch and the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl StatsWindow {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Resolves both bounds into their stored text form.
    pub fn bounds(&self, now: DateTime<Utc>) -> (String, String) {
        let start = self.start.unwrap_or_default();
        let end = self.end.unwrap_or(now);
        (to_db_timestamp(&start), to_db_timestamp(&end))
    }
}

/// Text form used for every persisted timestamp. Fixed width with a `Z`
/// suffix so that string comparison in SQL orders chronologically.
pub fn to_db_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
    }
    Err(format!("Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_epoch_and_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let (start, end) = StatsWindow::default().bounds(now);
        assert_eq!(start, "1970-01-01T00:00:00.000Z");
        assert_eq!(end, "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn parses_date_only() {
        let dt = parse_date("2024-03-15").unwrap();
        assert_eq!(to_db_timestamp(&dt), "2024-03-15T00:00:00.000Z");
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_date("2024-03-15T10:00:00+02:00").unwrap();
        assert_eq!(to_db_timestamp(&dt), "2024-03-15T08:00:00.000Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("last tuesday").is_err());
    }
}
