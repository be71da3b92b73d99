//! Lenient date parsing shared by the JSON model and CSV import.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

/// Plain-date formats tried in order before falling back to timestamps.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

/// Parse a date the way the backend and exported spreadsheets write them.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (`2025-01-10T00:00:00.000Z`),
/// offset-less timestamps and a few day-first formats. Returns `None` for
/// anything unparsable so callers can treat the value as absent.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })?;

    in_supported_range(parsed).then_some(parsed)
}

/// Dates from epoch milliseconds, as some exports store them.
pub fn from_timestamp_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .filter(|d| in_supported_range(*d))
}

// Keeps window arithmetic far away from chrono's representable limits.
fn in_supported_range(date: NaiveDate) -> bool {
    (1..=9999).contains(&date.year())
}

/// First day of the date's month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the date's month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    next_month_start(date).pred_opt().unwrap_or(date)
}

/// First day of the month after the date's month.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(date + chrono::Duration::days(31))
}

/// Move a date by whole calendar months, clamping the day to the target
/// month's length (Mar 31 minus one month is Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date + chrono::Duration::days(30 * i64::from(months)))
}

/// Serde adapter for optional dates coming from the REST backend.
///
/// Strings are parsed with [`parse_date`], integers as epoch milliseconds;
/// everything else (including unparsable strings) deserializes as `None`.
pub mod lenient {
    use chrono::NaiveDate;
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Millis(i64),
        Other(IgnoredAny),
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<RawDate> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawDate::Text(s)) => super::parse_date(&s),
            Some(RawDate::Millis(ms)) => super::from_timestamp_millis(ms),
            Some(RawDate::Other(_)) | None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_backend_formats() {
        assert_eq!(parse_date("2025-01-10"), Some(ymd(2025, 1, 10)));
        assert_eq!(parse_date("2025-01-10T00:00:00.000Z"), Some(ymd(2025, 1, 10)));
        assert_eq!(parse_date("2025-01-10T08:15:00"), Some(ymd(2025, 1, 10)));
        assert_eq!(parse_date(" 10/01/2025 "), Some(ymd(2025, 1, 10)));
        assert_eq!(parse_date("10.01.2025"), Some(ymd(2025, 1, 10)));
    }

    #[test]
    fn garbage_is_absent() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2025-13-45"), None);
        assert_eq!(parse_date("0000-01-01"), None);
    }

    #[test]
    fn month_boundaries() {
        assert_eq!(month_start(ymd(2024, 2, 17)), ymd(2024, 2, 1));
        assert_eq!(month_end(ymd(2024, 2, 17)), ymd(2024, 2, 29));
        assert_eq!(month_end(ymd(2024, 12, 3)), ymd(2024, 12, 31));
        assert_eq!(next_month_start(ymd(2024, 12, 31)), ymd(2025, 1, 1));
    }

    #[test]
    fn shifting_months_clamps_day() {
        assert_eq!(shift_months(ymd(2025, 3, 31), -1), ymd(2025, 2, 28));
        assert_eq!(shift_months(ymd(2025, 11, 15), 3), ymd(2026, 2, 15));
    }

    #[test]
    fn lenient_adapter_swallows_bad_values() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[serde(default, with = "lenient")]
            at: Option<NaiveDate>,
        }

        let ok: Row = serde_json::from_str(r#"{"at":"2025-01-10T00:00:00Z"}"#).unwrap();
        assert_eq!(ok.at, Some(ymd(2025, 1, 10)));
        let bad: Row = serde_json::from_str(r#"{"at":"not a date"}"#).unwrap();
        assert_eq!(bad.at, None);
        let weird: Row = serde_json::from_str(r#"{"at":{"$date":1}}"#).unwrap();
        assert_eq!(weird.at, None);
        let null: Row = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(null.at, None);
        let missing: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.at, None);
        let millis: Row = serde_json::from_str(r#"{"at":1736467200000}"#).unwrap();
        assert_eq!(millis.at, Some(ymd(2025, 1, 10)));
    }
}
