//! Time and date range extraction, and localization into the fixed zone.

use super::types::PartialRecord;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2}\s?(?:AM|PM))\s*[-–—]\s*(\d{1,2}:\d{2}\s?(?:AM|PM))").unwrap()
});
static DATE_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}/\d{1,2}/\d{2})\s*[-–—]\s*(\d{1,2}/\d{1,2}/\d{2})").unwrap()
});
static MERIDIEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d)\s?(AM|PM)$").unwrap());

const DATE_FORMAT: &str = "%m/%d/%y";
const DATE_TIME_FORMAT: &str = "%m/%d/%y %I:%M %p";

/// Finds `H:MM AM - H:MM PM` in `time_str` and returns both sides normalized.
pub fn extract_time_range(time_str: &str) -> Option<(String, String)> {
    let caps = TIME_RANGE_REGEX.captures(time_str)?;
    Some((
        normalize_time_format(&caps[1]),
        normalize_time_format(&caps[2]),
    ))
}

/// Finds `MM/DD/YY - MM/DD/YY` in `date_str`.
pub fn extract_date_range(date_str: &str) -> Option<(String, String)> {
    let caps = DATE_RANGE_REGEX.captures(date_str)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Puts exactly one space before an uppercase meridiem: `10:00am` -> `10:00 AM`.
pub fn normalize_time_format(time_str: &str) -> String {
    MERIDIEM_REGEX
        .replace(time_str, |caps: &regex::Captures| {
            format!("{} {}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Parses `date_str` + `time_str` as wall-clock time in `tz`.
pub fn localize(date_str: &str, time_str: &str, tz: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive =
        NaiveDateTime::parse_from_str(&format!("{date_str} {time_str}"), DATE_TIME_FORMAT).ok()?;
    tz.from_local_datetime(&naive).single()
}

/// The last second of `end_date_str` in `tz`, as UTC. Recurrences stop here.
pub fn end_of_coverage(end_date_str: &str, tz: &FixedOffset) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(end_date_str, DATE_FORMAT).ok()?;
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)?;
    let local = tz.from_local_datetime(&date.and_time(last_second)).single()?;
    Some(local.with_timezone(&Utc))
}

/// Fills the time/date string fields and the transient instants of `record`.
///
/// Anything that doesn't resolve is left as `None`; the assembler decides
/// what that means for the record.
pub fn resolve_times(record: &mut PartialRecord, tz: &FixedOffset) {
    match extract_time_range(&record.time_str) {
        Some((start, end)) => {
            record.start_time_str = Some(start);
            record.end_time_str = Some(end);
        }
        None => {
            record.start_time_str = None;
            record.end_time_str = None;
        }
    }

    match extract_date_range(&record.date_str) {
        Some((start, end)) => {
            record.start_date_str = Some(start);
            record.end_date_str = Some(end);
        }
        None => {
            record.start_date_str = None;
            record.end_date_str = None;
        }
    }

    // Both ends of the meeting fall on the start date; the weekly rule repeats it.
    let start_date = record.start_date_str.as_deref();
    record.start = localize_opt(start_date, record.start_time_str.as_deref(), tz);
    record.end = localize_opt(start_date, record.end_time_str.as_deref(), tz);
    record.until = record
        .end_date_str
        .as_deref()
        .and_then(|d| end_of_coverage(d, tz));

    if let Some(start) = record.start {
        debug!(class_num = %record.class_num, "Localized start time: {}", start.to_rfc3339());
    }
    if let Some(end) = record.end {
        debug!(class_num = %record.class_num, "Localized end time: {}", end.to_rfc3339());
    }
}

fn localize_opt(
    date: Option<&str>,
    time: Option<&str>,
    tz: &FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let (date, time) = (date?, time?);
    let local = localize(date, time, tz);
    if local.is_none() {
        warn!("Could not parse timestamp: {date} {time}");
    }
    local
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phoenix() -> FixedOffset {
        FixedOffset::west_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_glued_meridiem_is_split() {
        assert_eq!(
            extract_time_range("10:00AM-10:50AM"),
            Some(("10:00 AM".to_string(), "10:50 AM".to_string()))
        );
    }

    #[test]
    fn test_dash_variants_and_case() {
        assert_eq!(
            extract_time_range("1:30 pm – 2:45pm"),
            Some(("1:30 PM".to_string(), "2:45 PM".to_string()))
        );
        assert_eq!(
            extract_time_range("9:00AM—9:50AM"),
            Some(("9:00 AM".to_string(), "9:50 AM".to_string()))
        );
    }

    #[test]
    fn test_no_time_range() {
        assert_eq!(extract_time_range("TBA"), None);
        assert_eq!(extract_time_range("10:00AM"), None);
    }

    #[test]
    fn test_date_range() {
        assert_eq!(
            extract_date_range("1/08/24-5/03/24"),
            Some(("1/08/24".to_string(), "5/03/24".to_string()))
        );
        assert_eq!(
            extract_date_range("08/22/24 – 12/06/24"),
            Some(("08/22/24".to_string(), "12/06/24".to_string()))
        );
        assert_eq!(extract_date_range("1/08/2024-5/03/2024"), None);
    }

    #[test]
    fn test_localize_in_fixed_zone() {
        let start = localize("1/08/24", "10:00 AM", &phoenix()).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-08T10:00:00-07:00");

        let end = localize("1/08/24", "1:15 PM", &phoenix()).unwrap();
        assert_eq!(end.to_rfc3339(), "2024-01-08T13:15:00-07:00");

        // Summer has the same offset
        let summer = localize("7/01/24", "10:00 AM", &phoenix()).unwrap();
        assert_eq!(summer.to_rfc3339(), "2024-07-01T10:00:00-07:00");
    }

    #[test]
    fn test_localize_rejects_impossible_dates() {
        assert!(localize("13/40/24", "10:00 AM", &phoenix()).is_none());
    }

    #[test]
    fn test_end_of_coverage_rolls_into_next_utc_day() {
        let until = end_of_coverage("5/03/24", &phoenix()).unwrap();
        assert_eq!(until.format("%Y%m%dT%H%M%SZ").to_string(), "20240504T065959Z");
    }

    #[test]
    fn test_resolve_fills_record() {
        let mut record = PartialRecord {
            time_str: "10:00AM-10:50AM".to_string(),
            date_str: "1/08/24-5/03/24".to_string(),
            ..Default::default()
        };
        resolve_times(&mut record, &phoenix());

        assert_eq!(record.start_time_str.as_deref(), Some("10:00 AM"));
        assert_eq!(record.end_time_str.as_deref(), Some("10:50 AM"));
        assert_eq!(record.start_date_str.as_deref(), Some("1/08/24"));
        assert_eq!(record.end_date_str.as_deref(), Some("5/03/24"));
        assert_eq!(
            record.end.unwrap().to_rfc3339(),
            "2024-01-08T10:50:00-07:00"
        );
        assert!(record.until.is_some());
    }

    #[test]
    fn test_resolve_without_time_leaves_instants_empty() {
        let mut record = PartialRecord {
            time_str: "TBA".to_string(),
            date_str: "1/08/24-5/03/24".to_string(),
            ..Default::default()
        };
        resolve_times(&mut record, &phoenix());

        assert!(record.start_time_str.is_none());
        assert!(record.start.is_none());
        assert!(record.end.is_none());
        assert_eq!(record.start_date_str.as_deref(), Some("1/08/24"));
    }
}
