//! Validation of enriched records and event emission.

use super::error::RejectReason;
use super::types::{Event, PartialRecord};
use uuid::Uuid;

/// Turns an enriched record into an [`Event`], or says why it can't be one.
///
/// A record is accepted when both instants and the end of coverage localized
/// and at least one day resolved. The id is generated here and only here.
pub fn assemble(record: PartialRecord) -> Result<Event, RejectReason> {
    let summary = record.summary();

    let (Some(start_time_str), Some(end_time_str)) = (record.start_time_str, record.end_time_str)
    else {
        return Err(RejectReason::UnresolvedTimeRange {
            time_str: record.time_str,
        });
    };

    let (Some(start_date_str), Some(end_date_str)) = (record.start_date_str, record.end_date_str)
    else {
        return Err(RejectReason::UnresolvedDateRange {
            date_str: record.date_str,
        });
    };

    if record.start.is_none() || record.end.is_none() {
        return Err(RejectReason::InvalidTimestamp {
            value: format!("{start_date_str} {start_time_str}-{end_time_str}"),
        });
    }

    if record.until.is_none() {
        return Err(RejectReason::InvalidTimestamp {
            value: end_date_str,
        });
    }

    if record.days_of_week.is_empty() {
        return Err(RejectReason::NoMeetingDays {
            days_str: record.days_str,
        });
    }

    Ok(Event {
        id: Uuid::new_v4(),
        summary,
        class_num: record.class_num,
        units: record.units,
        instructors: record.instructors,
        location: record.location,
        days_of_week: record.days_of_week,
        start_time_str,
        end_time_str,
        start_date_str,
        end_date_str,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::DayCode;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn resolved_record() -> PartialRecord {
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        PartialRecord {
            class_num: "12345".to_string(),
            course_code: "CSE 110".to_string(),
            title: "Intro".to_string(),
            units: "3.0".to_string(),
            days_str: "MW".to_string(),
            days_of_week: vec![DayCode::Mo, DayCode::We],
            start_time_str: Some("10:00 AM".to_string()),
            end_time_str: Some("10:50 AM".to_string()),
            start_date_str: Some("1/08/24".to_string()),
            end_date_str: Some("5/03/24".to_string()),
            start: tz.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).single(),
            end: tz.with_ymd_and_hms(2024, 1, 8, 10, 50, 0).single(),
            until: tz
                .with_ymd_and_hms(2024, 5, 3, 23, 59, 59)
                .single()
                .map(|d| d.with_timezone(&Utc)),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepts_resolved_record() {
        let event = assemble(resolved_record()).unwrap();
        assert_eq!(event.summary, "CSE 110 - Intro");
        assert_eq!(event.days_of_week, vec![DayCode::Mo, DayCode::We]);
        assert_eq!(event.start_time_str, "10:00 AM");
        assert_eq!(event.end_date_str, "5/03/24");
    }

    #[test]
    fn test_each_acceptance_gets_a_fresh_id() {
        let a = assemble(resolved_record()).unwrap();
        let b = assemble(resolved_record()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rejects_missing_time() {
        let record = PartialRecord {
            start_time_str: None,
            time_str: "TBA".to_string(),
            ..resolved_record()
        };
        assert_eq!(
            assemble(record).unwrap_err(),
            RejectReason::UnresolvedTimeRange {
                time_str: "TBA".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_missing_date() {
        let record = PartialRecord {
            start_date_str: None,
            end_date_str: None,
            ..resolved_record()
        };
        assert!(matches!(
            assemble(record).unwrap_err(),
            RejectReason::UnresolvedDateRange { .. }
        ));
    }

    #[test]
    fn test_rejects_unparsable_instant() {
        let record = PartialRecord {
            start: None,
            ..resolved_record()
        };
        assert!(matches!(
            assemble(record).unwrap_err(),
            RejectReason::InvalidTimestamp { .. }
        ));
    }

    #[test]
    fn test_rejects_unparsable_end_date() {
        let record = PartialRecord {
            end_date_str: Some("5/40/24".to_string()),
            until: None,
            ..resolved_record()
        };
        assert_eq!(
            assemble(record).unwrap_err(),
            RejectReason::InvalidTimestamp {
                value: "5/40/24".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_empty_days() {
        let record = PartialRecord {
            days_str: "TBA".to_string(),
            days_of_week: vec![],
            ..resolved_record()
        };
        assert_eq!(
            assemble(record).unwrap_err(),
            RejectReason::NoMeetingDays {
                days_str: "TBA".to_string()
            }
        );
    }
}
