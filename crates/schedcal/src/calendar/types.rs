/// Types for the calendar-insertion payload
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::DayCode;

/// Weekly repetition on the given days until a UTC instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub days: Vec<DayCode>,
    pub until: DateTime<Utc>,
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let by_day = self
            .days
            .iter()
            .map(DayCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "RRULE:FREQ=WEEKLY;BYDAY={};UNTIL={}",
            by_day,
            self.until.format("%Y%m%dT%H%M%SZ")
        )
    }
}

/// A zoned wall-clock time, as the calendar API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// RFC 3339 with offset
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    pub fn new(instant: DateTime<FixedOffset>, time_zone: &str) -> Self {
        Self {
            date_time: instant.to_rfc3339(),
            time_zone: time_zone.to_string(),
        }
    }
}

/// Body of one calendar insert request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventBody {
    pub summary: String,
    pub location: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    /// `None` when the event has no days or no end date to stop at
    pub recurrence: Option<Vec<String>>,
}
