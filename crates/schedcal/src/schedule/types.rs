/// Types for parsed schedule data
use super::error::RejectReason;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical two-letter weekday code, as used in `BYDAY=` recurrence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayCode {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl DayCode {
    pub const ALL: [DayCode; 7] = [
        DayCode::Mo,
        DayCode::Tu,
        DayCode::We,
        DayCode::Th,
        DayCode::Fr,
        DayCode::Sa,
        DayCode::Su,
    ];

    /// The canonical code, e.g. `"MO"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayCode::Mo => "MO",
            DayCode::Tu => "TU",
            DayCode::We => "WE",
            DayCode::Th => "TH",
            DayCode::Fr => "FR",
            DayCode::Sa => "SA",
            DayCode::Su => "SU",
        }
    }

    /// Short human abbreviation, the way the schedule printout writes it.
    pub fn short_label(&self) -> &'static str {
        match self {
            DayCode::Mo => "M",
            DayCode::Tu => "Tu",
            DayCode::We => "W",
            DayCode::Th => "Th",
            DayCode::Fr => "F",
            DayCode::Sa => "Sa",
            DayCode::Su => "Su",
        }
    }
}

impl std::fmt::Display for DayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted fields for one course line, before validation.
///
/// The tokenizer fills the raw string fields; the day normalizer and the
/// time/date resolver fill the rest in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRecord {
    pub class_num: String,
    pub course_code: String,
    pub title: String,
    pub units: String,
    pub instructors: String,
    pub days_str: String,
    pub time_str: String,
    pub date_str: String,
    /// Location prefix (e.g. `Tempe`) if the line had a token starting with it
    pub campus: Option<String>,
    pub location: String,

    pub days_of_week: Vec<DayCode>,
    pub start_time_str: Option<String>,
    pub end_time_str: Option<String>,
    pub start_date_str: Option<String>,
    pub end_date_str: Option<String>,

    // Transient; never carried over to `Event`.
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub until: Option<DateTime<Utc>>,
}

impl PartialRecord {
    /// `"{course_code} - {title}"`
    pub fn summary(&self) -> String {
        format!("{} - {}", self.course_code, self.title)
    }
}

/// A validated class meeting series.
///
/// Only the string forms of times and dates are kept; instants are re-derived
/// on demand (see [`crate::calendar`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub summary: String,
    pub class_num: String,
    pub units: String,
    pub instructors: String,
    pub location: String,
    pub days_of_week: Vec<DayCode>,
    pub start_time_str: String,
    pub end_time_str: String,
    pub start_date_str: String,
    pub end_date_str: String,
}

impl Event {
    /// Days as the printout abbreviates them, e.g. `"M, W, F"`.
    pub fn days_display(&self) -> String {
        self.days_of_week
            .iter()
            .map(DayCode::short_label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// What happened to one logical line.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Accepted(Event),
    Rejected { line: String, reason: RejectReason },
}

impl RecordOutcome {
    pub fn into_event(self) -> Option<Event> {
        match self {
            RecordOutcome::Accepted(event) => Some(event),
            RecordOutcome::Rejected { .. } => None,
        }
    }
}

/// A rejected line and why, for reporting back to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    pub line: String,
    pub reason: String,
}

/// Full result of a parse, including what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub events: Vec<Event>,
    pub rejected: Vec<RejectedLine>,
}

impl ParseReport {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = RecordOutcome>) -> Self {
        let mut report = ParseReport::default();
        for outcome in outcomes {
            match outcome {
                RecordOutcome::Accepted(event) => report.events.push(event),
                RecordOutcome::Rejected { line, reason } => report.rejected.push(RejectedLine {
                    line,
                    reason: reason.to_string(),
                }),
            }
        }
        report
    }
}
