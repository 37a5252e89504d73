//! Error types for the schedule parsing subsystem.

use thiserror::Error;

/// Reasons a single logical line is dropped instead of becoming an event.
///
/// None of these abort a batch; the parser logs them and moves on to the
/// next line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The line did not start with a 5-6 digit class number
    #[error("No class number found")]
    MissingClassNumber,

    /// Neither `CSE 110` nor `CSE110` followed the class number
    #[error("No course code found")]
    MissingCourseCode,

    /// No `digits.digits` units token after the title
    #[error("No units found")]
    MissingUnits,

    /// The time field had no `H:MM AM - H:MM PM` range
    #[error("No time range in {time_str:?}")]
    UnresolvedTimeRange { time_str: String },

    /// The date field had no `MM/DD/YY - MM/DD/YY` range
    #[error("No date range in {date_str:?}")]
    UnresolvedDateRange { date_str: String },

    /// A range matched but did not form a real calendar timestamp (e.g. `13/40/24`)
    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    /// Day field resolved to nothing (`TBA`, `Arranged`, or only unknown tokens)
    #[error("No meeting days in {days_str:?}")]
    NoMeetingDays { days_str: String },
}

impl RejectReason {
    /// Returns true if the line never got past tokenizing, i.e. it was not
    /// recognizably a course record at all.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            RejectReason::MissingClassNumber
                | RejectReason::MissingCourseCode
                | RejectReason::MissingUnits
        )
    }
}

/// Errors that can occur while loading a [`ScheduleConfig`](super::ScheduleConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file was not valid JSON for the config shape
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    /// Offset is outside of what a real zone can have
    #[error("Invalid UTC offset for {name}: {minutes} minutes")]
    InvalidOffset { name: String, minutes: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_reasons() {
        assert!(RejectReason::MissingClassNumber.is_structural());
        assert!(RejectReason::MissingUnits.is_structural());
        assert!(!RejectReason::NoMeetingDays {
            days_str: "TBA".to_string()
        }
        .is_structural());
        assert!(!RejectReason::InvalidTimestamp {
            value: "5/40/24".to_string()
        }
        .is_structural());
    }
}
