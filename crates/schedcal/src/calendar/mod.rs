/// Calendar payloads built from parsed events
mod types;

pub use types::*;

use crate::schedule::{end_of_coverage, localize, Event, ScheduleConfig};
use thiserror::Error;
use tracing::debug;

/// Errors re-deriving instants from an event's string fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The configured zone offset is out of range
    #[error("Invalid timezone configuration: {name}")]
    InvalidTimezone { name: String },

    /// Start date and time didn't parse back into a timestamp
    #[error("Invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
}

/// Builds the weekly rule for `event`, or `None` if it has no days or its end
/// date doesn't parse.
pub fn recurrence_rule(event: &Event, config: &ScheduleConfig) -> Option<RecurrenceRule> {
    if event.days_of_week.is_empty() {
        return None;
    }
    let tz = config.timezone.offset()?;
    let until = end_of_coverage(&event.end_date_str, &tz)?;

    Some(RecurrenceRule {
        days: event.days_of_week.clone(),
        until,
    })
}

/// Builds the insert request body for one event.
///
/// Start and end are both on the first class day; the recurrence rule
/// repeats them weekly through the end date.
///
/// # Arguments
/// * `event` - A parsed event
/// * `config` - Config carrying the zone the event's strings are written in
///
/// # Returns
/// * `Ok(CalendarEventBody)` - Ready to serialize and send
/// * `Err(PayloadError)` - If the zone or timestamps don't resolve
pub fn build_event_body(
    event: &Event,
    config: &ScheduleConfig,
) -> Result<CalendarEventBody, PayloadError> {
    let tz = config
        .timezone
        .offset()
        .ok_or_else(|| PayloadError::InvalidTimezone {
            name: config.timezone.name.clone(),
        })?;

    let localize_or_err = |time_str: &str| {
        localize(&event.start_date_str, time_str, &tz).ok_or_else(|| {
            PayloadError::InvalidTimestamp {
                value: format!("{} {}", event.start_date_str, time_str),
            }
        })
    };
    let start = localize_or_err(&event.start_time_str)?;
    let end = localize_or_err(&event.end_time_str)?;

    let recurrence = recurrence_rule(event, config).map(|rule| vec![rule.to_string()]);

    let body = CalendarEventBody {
        summary: event.summary.clone(),
        location: event.location.clone(),
        start: EventDateTime::new(start, &config.timezone.name),
        end: EventDateTime::new(end, &config.timezone.name),
        recurrence,
    };
    debug!("Built calendar body for {}: {:?}", event.summary, body.recurrence);

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{DayCode, ScheduleParser};

    fn parsed_event() -> Event {
        let line = "12345 CSE 110 Intro to Programming 3.0 Smith J MWF 10:00AM-10:50AM 1/08/24-5/03/24 Tempe PSA101";
        ScheduleParser::default().parse(line).remove(0)
    }

    #[test]
    fn test_recurrence_rule_string() {
        let rule = recurrence_rule(&parsed_event(), &ScheduleConfig::default()).unwrap();
        assert_eq!(
            rule.to_string(),
            "RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;UNTIL=20240504T065959Z"
        );
    }

    #[test]
    fn test_recurrence_keeps_input_day_order() {
        let mut event = parsed_event();
        event.days_of_week = vec![DayCode::Fr, DayCode::Mo];
        let rule = recurrence_rule(&event, &ScheduleConfig::default()).unwrap();
        assert!(rule.to_string().contains("BYDAY=FR,MO;"));
    }

    #[test]
    fn test_event_body() {
        let body = build_event_body(&parsed_event(), &ScheduleConfig::default()).unwrap();
        assert_eq!(body.summary, "CSE 110 - Intro to Programming");
        assert_eq!(body.location, "PSA101");
        assert_eq!(body.start.date_time, "2024-01-08T10:00:00-07:00");
        assert_eq!(body.end.date_time, "2024-01-08T10:50:00-07:00");
        assert_eq!(body.start.time_zone, "America/Phoenix");
        assert_eq!(
            body.recurrence,
            Some(vec![
                "RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;UNTIL=20240504T065959Z".to_string()
            ])
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["start"]["dateTime"], "2024-01-08T10:00:00-07:00");
        assert_eq!(json["end"]["timeZone"], "America/Phoenix");
    }

    #[test]
    fn test_bad_end_date_omits_recurrence() {
        let mut event = parsed_event();
        event.end_date_str = "99/99/24".to_string();
        let body = build_event_body(&event, &ScheduleConfig::default()).unwrap();
        assert!(body.recurrence.is_none());
    }

    #[test]
    fn test_bad_start_is_an_error() {
        let mut event = parsed_event();
        event.start_time_str = "25:00 AM".to_string();
        assert!(matches!(
            build_event_body(&event, &ScheduleConfig::default()),
            Err(PayloadError::InvalidTimestamp { .. })
        ));
    }
}
