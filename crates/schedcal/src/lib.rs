//! Turns OCR text of a class-schedule printout into recurring calendar events.
//!
//! The [`schedule`] module does the parsing: it rejoins wrapped OCR lines,
//! reads each course line field by field, resolves days, times and dates in
//! the institution's zone, and emits one [`schedule::Event`] per class that
//! has everything a calendar needs. The [`calendar`] module turns those
//! events into insert-request bodies with a weekly recurrence rule.
//!
//! ```
//! use schedcal::schedule::ScheduleParser;
//!
//! let text = "12345 CSE 110 Intro to Programming 3.0 Smith J MWF 10:00AM-10:50AM 1/08/24-5/03/24 Tempe PSA101";
//! let events = ScheduleParser::default().parse(text);
//! assert_eq!(events[0].summary, "CSE 110 - Intro to Programming");
//! ```

pub mod calendar;
pub mod schedule;
