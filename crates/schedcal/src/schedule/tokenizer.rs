//! Positional tokenizer for one logical schedule line.
//!
//! A printout line looks like
//!
//! ```text
//! 12345 CSE 110 Intro to Programming 3.0 Smith J MWF 10:00AM-10:50AM 1/08/24-5/03/24 Tempe PSA101
//! ```
//!
//! and is read left to right: class number, course code, title up to the
//! units, instructors up to the first day token, the day tokens, time up to
//! the first date, date up to the campus marker, then the location.

use super::config::ScheduleConfig;
use super::error::RejectReason;
use super::types::PartialRecord;
use regex::Regex;
use std::sync::LazyLock;

static CLASS_NUM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5,6}$").unwrap());
static SUBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}$").unwrap());
static COURSE_NUM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}$").unwrap());
static COURSE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}\d{3}$").unwrap());
static UNITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+$").unwrap());
static DATE_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}").unwrap());

/// Cursor over the whitespace tokens of a line.
struct Cursor<'a> {
    tokens: Vec<&'a str>,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split_whitespace().collect(),
            index: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.index).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.index + offset).copied()
    }

    fn advance(&mut self, n: usize) {
        self.index = (self.index + n).min(self.tokens.len());
    }

    /// Consumes the next token if `pred` holds for it.
    fn take_if(&mut self, pred: impl Fn(&str) -> bool) -> Option<&'a str> {
        let token = self.peek().filter(|&t| pred(t))?;
        self.index += 1;
        Some(token)
    }

    /// Consumes tokens up to (not including) the first one where `stop` holds.
    fn take_until(&mut self, stop: impl Fn(&str) -> bool) -> String {
        self.take_run(|t| !stop(t))
    }

    /// Consumes tokens for as long as `keep` holds.
    fn take_run(&mut self, keep: impl Fn(&str) -> bool) -> String {
        let start = self.index;
        while self.peek().is_some_and(&keep) {
            self.index += 1;
        }
        self.tokens[start..self.index].join(" ")
    }

    fn rest(&mut self) -> Vec<&'a str> {
        let rest = self.tokens[self.index..].to_vec();
        self.index = self.tokens.len();
        rest
    }
}

/// Tokenizes one logical line into a [`PartialRecord`].
///
/// Class number, course code and units are required; every other field may
/// come out empty.
pub fn tokenize_line(line: &str, config: &ScheduleConfig) -> Result<PartialRecord, RejectReason> {
    let mut cursor = Cursor::new(line);

    let class_num = cursor
        .take_if(|t| CLASS_NUM_REGEX.is_match(t))
        .ok_or(RejectReason::MissingClassNumber)?;

    let course_code = take_course_code(&mut cursor).ok_or(RejectReason::MissingCourseCode)?;

    let title = cursor.take_until(|t| UNITS_REGEX.is_match(t));
    let units = cursor
        .take_if(|t| UNITS_REGEX.is_match(t))
        .ok_or(RejectReason::MissingUnits)?;

    let instructors = cursor.take_until(|t| config.is_day_token(t));
    let days_str = cursor.take_run(|t| config.is_day_token(t));
    let time_str = cursor.take_until(|t| DATE_START_REGEX.is_match(t));

    let prefix = config.location_prefix.as_str();
    let date_str = cursor.take_until(|t| !prefix.is_empty() && t.starts_with(prefix));
    let (campus, location) = split_location(&cursor.rest(), prefix);

    Ok(PartialRecord {
        class_num: class_num.to_string(),
        course_code,
        title,
        units: units.to_string(),
        instructors,
        days_str,
        time_str,
        date_str,
        campus,
        location,
        ..Default::default()
    })
}

/// `CSE 110` as two tokens, or `CSE110` as one.
fn take_course_code(cursor: &mut Cursor<'_>) -> Option<String> {
    let first = cursor.peek()?;

    if let Some(second) = cursor.peek_at(1) {
        if SUBJECT_REGEX.is_match(first) && COURSE_NUM_REGEX.is_match(second) {
            cursor.advance(2);
            return Some(format!("{first} {second}"));
        }
    }

    cursor
        .take_if(|t| COURSE_CODE_REGEX.is_match(t))
        .map(str::to_string)
}

/// Splits the trailing tokens into the campus marker and the room.
///
/// The marker token has its prefix removed; anything glued after the prefix
/// (`TempePSA101`) is the start of the room.
fn split_location(rest: &[&str], prefix: &str) -> (Option<String>, String) {
    let Some((first, tail)) = rest.split_first() else {
        return (None, String::new());
    };

    match first.strip_prefix(prefix).filter(|_| !prefix.is_empty()) {
        Some(glued) => {
            let location = std::iter::once(glued)
                .filter(|s| !s.is_empty())
                .chain(tail.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            (Some(prefix.to_string()), location)
        }
        None => (None, rest.join(" ")),
    }
}
