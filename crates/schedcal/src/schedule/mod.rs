/// OCR schedule parsing: text in, recurring class events out
mod assembler;
mod config;
mod days;
mod error;
mod segmenter;
mod time_range;
mod tokenizer;
mod types;

pub use assembler::assemble;
pub use config::{DayTable, ScheduleConfig, TimezoneConfig};
pub use days::normalize_days;
pub use error::{ConfigError, RejectReason};
pub use segmenter::segment_lines;
pub use time_range::{
    end_of_coverage, extract_date_range, extract_time_range, localize, normalize_time_format,
    resolve_times,
};
pub use tokenizer::tokenize_line;
pub use types::*;

use chrono::{FixedOffset, Offset, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Runs OCR text through segmenting, tokenizing, normalizing, resolving and
/// assembling.
///
/// Holds only immutable configuration, so one parser can be shared freely
/// and every call is independent of the others.
#[derive(Debug, Clone)]
pub struct ScheduleParser {
    config: ScheduleConfig,
    tz: FixedOffset,
}

impl ScheduleParser {
    /// Creates a parser with the given configuration.
    ///
    /// # Returns
    /// * `Ok(ScheduleParser)` - Ready to parse
    /// * `Err(ConfigError)` - If the configured zone offset is invalid
    pub fn new(config: ScheduleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tz = config
            .timezone
            .offset()
            .ok_or_else(|| ConfigError::InvalidOffset {
                name: config.timezone.name.clone(),
                minutes: config.timezone.utc_offset_minutes,
            })?;
        Ok(Self { config, tz })
    }

    /// Gets the parser configuration
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Parses one block of OCR text into events, dropping lines that don't
    /// make a complete class meeting. An empty result is not an error.
    pub fn parse(&self, text: &str) -> Vec<Event> {
        self.parse_outcomes(text)
            .into_iter()
            .filter_map(RecordOutcome::into_event)
            .collect()
    }

    /// Like [`parse`](Self::parse) but also reports every dropped line.
    pub fn parse_report(&self, text: &str) -> ParseReport {
        ParseReport::from_outcomes(self.parse_outcomes(text))
    }

    /// One outcome per logical line, in input order.
    pub fn parse_outcomes(&self, text: &str) -> Vec<RecordOutcome> {
        let lines = segment_lines(text, &self.config.noise_marker);
        info!("Segmented OCR text into {} logical lines", lines.len());

        lines.into_iter().map(|line| self.process_line(line)).collect()
    }

    /// Parses several OCR pages (e.g. one per screenshot) as one schedule.
    ///
    /// Pages are segmented separately, so a record can't wrap across pages.
    /// Lines are processed in parallel; the output keeps page and line order.
    pub fn parse_pages<S: AsRef<str> + Sync>(&self, pages: &[S]) -> ParseReport {
        let lines: Vec<String> = pages
            .iter()
            .flat_map(|page| segment_lines(page.as_ref(), &self.config.noise_marker))
            .collect();
        info!(
            "Segmented {} pages into {} logical lines",
            pages.len(),
            lines.len()
        );

        let outcomes: Vec<RecordOutcome> = lines
            .into_par_iter()
            .map(|line| self.process_line(line))
            .collect();

        ParseReport::from_outcomes(outcomes)
    }

    /// Tokenizes, enriches and validates a single logical line.
    pub fn process_line(&self, line: String) -> RecordOutcome {
        match self.build_event(&line) {
            Ok(event) => {
                info!(
                    class_num = %event.class_num,
                    days = %event.days_display(),
                    "Parsed event: {}",
                    event.summary
                );
                RecordOutcome::Accepted(event)
            }
            Err(reason) if reason.is_structural() => {
                debug!(reason = %reason, "Skipping non-course line: {line}");
                RecordOutcome::Rejected { line, reason }
            }
            Err(reason) => {
                warn!(reason = %reason, "Skipping course line: {line}");
                RecordOutcome::Rejected { line, reason }
            }
        }
    }

    fn build_event(&self, line: &str) -> Result<Event, RejectReason> {
        let mut record = tokenize_line(line, &self.config)?;

        record.days_of_week = normalize_days(&record.days_str, &self.config.days);
        resolve_times(&mut record, &self.tz);

        debug!(
            class_num = %record.class_num,
            start_time = ?record.start_time_str,
            end_time = ?record.end_time_str,
            days = ?record.days_of_week,
            "Resolved record fields"
        );

        assemble(record)
    }
}

impl Default for ScheduleParser {
    fn default() -> Self {
        Self {
            config: ScheduleConfig::default(),
            tz: TimezoneConfig::default().offset().unwrap_or(Utc.fix()),
        }
    }
}
