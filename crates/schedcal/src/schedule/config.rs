/// Configuration for the source institution's printout format
use super::error::ConfigError;
use super::types::DayCode;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Top-level parser configuration.
///
/// Everything tied to one institution's catalog format lives here: the
/// watermark to filter, the campus marker that precedes the room, the local
/// zone, and the day tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Case-insensitive watermark token; lines containing it are dropped
    pub noise_marker: String,
    /// Prefix of the campus token that ends the date field
    pub location_prefix: String,
    pub timezone: TimezoneConfig,
    /// Tokens the tokenizer treats as days, compared exactly
    pub day_tokens: Vec<String>,
    pub days: DayTable,
}

/// A fixed-offset zone. The source institution's zone does not observe DST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneConfig {
    /// IANA name, passed through to the calendar payload (e.g. "America/Phoenix")
    pub name: String,
    pub utc_offset_minutes: i32,
}

impl TimezoneConfig {
    /// The zone as a chrono offset, or `None` if the offset is out of range.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            name: "America/Phoenix".to_string(),
            utc_offset_minutes: -7 * 60,
        }
    }
}

/// Lookup tables for the day normalizer. Keys are uppercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTable {
    /// Single days, e.g. `"TU" -> TU`
    pub singles: HashMap<String, DayCode>,
    /// Whole-field compounds, e.g. `"MWF" -> [MO, WE, FR]`; may map to no days
    pub compounds: HashMap<String, Vec<DayCode>>,
}

impl DayTable {
    /// Looks up a single uppercase token as a compound first, then as a single day.
    pub fn lookup(&self, token: &str) -> Option<Vec<DayCode>> {
        self.compounds
            .get(token)
            .cloned()
            .or_else(|| self.singles.get(token).map(|d| vec![*d]))
    }
}

impl Default for DayTable {
    fn default() -> Self {
        use DayCode::*;

        let singles = [
            ("M", Mo),
            ("TU", Tu),
            ("W", We),
            ("TH", Th),
            ("F", Fr),
            ("SA", Sa),
            ("SU", Su),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let compounds = [
            ("MW", vec![Mo, We]),
            ("MF", vec![Mo, Fr]),
            ("MWF", vec![Mo, We, Fr]),
            ("TUTH", vec![Tu, Th]),
            ("MTWTHF", vec![Mo, Tu, We, Th, Fr]),
            ("TBA", vec![]),
            ("ARRANGED", vec![]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self { singles, compounds }
    }
}

impl ScheduleConfig {
    /// Loads a config from a JSON file. Missing keys take the default values.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON config file
    ///
    /// # Returns
    /// * `Ok(ScheduleConfig)` - Loaded and validated configuration
    /// * `Err` - If the file can't be read or parsed, or the offset is invalid
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ScheduleConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that values deserialization alone can't guarantee are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timezone.offset().is_none() {
            return Err(ConfigError::InvalidOffset {
                name: self.timezone.name.clone(),
                minutes: self.timezone.utc_offset_minutes,
            });
        }
        Ok(())
    }

    /// Returns true if `token` is one of the recognized day abbreviations.
    pub fn is_day_token(&self, token: &str) -> bool {
        self.day_tokens.iter().any(|d| d == token)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let day_tokens = [
            "M", "Tu", "W", "Th", "F", "Sa", "Su", "MW", "MF", "MWF", "TuTh", "MTWThF", "TBA",
            "Arranged",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            noise_marker: "icourse".to_string(),
            location_prefix: "Tempe".to_string(),
            timezone: TimezoneConfig::default(),
            day_tokens,
            days: DayTable::default(),
        }
    }
}
