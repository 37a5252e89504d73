//! Day-of-week normalization.

use super::config::DayTable;
use super::types::DayCode;
use tracing::warn;

/// Maps the raw days field to canonical day codes.
///
/// The whole field is first tried as one compound key (`"M W F"` and `"MWF"`
/// both become `MWF`). If that is not a known compound, each token is looked
/// up on its own and the distinct days are kept in the order they appear.
/// Unknown tokens are logged and skipped.
pub fn normalize_days(days_str: &str, table: &DayTable) -> Vec<DayCode> {
    let upper = days_str.to_uppercase().replace(',', "");
    let tokens: Vec<&str> = upper.split_whitespace().collect();
    let compound = tokens.concat();

    if let Some(days) = table.compounds.get(&compound) {
        return days.clone();
    }

    let mut days = Vec::new();
    for token in tokens {
        match table.lookup(token) {
            Some(found) => {
                for day in found {
                    if !days.contains(&day) {
                        days.push(day);
                    }
                }
            }
            None => warn!("Unrecognized day: {token}"),
        }
    }

    days
}
