//! Reassembles wrapped OCR lines into one logical line per course record.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static CLASS_NUM_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5,6}").unwrap());

/// Splits OCR text into logical lines.
///
/// A line starting with a class number opens a new record; any other line is
/// appended to the open record with a single space. Blank lines and lines
/// containing `noise_marker` (case-insensitive) are dropped first. Text before
/// the first class number has no record to join and is dropped.
pub fn segment_lines(text: &str, noise_marker: &str) -> Vec<String> {
    let noise_marker = noise_marker.to_lowercase();

    let (mut lines, open) = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let noisy = !noise_marker.is_empty() && line.to_lowercase().contains(&noise_marker);
            if noisy {
                trace!("Dropping watermark line: {line}");
            }
            !noisy
        })
        .fold(
            (Vec::new(), None::<String>),
            |(mut done, open), line| match open {
                _ if CLASS_NUM_START.is_match(line) => {
                    done.extend(open);
                    (done, Some(line.to_string()))
                }
                Some(buffer) => (done, Some(format!("{buffer} {line}"))),
                None => {
                    trace!("Dropping continuation line with no open record: {line}");
                    (done, None)
                }
            },
        );

    lines.extend(open);
    lines
}
