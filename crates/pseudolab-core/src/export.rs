//! Plain-text export of rendered reports.
//!
//! # Format
//!
//! ```text
//! Results of Middle Square
//! Date: 2026-02-14 00:50:00 UTC
//! ==================================================
//! <rendered report, verbatim>
//! ```
//!
//! Timestamps are UTC.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// Width of the `=` divider under the header.
pub const DIVIDER_WIDTH: usize = 50;

/// Build the export text for `body`, stamped with `at`.
pub fn render_export(method_label: &str, at: SystemTime, body: &str) -> String {
    let stamp = format_timestamp(at.duration_since(UNIX_EPOCH).unwrap_or_default());
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str(&format!("Results of {method_label}\n"));
    out.push_str(&format!("Date: {stamp} UTC\n"));
    out.push_str(&"=".repeat(DIVIDER_WIDTH));
    out.push('\n');
    out.push_str(body);
    out
}

/// Write `body` to `path` in the export format, stamped with the current time.
pub fn write_export(path: &Path, method_label: &str, body: &str) -> Result<()> {
    let text = render_export(method_label, SystemTime::now(), body);
    std::fs::write(path, text)?;
    log::debug!("exported {} bytes to {}", body.len(), path.display());
    Ok(())
}

/// Format a duration-since-epoch as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(since_epoch: Duration) -> String {
    let (year, month, day, hour, min, sec) = secs_to_utc(since_epoch.as_secs());
    format!("{year:04}-{month:02}-{day:02} {hour:02}:{min:02}:{sec:02}")
}

/// Convert seconds since Unix epoch to (year, month, day, hour, minute, second) UTC.
/// No leap seconds.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    let mut days = secs / 86400;
    let mut year = 1970u64;
    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let february = if is_leap(year) { 29 } else { 28 };
    let months_days = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1u64;
    for md in months_days {
        if days < md {
            break;
        }
        days -= md;
        month += 1;
    }

    (year, month, days + 1, hour, min, sec)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_epoch() {
        assert_eq!(format_timestamp(Duration::ZERO), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_timestamp_known_date() {
        assert_eq!(
            format_timestamp(Duration::from_secs(1_771_030_200)),
            "2026-02-14 00:50:00"
        );
    }

    #[test]
    fn test_format_timestamp_leap_day() {
        // 2000-02-29 01:02:03 UTC
        assert_eq!(
            format_timestamp(Duration::from_secs(951_782_400 + 3723)),
            "2000-02-29 01:02:03"
        );
    }

    #[test]
    fn test_render_export_layout() {
        let at = UNIX_EPOCH + Duration::from_secs(1_771_030_200);
        let text = render_export("Middle Square", at, "line one\nline two\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Results of Middle Square");
        assert_eq!(lines[1], "Date: 2026-02-14 00:50:00 UTC");
        assert_eq!(lines[2], "=".repeat(50));
        assert_eq!(lines[3], "line one");
        assert_eq!(lines[4], "line two");
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        write_export(&path, "Middle Product", "body\n").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Results of Middle Product\nDate: "));
        let date_line = written.lines().nth(1).unwrap();
        assert!(date_line.ends_with(" UTC"));
        assert!(written.ends_with("body\n"));
    }
}
