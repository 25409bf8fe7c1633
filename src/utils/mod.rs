pub mod id;

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::Timestamp;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{DeskError, Result};

pub use id::{generate_ticket_id, validate_ticket_id};

/// Parse a user-supplied timestamp.
///
/// Accepts RFC 3339 (`2024-03-05T09:00:00Z`, `2024-03-05T09:00:00+01:00`), a
/// civil date-time as produced by `datetime-local` inputs (`2024-03-05T09:00`)
/// or a bare date (`2024-03-05`). Civil values carry no offset and are
/// interpreted as UTC.
pub fn parse_timestamp(s: &str) -> Result<Timestamp> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Ok(ts);
    }

    let civil = s
        .parse::<DateTime>()
        .or_else(|_| s.parse::<Date>().map(|d| d.at(0, 0, 0, 0)))
        .map_err(|_| {
            DeskError::Validation(format!(
                "invalid timestamp '{s}'. Use RFC 3339 or YYYY-MM-DDTHH:MM"
            ))
        })?;

    civil
        .to_zoned(TimeZone::UTC)
        .map(|z| z.timestamp())
        .map_err(|e| DeskError::Validation(format!("invalid timestamp '{s}': {e}")))
}

/// Short human form used in tables and detail views
pub fn short_timestamp(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%d %H:%M").to_string()
}

/// Write a file through a temporary sibling and rename it into place, so a
/// failed write never leaves a truncated file behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Check if stdin is a TTY (interactive)
pub fn is_stdin_tty() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Today's calendar date in UTC
pub fn today_utc() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}

/// Truncate a string to a maximum length, handling multi-byte characters properly.
/// Appends "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-03-05T09:00:00Z").unwrap();
        assert_eq!(short_timestamp(ts), "2024-03-05 09:00");
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2024-03-05T01:00:00+02:00").unwrap();
        assert_eq!(short_timestamp(ts), "2024-03-04 23:00");
    }

    #[test]
    fn test_parse_timestamp_civil_minutes() {
        let ts = parse_timestamp("2023-10-01T09:00").unwrap();
        assert_eq!(short_timestamp(ts), "2023-10-01 09:00");
    }

    #[test]
    fn test_parse_timestamp_date_only() {
        let ts = parse_timestamp("2023-10-01").unwrap();
        assert_eq!(short_timestamp(ts), "2023-10-01 00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("nested").join("slot.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1, "no temporary files should be left behind");
    }

    #[test]
    fn test_truncate_string_short() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
    }

    #[test]
    fn test_truncate_string_long() {
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let japanese = "こんにちは世界";
        assert_eq!(truncate_string(japanese, 5), "こん...");
    }
}
