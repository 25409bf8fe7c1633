use jiff::Timestamp;

const SECONDS_PER_HOUR: i64 = 3600;

/// Whole hours between two timestamps, zero when `end` precedes `start`
pub fn elapsed_hours(start: Timestamp, end: Timestamp) -> u64 {
    let seconds = end.as_second() - start.as_second();
    if seconds <= 0 {
        0
    } else {
        (seconds / SECONDS_PER_HOUR) as u64
    }
}

/// Human label and hour count for a ticket's lifetime.
///
/// Open tickets (no close date) report `("-", 0)`. Closed tickets report
/// `"{d}d {h}h"`, `"{h}h"` under a day, or `"<1h"` under an hour.
pub fn format_elapsed(created_on: Timestamp, close_date: Option<Timestamp>) -> (String, u64) {
    let Some(closed) = close_date else {
        return ("-".to_string(), 0);
    };

    let hours = elapsed_hours(created_on, closed);
    let label = match (hours / 24, hours % 24) {
        (0, 0) => "<1h".to_string(),
        (0, h) => format!("{h}h"),
        (d, h) => format!("{d}d {h}h"),
    };
    (label, hours)
}
