//! Ticket analytics: dashboard counts, recent activity and creation trends

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::ticket::Ticket;
use crate::types::{MonthTrend, SlaStatus, Stage};

/// Number of tickets shown in the dashboard's recent-activity panel
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Dashboard counts over a ticket snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub high_priority: usize,
    #[serde(rename = "breachedSLA")]
    pub breached_sla: usize,
    pub resolved: usize,
}

impl Summary {
    /// Share of `value` in the total, 0.0 for an empty store
    pub fn ratio(&self, value: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            value as f64 / self.total as f64
        }
    }
}

/// Count totals, high-priority, breached-SLA and closed tickets
pub fn summarize(records: &[Ticket]) -> Summary {
    let mut summary = Summary {
        total: records.len(),
        ..Default::default()
    };
    for ticket in records {
        if ticket.priority.is_high() {
            summary.high_priority += 1;
        }
        if ticket.sla_status == SlaStatus::Breached {
            summary.breached_sla += 1;
        }
        if ticket.stage == Stage::Closed {
            summary.resolved += 1;
        }
    }
    summary
}

/// The `limit` most recent tickets (records are kept newest first)
pub fn recent(records: &[Ticket], limit: usize) -> &[Ticket] {
    &records[..records.len().min(limit)]
}

/// (year, month) of a timestamp in UTC
fn year_month(ts: Timestamp) -> (i16, i8) {
    let zoned = ts.to_zoned(TimeZone::UTC);
    (zoned.year(), zoned.month())
}

fn previous_month((year, month): (i16, i8)) -> (i16, i8) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Classify creation volume for a ticket created at `created_on`.
///
/// Counts existing tickets created in the same calendar month, plus the new
/// one, against the previous calendar month.
pub fn month_trend(created_on: Timestamp, existing: &[Ticket]) -> MonthTrend {
    let current = year_month(created_on);
    let previous = previous_month(current);

    let mut this_month = 1usize;
    let mut last_month = 0usize;
    for ticket in existing {
        let ym = year_month(ticket.created_on);
        if ym == current {
            this_month += 1;
        } else if ym == previous {
            last_month += 1;
        }
    }

    match this_month.cmp(&last_month) {
        std::cmp::Ordering::Greater => MonthTrend::Upward,
        std::cmp::Ordering::Less => MonthTrend::Downward,
        std::cmp::Ordering::Equal => MonthTrend::Stable,
    }
}
