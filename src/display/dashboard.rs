use owo_colors::{OwoColorize, Stream};

use crate::analytics::Summary;
use crate::ticket::Ticket;

use super::{format_id, format_priority_colored, format_stage_colored};

const BAR_WIDTH: usize = 20;

/// Horizontal bar filled to `ratio` (clamped to 0..=1)
pub fn ratio_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn card(label: &str, value: usize, ratio: f64) -> String {
    format!(
        "{:<16} {:>5}  {} {:>3.0}%",
        label,
        value,
        ratio_bar(ratio, BAR_WIDTH),
        ratio * 100.0
    )
}

/// The four summary cards
pub fn format_dashboard(summary: &Summary) -> String {
    let lines = [
        card("Total Tickets", summary.total, summary.ratio(summary.total)),
        card(
            "High Priority",
            summary.high_priority,
            summary.ratio(summary.high_priority),
        ),
        card(
            "SLA Breached",
            summary.breached_sla,
            summary.ratio(summary.breached_sla),
        ),
        card("Resolved", summary.resolved, summary.ratio(summary.resolved)),
    ];
    lines.join("\n")
}

/// One line per recent ticket
pub fn format_recent_activity(recent: &[Ticket]) -> String {
    if recent.is_empty() {
        return "No tickets yet"
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string();
    }
    recent
        .iter()
        .map(|t| {
            format!(
                "{} {} {} - {} ({})",
                format_id(&t.id),
                format_priority_colored(t.priority),
                format_stage_colored(t.stage),
                t.display_name,
                t.assigned_to.if_supports_color(Stream::Stdout, |s| s.dimmed())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_bar_bounds() {
        assert_eq!(ratio_bar(0.0, 4), "░░░░");
        assert_eq!(ratio_bar(1.0, 4), "████");
        assert_eq!(ratio_bar(0.5, 4), "██░░");
        assert_eq!(ratio_bar(7.0, 4), "████");
        assert_eq!(ratio_bar(f64::NAN, 4), "░░░░");
    }

    #[test]
    fn test_dashboard_empty_store() {
        let text = format_dashboard(&Summary::default());
        assert!(text.contains("Total Tickets"));
        assert!(text.contains("0%"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_dashboard_card_line() {
        let summary = Summary {
            total: 4,
            high_priority: 1,
            breached_sla: 0,
            resolved: 2,
        };
        let text = format_dashboard(&summary);
        let high = text.lines().nth(1).unwrap();
        insta::assert_snapshot!(high, @"High Priority        1  █████░░░░░░░░░░░░░░░  25%");
    }
}
