use owo_colors::{OwoColorize, Stream};

use crate::types::{Priority, SlaStatus, Stage};

pub mod dashboard;
pub mod table;

pub use dashboard::{format_dashboard, format_recent_activity, ratio_bar};
pub use table::{format_ticket_detail, format_ticket_table};

pub fn format_priority_colored(priority: Priority) -> String {
    let badge = format!("[{}]", priority);
    match priority {
        Priority::Urgent => badge
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string(),
        Priority::High => badge
            .if_supports_color(Stream::Stdout, |s| s.yellow())
            .to_string(),
        Priority::Medium => badge
            .if_supports_color(Stream::Stdout, |s| s.cyan())
            .to_string(),
        Priority::Low => badge
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    }
}

pub fn format_sla_colored(status: SlaStatus) -> String {
    let badge = format!("[{}]", status);
    match status {
        SlaStatus::Met => badge
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string(),
        SlaStatus::Breached => badge
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string(),
        SlaStatus::InProgress => badge
            .if_supports_color(Stream::Stdout, |s| s.yellow())
            .to_string(),
    }
}

pub fn format_stage_colored(stage: Stage) -> String {
    let badge = format!("[{}]", stage);
    match stage {
        Stage::Open => badge
            .if_supports_color(Stream::Stdout, |s| s.yellow())
            .to_string(),
        Stage::InProgress => badge
            .if_supports_color(Stream::Stdout, |s| s.cyan())
            .to_string(),
        Stage::OnHold => badge
            .if_supports_color(Stream::Stdout, |s| s.magenta())
            .to_string(),
        Stage::Resolved | Stage::Closed => badge
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string(),
    }
}

/// Ticket ID in the accent color
pub fn format_id(id: &str) -> String {
    id.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
}
