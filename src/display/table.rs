use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::ticket::Ticket;
use crate::utils::{short_timestamp, truncate_string};

use super::{format_id, format_priority_colored, format_sla_colored, format_stage_colored};

const MAX_NAME_WIDTH: usize = 40;

/// A row in the record table
#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Assigned To")]
    assigned_to: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Stage")]
    stage: String,
    #[tabled(rename = "SLA")]
    sla: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Duration")]
    duration: String,
}

impl From<&Ticket> for TicketRow {
    fn from(t: &Ticket) -> Self {
        TicketRow {
            id: t.id.clone(),
            name: truncate_string(&t.display_name, MAX_NAME_WIDTH),
            team: t.helpdesk_team.to_string(),
            assigned_to: t.assigned_to.clone(),
            priority: t.priority.to_string(),
            stage: t.stage.to_string(),
            sla: t.sla_status.to_string(),
            created: short_timestamp(t.created_on),
            duration: t.duration.clone(),
        }
    }
}

/// Record table for the given tickets
pub fn format_ticket_table(records: &[&Ticket]) -> String {
    if records.is_empty() {
        return "No tickets found".to_string();
    }
    let rows: Vec<TicketRow> = records.iter().map(|t| TicketRow::from(*t)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn field(label: &str, value: &str) -> String {
    let value = if value.is_empty() { "-" } else { value };
    let label = format!("{:<22}", format!("{label}:"));
    format!(
        "{}{}",
        label.if_supports_color(Stream::Stdout, |s| s.bold()),
        value
    )
}

fn opt_time(ts: Option<jiff::Timestamp>) -> String {
    ts.map(short_timestamp).unwrap_or_default()
}

/// Full detail view of one ticket
pub fn format_ticket_detail(t: &Ticket) -> String {
    let header = format!(
        "{} {} {} {}\n{}",
        format_id(&t.id),
        format_priority_colored(t.priority),
        format_stage_colored(t.stage),
        format_sla_colored(t.sla_status),
        t.display_name
    );

    let users = t.number_of_users.to_string();
    let lines = [
        field("Helpdesk Team", t.helpdesk_team.as_str()),
        field("Assigned To", &t.assigned_to),
        field("Affected Users", &users),
        field("Customer", &t.registered_customer),
        field("Created", &short_timestamp(t.created_on)),
        field("Last Updated", &short_timestamp(t.last_updated_on)),
        field("Last Updated By", &t.last_updated_by),
        field("SLA Deadline", &opt_time(t.sla_deadline)),
        field("Closed", &opt_time(t.close_date)),
        field("Duration", &t.duration),
        field("City", &t.city_of_address),
        field("Sub Area", &t.sub_area),
        field("Responsible", &t.mr_responsible),
        field("Team Leader", &t.mr_team_leader),
        field("Month Trend", t.month_trend.as_str()),
    ];

    format!("{header}\n\n{}", lines.join("\n"))
}
