use jiff::Timestamp;

use crate::ticket::Ticket;
use crate::types::{HelpdeskTeam, MonthTrend, Priority, SlaStatus, Stage};

fn at(s: &str) -> Timestamp {
    s.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

/// The single record a fresh store starts with
pub fn seed_tickets() -> Vec<Ticket> {
    let mut ticket = Ticket {
        id: "T-1001".to_string(),
        display_name: "VPN Connectivity Issue".to_string(),
        helpdesk_team: HelpdeskTeam::Infrastructure,
        assigned_to: "John Doe".to_string(),
        number_of_users: 5,
        registered_customer: "Global Corp".to_string(),
        created_on: at("2023-10-01T09:00:00Z"),
        last_updated_on: at("2023-10-02T14:30:00Z"),
        last_updated_by: "System".to_string(),
        close_date: None,
        duration: String::new(),
        priority: Priority::High,
        sla_deadline: Some(at("2023-10-01T17:00:00Z")),
        stage: Stage::InProgress,
        city_of_address: "New York".to_string(),
        mr_responsible: "Alice Smith".to_string(),
        mr_team_leader: "Bob Wilson".to_string(),
        sub_area: "Network".to_string(),
        duration_value: 0,
        sla_status: SlaStatus::Breached,
        month_trend: MonthTrend::Upward,
    };
    ticket.refresh_duration();
    vec![ticket]
}
