use jiff::Timestamp;

use crate::types::{CATALOG, HelpdeskTeam, MonthTrend, Priority, SlaStatus, Stage};

use super::Ticket;

/// Partial input for a new ticket, as collected by the create form.
///
/// Unset enum fields fall back to the catalog defaults; unset text fields are
/// empty. Only `display_name` and `assigned_to` are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketDraft {
    pub display_name: String,
    pub assigned_to: String,
    pub helpdesk_team: Option<HelpdeskTeam>,
    pub number_of_users: Option<u32>,
    pub registered_customer: Option<String>,
    pub created_on: Option<Timestamp>,
    pub close_date: Option<Timestamp>,
    pub priority: Option<Priority>,
    pub sla_deadline: Option<Timestamp>,
    pub stage: Option<Stage>,
    pub sla_status: Option<SlaStatus>,
    pub city_of_address: Option<String>,
    pub sub_area: Option<String>,
    pub mr_responsible: Option<String>,
    pub mr_team_leader: Option<String>,
}

impl TicketDraft {
    pub fn new(display_name: impl Into<String>, assigned_to: impl Into<String>) -> Self {
        TicketDraft {
            display_name: display_name.into(),
            assigned_to: assigned_to.into(),
            ..Default::default()
        }
    }

    pub fn helpdesk_team(mut self, team: HelpdeskTeam) -> Self {
        self.helpdesk_team = Some(team);
        self
    }

    pub fn number_of_users(mut self, users: u32) -> Self {
        self.number_of_users = Some(users);
        self
    }

    pub fn registered_customer(mut self, customer: impl Into<String>) -> Self {
        self.registered_customer = Some(customer.into());
        self
    }

    pub fn created_on(mut self, created_on: Timestamp) -> Self {
        self.created_on = Some(created_on);
        self
    }

    pub fn close_date(mut self, close_date: Timestamp) -> Self {
        self.close_date = Some(close_date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn sla_deadline(mut self, deadline: Timestamp) -> Self {
        self.sla_deadline = Some(deadline);
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn sla_status(mut self, status: SlaStatus) -> Self {
        self.sla_status = Some(status);
        self
    }

    pub fn city_of_address(mut self, city: impl Into<String>) -> Self {
        self.city_of_address = Some(city.into());
        self
    }

    pub fn sub_area(mut self, sub_area: impl Into<String>) -> Self {
        self.sub_area = Some(sub_area.into());
        self
    }

    pub fn mr_responsible(mut self, name: impl Into<String>) -> Self {
        self.mr_responsible = Some(name.into());
        self
    }

    pub fn mr_team_leader(mut self, name: impl Into<String>) -> Self {
        self.mr_team_leader = Some(name.into());
        self
    }

    /// Turn the draft into a full record.
    ///
    /// Does not validate; callers run [`super::validate_draft`] first. A
    /// Closed draft without a close date is closed at its creation time.
    pub fn build(self, id: String, now: Timestamp, actor: &str, trend: MonthTrend) -> Ticket {
        let created_on = self.created_on.unwrap_or(now);
        let stage = self.stage.unwrap_or(CATALOG.default_stage());
        let close_date = match (stage, self.close_date) {
            (Stage::Closed, None) => Some(created_on),
            (_, close_date) => close_date,
        };
        let mut ticket = Ticket {
            id,
            display_name: self.display_name.trim().to_string(),
            helpdesk_team: self.helpdesk_team.unwrap_or(CATALOG.default_team()),
            assigned_to: self.assigned_to.trim().to_string(),
            number_of_users: self.number_of_users.unwrap_or(1),
            registered_customer: self.registered_customer.unwrap_or_default(),
            created_on,
            last_updated_on: now.max(created_on),
            last_updated_by: actor.to_string(),
            close_date,
            duration: String::new(),
            priority: self.priority.unwrap_or(CATALOG.default_priority),
            sla_deadline: self.sla_deadline,
            stage,
            city_of_address: self.city_of_address.unwrap_or_default(),
            mr_responsible: self.mr_responsible.unwrap_or_default(),
            mr_team_leader: self.mr_team_leader.unwrap_or_default(),
            sub_area: self.sub_area.unwrap_or_default(),
            duration_value: 0,
            sla_status: self.sla_status.unwrap_or(CATALOG.default_sla_status),
            month_trend: trend,
        };
        ticket.refresh_duration();
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_applies_catalog_defaults() {
        let now: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
        let ticket = TicketDraft::new("VPN Issue", "Jane Doe").build(
            "T-1234".to_string(),
            now,
            "Current User",
            MonthTrend::Upward,
        );

        assert_eq!(ticket.helpdesk_team, HelpdeskTeam::ServiceDesk);
        assert_eq!(ticket.stage, Stage::Open);
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.sla_status, SlaStatus::InProgress);
        assert_eq!(ticket.number_of_users, 1);
        assert_eq!(ticket.created_on, now);
        assert_eq!(ticket.last_updated_on, now);
        assert_eq!(ticket.close_date, None);
        assert_eq!(ticket.duration, "-");
        assert_eq!(ticket.duration_value, 0);
        assert_eq!(ticket.month_trend, MonthTrend::Upward);
    }

    #[test]
    fn test_build_keeps_explicit_values() {
        let now: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
        let created: Timestamp = "2024-04-30T12:00:00Z".parse().unwrap();
        let ticket = TicketDraft::new("  Mail outage ", " Ops ")
            .helpdesk_team(HelpdeskTeam::Network)
            .priority(Priority::High)
            .stage(Stage::Closed)
            .sla_status(SlaStatus::Met)
            .number_of_users(40)
            .created_on(created)
            .close_date(now)
            .city_of_address("Lyon")
            .build("T-5555".to_string(), now, "Agent", MonthTrend::Stable);

        assert_eq!(ticket.display_name, "Mail outage");
        assert_eq!(ticket.assigned_to, "Ops");
        assert_eq!(ticket.helpdesk_team, HelpdeskTeam::Network);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.number_of_users, 40);
        assert_eq!(ticket.created_on, created);
        assert_eq!(ticket.duration, "1d 0h");
        assert_eq!(ticket.duration_value, 24);
        assert_eq!(ticket.city_of_address, "Lyon");
        assert_eq!(ticket.last_updated_by, "Agent");
    }

    #[test]
    fn test_closed_draft_without_close_date_closes_at_creation() {
        let now: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
        let created: Timestamp = "2024-04-30T08:00:00Z".parse().unwrap();
        let ticket = TicketDraft::new("Reset password", "Desk")
            .stage(Stage::Closed)
            .created_on(created)
            .build("T-5556".to_string(), now, "Agent", MonthTrend::Stable);

        assert_eq!(ticket.stage, Stage::Closed);
        assert_eq!(ticket.close_date, Some(created));
        assert_eq!(ticket.duration, "<1h");
        assert_eq!(ticket.duration_value, 0);
    }
}
