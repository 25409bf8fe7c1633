//! The ticket record and the draft it is created from.

mod builder;
mod duration;
mod validate;

pub use builder::TicketDraft;
pub use duration::{elapsed_hours, format_elapsed};
pub use validate::{validate_draft, validate_records};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::types::{HelpdeskTeam, MonthTrend, Priority, SlaStatus, Stage};

/// One helpdesk incident.
///
/// Field order matches the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub display_name: String,
    pub helpdesk_team: HelpdeskTeam,
    pub assigned_to: String,
    pub number_of_users: u32,
    #[serde(default)]
    pub registered_customer: String,
    pub created_on: Timestamp,
    pub last_updated_on: Timestamp,
    pub last_updated_by: String,
    #[serde(default)]
    pub close_date: Option<Timestamp>,
    pub duration: String,
    pub priority: Priority,
    #[serde(default)]
    pub sla_deadline: Option<Timestamp>,
    pub stage: Stage,
    #[serde(default)]
    pub city_of_address: String,
    #[serde(default)]
    pub mr_responsible: String,
    #[serde(default)]
    pub mr_team_leader: String,
    #[serde(default)]
    pub sub_area: String,
    pub duration_value: u64,
    pub sla_status: SlaStatus,
    pub month_trend: MonthTrend,
}

impl Ticket {
    pub fn is_closed(&self) -> bool {
        self.stage == Stage::Closed
    }

    /// Recompute `duration` and `duration_value` from `created_on`/`close_date`
    pub fn refresh_duration(&mut self) {
        let (label, hours) = format_elapsed(self.created_on, self.close_date);
        self.duration = label;
        self.duration_value = hours;
    }

    /// Record that `actor` changed the ticket at `at`
    pub(crate) fn touch(&mut self, at: Timestamp, actor: &str) {
        self.last_updated_on = at.max(self.created_on);
        self.last_updated_by = actor.to_string();
    }
}
