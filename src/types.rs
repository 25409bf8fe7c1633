use serde::{Deserialize, Serialize};

use crate::catalog_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

catalog_enum!(Priority, "priority", {
    Low => "Low",
    Medium => "Medium",
    High => "High",
    Urgent => "Urgent",
});

impl Priority {
    /// High and Urgent tickets count towards the dashboard's high-priority card
    pub fn is_high(&self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SlaStatus {
    Met,
    Breached,
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
}

catalog_enum!(SlaStatus, "SLA status", {
    Met => "Met",
    Breached => "Breached",
    InProgress => "In Progress",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Resolved,
    Closed,
}

catalog_enum!(Stage, "stage", {
    Open => "Open",
    InProgress => "In Progress",
    OnHold => "On Hold",
    Resolved => "Resolved",
    Closed => "Closed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HelpdeskTeam {
    #[default]
    #[serde(rename = "Service Desk")]
    ServiceDesk,
    Infrastructure,
    Applications,
    Network,
    Security,
}

catalog_enum!(HelpdeskTeam, "helpdesk team", {
    ServiceDesk => "Service Desk",
    Infrastructure => "Infrastructure",
    Applications => "Applications",
    Network => "Network",
    Security => "Security",
});

/// Month-over-month creation trend recorded on a ticket when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MonthTrend {
    Upward,
    #[default]
    Stable,
    Downward,
}

catalog_enum!(MonthTrend, "month trend", {
    Upward => "Upward",
    Stable => "Stable",
    Downward => "Downward",
});

/// Canonical value lists and form defaults.
///
/// Validation, CLI value parsing and the interactive form all read from
/// [`CATALOG`] so the lists are declared exactly once.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub teams: &'static [HelpdeskTeam],
    pub stages: &'static [Stage],
    pub priorities: &'static [Priority],
    pub sla_statuses: &'static [SlaStatus],
    pub default_priority: Priority,
    pub default_sla_status: SlaStatus,
}

pub const CATALOG: Catalog = Catalog {
    teams: HelpdeskTeam::ALL,
    stages: Stage::ALL,
    priorities: Priority::ALL,
    sla_statuses: SlaStatus::ALL,
    default_priority: Priority::Medium,
    default_sla_status: SlaStatus::InProgress,
};

impl Catalog {
    /// Team used when a draft leaves it unset: the first canonical team
    pub fn default_team(&self) -> HelpdeskTeam {
        self.teams[0]
    }

    /// Stage used when a draft leaves it unset: the first canonical stage
    pub fn default_stage(&self) -> Stage {
        self.stages[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        assert_eq!(CATALOG.default_team(), HelpdeskTeam::ServiceDesk);
        assert_eq!(CATALOG.default_stage(), Stage::Open);
        assert_eq!(CATALOG.default_priority, Priority::default());
        assert_eq!(CATALOG.default_sla_status, SlaStatus::default());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&SlaStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let stage: Stage = serde_json::from_str("\"On Hold\"").unwrap();
        assert_eq!(stage, Stage::OnHold);
        let team: HelpdeskTeam = serde_json::from_str("\"Service Desk\"").unwrap();
        assert_eq!(team, HelpdeskTeam::ServiceDesk);
    }

    #[test]
    fn test_serde_rejects_free_text() {
        assert!(serde_json::from_str::<Priority>("\"Critical\"").is_err());
        assert!(serde_json::from_str::<SlaStatus>("\"in progress\"").is_err());
    }

    #[test]
    fn test_labels_match_serde() {
        for stage in Stage::ALL {
            let json = serde_json::to_string(stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
        for team in HelpdeskTeam::ALL {
            let json = serde_json::to_string(team).unwrap();
            assert_eq!(json, format!("\"{}\"", team.as_str()));
        }
    }

    #[test]
    fn test_is_high() {
        assert!(Priority::High.is_high());
        assert!(Priority::Urgent.is_high());
        assert!(!Priority::Medium.is_high());
        assert!(!Priority::Low.is_high());
    }

    #[test]
    fn test_parse_stage() {
        assert_eq!("closed".parse::<Stage>().unwrap(), Stage::Closed);
        assert_eq!("in_progress".parse::<Stage>().unwrap(), Stage::InProgress);
        assert!("done".parse::<Stage>().is_err());
    }
}
