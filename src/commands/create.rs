use jiff::Timestamp;

use super::{open_app, warn_if_unsaved};
use crate::display::format_id;
use crate::error::Result;
use crate::ticket::TicketDraft;
use crate::types::{HelpdeskTeam, Priority, SlaStatus, Stage};

/// Options for creating a new ticket
pub struct CreateOptions {
    pub display_name: String,
    pub assigned_to: String,
    pub team: Option<HelpdeskTeam>,
    pub priority: Option<Priority>,
    pub stage: Option<Stage>,
    pub sla_status: Option<SlaStatus>,
    pub users: Option<u32>,
    pub customer: Option<String>,
    pub city: Option<String>,
    pub sub_area: Option<String>,
    pub responsible: Option<String>,
    pub team_leader: Option<String>,
    pub sla_deadline: Option<Timestamp>,
    pub close_date: Option<Timestamp>,
    pub created_on: Option<Timestamp>,
}

impl From<CreateOptions> for TicketDraft {
    fn from(opts: CreateOptions) -> Self {
        TicketDraft {
            display_name: opts.display_name,
            assigned_to: opts.assigned_to,
            helpdesk_team: opts.team,
            number_of_users: opts.users,
            registered_customer: opts.customer,
            created_on: opts.created_on,
            close_date: opts.close_date,
            priority: opts.priority,
            sla_deadline: opts.sla_deadline,
            stage: opts.stage,
            sla_status: opts.sla_status,
            city_of_address: opts.city,
            sub_area: opts.sub_area,
            mr_responsible: opts.responsible,
            mr_team_leader: opts.team_leader,
        }
    }
}

/// Create a new ticket and print its ID
pub fn cmd_create(options: CreateOptions, output_json: bool) -> Result<()> {
    let (mut app, _) = open_app()?;
    app.start_create()?;
    let ticket = app.submit(options.into())?;
    warn_if_unsaved(&app);

    if output_json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        println!("Created {}", format_id(&ticket.id));
    }
    Ok(())
}
