use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use jiff::Timestamp;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::ExportFormat;
use crate::types::{HelpdeskTeam, Priority, SlaStatus, Stage};
use crate::utils::{parse_timestamp, validate_ticket_id};

#[derive(Parser)]
#[command(name = "sdesk")]
#[command(about = "Helpdesk ticket tracking with a local data store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show summary cards and recent activity
    #[command(visible_alias = "d")]
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Short name of the incident
        display_name: String,

        /// Person the ticket is assigned to
        #[arg(short, long)]
        assigned_to: String,

        /// Helpdesk team (default: Service Desk)
        #[arg(short, long, value_parser = parse_team)]
        team: Option<HelpdeskTeam>,

        /// Priority: Low, Medium, High, Urgent (default: Medium)
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Stage (default: Open)
        #[arg(long, value_parser = parse_stage)]
        stage: Option<Stage>,

        /// SLA status: Met, Breached, In Progress (default: In Progress)
        #[arg(long, value_parser = parse_sla_status)]
        sla_status: Option<SlaStatus>,

        /// Number of affected users (default: 1)
        #[arg(short, long)]
        users: Option<u32>,

        /// Registered customer
        #[arg(long)]
        customer: Option<String>,

        /// City of address
        #[arg(long)]
        city: Option<String>,

        /// Sub area
        #[arg(long)]
        sub_area: Option<String>,

        /// Responsible person
        #[arg(long)]
        responsible: Option<String>,

        /// Team leader
        #[arg(long)]
        team_leader: Option<String>,

        /// SLA deadline (RFC 3339 or YYYY-MM-DDTHH:MM, UTC)
        #[arg(long, value_parser = parse_time)]
        sla_deadline: Option<Timestamp>,

        /// Close date, for tickets recorded after the fact
        #[arg(long, value_parser = parse_time)]
        close_date: Option<Timestamp>,

        /// Backdated creation time (default: now)
        #[arg(long, value_parser = parse_time)]
        created_on: Option<Timestamp>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tickets, optionally filtered by a search term
    #[command(visible_alias = "l")]
    Ls {
        /// Case-insensitive match on ID, name, assignee and customer
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display one ticket
    #[command(visible_alias = "s")]
    Show {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a ticket
    Rm {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark a ticket closed
    Close {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        /// Close time (default: now)
        #[arg(long, value_parser = parse_time)]
        at: Option<Timestamp>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all tickets to a spreadsheet
    Export {
        /// Target directory (default: config export.dir, else current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// File format: xlsx or csv (default: config export.format)
        #[arg(short, long, value_parser = parse_export_format)]
        format: Option<ExportFormat>,
    },

    /// Interactive session
    Shell,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// One of: actor, storage_key, export.format, export.dir
        key: String,
        value: String,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            CreateOptions, cmd_close, cmd_config_set, cmd_config_show, cmd_create,
            cmd_dashboard, cmd_export, cmd_ls, cmd_rm, cmd_shell, cmd_show,
        };

        match self {
            Commands::Dashboard { json } => cmd_dashboard(json),
            Commands::Create {
                display_name,
                assigned_to,
                team,
                priority,
                stage,
                sla_status,
                users,
                customer,
                city,
                sub_area,
                responsible,
                team_leader,
                sla_deadline,
                close_date,
                created_on,
                json,
            } => cmd_create(
                CreateOptions {
                    display_name,
                    assigned_to,
                    team,
                    priority,
                    stage,
                    sla_status,
                    users,
                    customer,
                    city,
                    sub_area,
                    responsible,
                    team_leader,
                    sla_deadline,
                    close_date,
                    created_on,
                },
                json,
            ),
            Commands::Ls { search, json } => cmd_ls(search.as_deref(), json),
            Commands::Show { id, json } => cmd_show(&id, json),
            Commands::Rm { id, yes } => cmd_rm(&id, yes),
            Commands::Close { id, at, json } => cmd_close(&id, at, json),
            Commands::Export { dir, format } => cmd_export(dir, format),
            Commands::Shell => cmd_shell(),
            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_team(s: &str) -> Result<HelpdeskTeam, String> {
    parse_with_validation(
        s,
        |v| HelpdeskTeam::from_str(v).map_err(|_| String::new()),
        "team",
        &HelpdeskTeam::labels(),
    )
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        &Priority::labels(),
    )
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "stage",
        &Stage::labels(),
    )
}

fn parse_sla_status(s: &str) -> Result<SlaStatus, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "SLA status",
        &SlaStatus::labels(),
    )
}

fn parse_export_format(s: &str) -> Result<ExportFormat, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "format",
        &ExportFormat::labels(),
    )
}

fn parse_ticket_id(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("ID cannot be empty".to_string());
    }
    validate_ticket_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

fn parse_time(s: &str) -> Result<Timestamp, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "sdesk", &mut io::stdout());
}
