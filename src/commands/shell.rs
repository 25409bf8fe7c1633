//! Line-oriented interactive session over one [`AppController`].
//!
//! The session owns its input so that form fields and delete confirmations
//! are read from the same stream as commands.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use jiff::Timestamp;

use super::dashboard::render_dashboard;
use super::open_app;
use crate::app::{AppController, Confirm, DeleteOutcome, PromptConfirm, View};
use crate::display::{format_id, format_ticket_detail, format_ticket_table};
use crate::error::{DeskError, Result};
use crate::ticket::TicketDraft;
use crate::types::{CATALOG, HelpdeskTeam, Priority, SlaStatus, Stage};
use crate::utils::{parse_timestamp, today_utc, validate_ticket_id};

const HELP: &str = "\
Commands:
  dashboard             Summary cards and recent activity
  new                   Open the create form
  cancel                Leave the create form
  table [term]          Record table, optionally filtered
  search <term>         Filter the record table
  show <id>             Ticket details
  rm <id>               Delete a ticket (asks first)
  close <id> [time]     Mark a ticket closed
  export [dir]          Export all tickets
  view                  Current view
  help                  This text
  quit                  Leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    app: AppController,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(app: AppController, input: R, out: W) -> Self {
        Shell { app, input, out }
    }

    pub fn app(&self) -> &AppController {
        &self.app
    }

    pub fn into_app(self) -> AppController {
        self.app
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", render_dashboard(&self.app))?;
        loop {
            let prompt = format!("{}> ", self.app.view());
            let Some(line) = self.prompt(&prompt)? else {
                break;
            };
            match self.execute(line.trim()) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(DeskError::Io(e)) => return Err(DeskError::Io(e)),
                Err(e) => writeln!(self.out, "Error: {e}")?,
            }
            self.warn_if_unsaved()?;
        }
        Ok(())
    }

    fn warn_if_unsaved(&mut self) -> io::Result<()> {
        if let Some(err) = self.app.store().last_persist_error() {
            writeln!(self.out, "Warning: changes were not saved: {err}")?;
        }
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn execute(&mut self, line: &str) -> Result<Flow> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => writeln!(self.out, "{HELP}")?,
            "view" => writeln!(self.out, "{}", self.app.view())?,
            "dashboard" | "home" => {
                self.app.navigate(View::Dashboard);
                writeln!(self.out, "{}", render_dashboard(&self.app))?;
            }
            "new" => {
                self.app.navigator().request(None);
                self.app.pump_navigation();
                self.run_form()?;
            }
            "cancel" => {
                self.app.cancel()?;
                writeln!(self.out, "Cancelled")?;
            }
            "table" | "ls" | "search" => {
                if command == "search" && rest.is_empty() {
                    return Err(DeskError::Validation("usage: search <term>".to_string()));
                }
                self.app.navigate(View::RecordTable);
                self.app.set_search(rest);
                writeln!(
                    self.out,
                    "{}",
                    format_ticket_table(&self.app.visible_records())
                )?;
            }
            "show" => {
                let id = ticket_arg(rest)?;
                let ticket = self
                    .app
                    .store()
                    .get(&id)
                    .ok_or_else(|| DeskError::TicketNotFound(id.clone()))?;
                writeln!(self.out, "{}", format_ticket_detail(ticket))?;
            }
            "rm" => {
                let id = ticket_arg(rest)?;
                let mut confirm = PromptConfirm::new(&mut self.input, &mut self.out);
                match self.app.delete(&id, &mut confirm) {
                    DeleteOutcome::Removed => writeln!(self.out, "Deleted {id}")?,
                    DeleteOutcome::Declined => writeln!(self.out, "Not deleted")?,
                    DeleteOutcome::NotFound => return Err(DeskError::TicketNotFound(id)),
                }
            }
            "close" => {
                let (id, at) = match rest.split_once(char::is_whitespace) {
                    Some((id, at)) => (ticket_arg(id)?, Some(parse_timestamp(at)?)),
                    None => (ticket_arg(rest)?, None),
                };
                let ticket = self.app.close(&id, at)?;
                writeln!(
                    self.out,
                    "Closed {} after {}",
                    format_id(&ticket.id),
                    ticket.duration
                )?;
            }
            "export" => {
                let dir = if rest.is_empty() {
                    PathBuf::from(".")
                } else {
                    PathBuf::from(rest)
                };
                let path = self.app.export(&dir, today_utc())?;
                writeln!(self.out, "Exported to {}", path.display())?;
            }
            other => {
                writeln!(self.out, "Unknown command '{other}'. Type 'help'.")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Ask for a text field. `None` at end of input.
    fn ask_text(&mut self, label: &str) -> io::Result<Option<String>> {
        Ok(self
            .prompt(&format!("{label}: "))?
            .map(|s| s.trim().to_string()))
    }

    /// Ask for a catalog value until a valid one (or blank, for the default)
    /// is given
    fn ask_choice<T>(&mut self, label: &str, choices: &[T], default: T) -> io::Result<Option<T>>
    where
        T: Copy + Display + FromStr<Err = DeskError>,
    {
        let listed: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        let prompt = format!("{label} ({}) [{default}]: ", listed.join(", "));
        loop {
            let Some(answer) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    fn ask_users(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) = self.prompt("Number of users [1]: ")? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(Some(1));
            }
            match answer.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.out, "Enter a whole number")?,
            }
        }
    }

    /// Ask for an optional timestamp until a valid one (or blank, to skip) is
    /// given. The outer `None` means end of input.
    fn ask_time(&mut self, label: &str) -> io::Result<Option<Option<Timestamp>>> {
        let prompt = format!("{label} (YYYY-MM-DDTHH:MM, blank to skip): ");
        loop {
            let Some(answer) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(Some(None));
            }
            match parse_timestamp(answer) {
                Ok(ts) => return Ok(Some(Some(ts))),
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    /// Collect the form fields. `None` when input ends mid-form. The close
    /// date is only asked for Closed tickets.
    fn read_draft(&mut self) -> io::Result<Option<TicketDraft>> {
        let Some(name) = self.ask_text("Display name")? else {
            return Ok(None);
        };
        let Some(assignee) = self.ask_text("Assigned to")? else {
            return Ok(None);
        };
        let Some(team) =
            self.ask_choice::<HelpdeskTeam>("Helpdesk team", CATALOG.teams, CATALOG.default_team())?
        else {
            return Ok(None);
        };
        let Some(priority) =
            self.ask_choice::<Priority>("Priority", CATALOG.priorities, CATALOG.default_priority)?
        else {
            return Ok(None);
        };
        let Some(stage) =
            self.ask_choice::<Stage>("Stage", CATALOG.stages, CATALOG.default_stage())?
        else {
            return Ok(None);
        };
        let Some(sla_status) = self.ask_choice::<SlaStatus>(
            "SLA status",
            CATALOG.sla_statuses,
            CATALOG.default_sla_status,
        )?
        else {
            return Ok(None);
        };
        let Some(users) = self.ask_users()? else {
            return Ok(None);
        };
        let Some(customer) = self.ask_text("Registered customer")? else {
            return Ok(None);
        };
        let Some(city) = self.ask_text("City")? else {
            return Ok(None);
        };
        let Some(sub_area) = self.ask_text("Sub area")? else {
            return Ok(None);
        };
        let Some(responsible) = self.ask_text("Responsible")? else {
            return Ok(None);
        };
        let Some(team_leader) = self.ask_text("Team leader")? else {
            return Ok(None);
        };
        let Some(created_on) = self.ask_time("Created on")? else {
            return Ok(None);
        };
        let Some(sla_deadline) = self.ask_time("SLA deadline")? else {
            return Ok(None);
        };
        let close_date = if stage == Stage::Closed {
            let Some(close_date) = self.ask_time("Close date")? else {
                return Ok(None);
            };
            close_date
        } else {
            None
        };

        let mut draft = TicketDraft::new(name, assignee)
            .helpdesk_team(team)
            .priority(priority)
            .stage(stage)
            .sla_status(sla_status)
            .number_of_users(users)
            .registered_customer(customer)
            .city_of_address(city)
            .sub_area(sub_area)
            .mr_responsible(responsible)
            .mr_team_leader(team_leader);
        draft.created_on = created_on;
        draft.sla_deadline = sla_deadline;
        draft.close_date = close_date;
        Ok(Some(draft))
    }

    fn run_form(&mut self) -> Result<()> {
        let Some(draft) = self.read_draft()? else {
            self.app.cancel()?;
            return Ok(());
        };

        let mut confirm = PromptConfirm::new(&mut self.input, &mut self.out);
        if !confirm.confirm("Save ticket?") {
            self.app.cancel()?;
            writeln!(self.out, "Cancelled")?;
            return Ok(());
        }

        let ticket = self.app.submit(draft)?;
        writeln!(self.out, "Created {}", format_id(&ticket.id))?;
        writeln!(
            self.out,
            "{}",
            format_ticket_table(&self.app.visible_records())
        )?;
        Ok(())
    }
}

fn ticket_arg(arg: &str) -> Result<String> {
    let id = arg.trim();
    if id.is_empty() {
        return Err(DeskError::Validation("a ticket ID is required".to_string()));
    }
    validate_ticket_id(id)?;
    Ok(id.to_string())
}

/// Start an interactive session on stdin/stdout
pub fn cmd_shell() -> Result<()> {
    let (app, _) = open_app()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(app, stdin.lock(), stdout.lock());
    shell.run()
}
