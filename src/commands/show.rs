use super::open_app;
use crate::display::format_ticket_detail;
use crate::error::{DeskError, Result};

/// Display one ticket
pub fn cmd_show(id: &str, output_json: bool) -> Result<()> {
    let (app, _) = open_app()?;
    let ticket = app
        .store()
        .get(id)
        .ok_or_else(|| DeskError::TicketNotFound(id.to_string()))?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(ticket)?);
    } else {
        println!("{}", format_ticket_detail(ticket));
    }
    Ok(())
}
