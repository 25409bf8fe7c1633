use jiff::Timestamp;

use super::{open_app, warn_if_unsaved};
use crate::display::format_id;
use crate::error::Result;

/// Mark a ticket closed and report its duration
pub fn cmd_close(id: &str, at: Option<Timestamp>, output_json: bool) -> Result<()> {
    let (mut app, _) = open_app()?;
    let ticket = app.close(id, at)?;
    warn_if_unsaved(&app);

    if output_json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        println!("Closed {} after {}", format_id(&ticket.id), ticket.duration);
    }
    Ok(())
}
