use super::{open_app, warn_if_unsaved};
use crate::app::{AlwaysConfirm, Confirm, DeleteOutcome, TerminalConfirm};
use crate::error::{DeskError, Result};

/// Delete a ticket after confirmation
pub fn cmd_rm(id: &str, yes: bool) -> Result<()> {
    let (mut app, _) = open_app()?;
    let mut confirm: Box<dyn Confirm> = if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(TerminalConfirm)
    };

    match app.delete(id, confirm.as_mut()) {
        DeleteOutcome::Removed => {
            warn_if_unsaved(&app);
            println!("Deleted {id}");
            Ok(())
        }
        DeleteOutcome::Declined => {
            println!("Not deleted: {id} (pass --yes to skip the prompt)");
            Ok(())
        }
        DeleteOutcome::NotFound => Err(DeskError::TicketNotFound(id.to_string())),
    }
}
