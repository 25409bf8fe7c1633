use std::collections::HashSet;

use jiff::Timestamp;

use crate::error::{DeskError, Result};
use crate::types::{CATALOG, Stage};
use crate::utils::validate_ticket_id;

use super::{Ticket, TicketDraft};

/// Check a draft before it becomes a record.
///
/// Required text fields must be non-blank, at least one user must be
/// affected and a backdated creation time cannot lie in the future. A close
/// date is only accepted on a Closed ticket and cannot precede creation.
pub fn validate_draft(draft: &TicketDraft, now: Timestamp) -> Result<()> {
    if draft.display_name.trim().is_empty() {
        return Err(DeskError::Validation("display name is required".to_string()));
    }
    if draft.assigned_to.trim().is_empty() {
        return Err(DeskError::Validation("assignee is required".to_string()));
    }
    if draft.number_of_users == Some(0) {
        return Err(DeskError::Validation(
            "number of users must be at least 1".to_string(),
        ));
    }

    let created_on = match draft.created_on {
        Some(created) if created > now => {
            return Err(DeskError::Validation(
                "creation time cannot be in the future".to_string(),
            ));
        }
        Some(created) => created,
        None => now,
    };

    if let Some(closed) = draft.close_date {
        if draft.stage.unwrap_or(CATALOG.default_stage()) != Stage::Closed {
            return Err(DeskError::Validation(
                "a close date is only allowed on a Closed ticket".to_string(),
            ));
        }
        if closed < created_on {
            return Err(DeskError::Validation(
                "close date cannot precede the creation time".to_string(),
            ));
        }
    }

    Ok(())
}

/// Check invariants of a persisted record set: every ID well formed and used
/// once, at least one affected user, and no update or close time before the
/// creation time.
pub fn validate_records(records: &[Ticket]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for ticket in records {
        validate_ticket_id(&ticket.id)?;
        if !seen.insert(ticket.id.as_str()) {
            return Err(DeskError::PersistenceRead(format!(
                "duplicate ticket ID '{}'",
                ticket.id
            )));
        }
        validate_record(ticket)?;
    }
    Ok(())
}

fn validate_record(ticket: &Ticket) -> Result<()> {
    let problem = if ticket.number_of_users == 0 {
        "number of users must be at least 1"
    } else if ticket.last_updated_on < ticket.created_on {
        "last update precedes the creation time"
    } else if ticket.close_date.is_some_and(|closed| closed < ticket.created_on) {
        "close date precedes the creation time"
    } else {
        return Ok(());
    };
    Err(DeskError::PersistenceRead(format!(
        "ticket '{}': {problem}",
        ticket.id
    )))
}
