//! The in-memory ticket collection and its persistence slot.
//!
//! Records are kept newest first. Every mutation writes the full set back to
//! the slot; a failed write is logged and remembered but never undoes the
//! in-memory change.

pub mod persist;
pub mod seed;
pub mod slot;

use std::collections::HashSet;

use jiff::Timestamp;

use crate::analytics::month_trend;
use crate::error::{DeskError, Result};
use crate::ticket::{Ticket, TicketDraft, validate_draft};
use crate::types::Stage;
use crate::utils::generate_ticket_id;

pub use seed::seed_tickets;
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};

/// Default slot key for the ticket set
pub const DEFAULT_STORAGE_KEY: &str = "servicedesk_tickets";

/// Default identity stamped into `lastUpdatedBy`
pub const DEFAULT_ACTOR: &str = "Current User";

/// How the store's initial contents were obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Persisted records were read back
    Restored,
    /// Nothing was persisted yet, so the seed record was used
    Seeded,
    /// The slot could not be used and the seed record replaced it
    Recovered(String),
}

impl LoadOutcome {
    /// Warning text for outcomes the user should hear about
    pub fn warning(&self) -> Option<&str> {
        match self {
            LoadOutcome::Recovered(reason) => Some(reason),
            _ => None,
        }
    }
}

pub struct TicketStore {
    tickets: Vec<Ticket>,
    slot: Box<dyn SlotStore>,
    key: String,
    actor: String,
    load_outcome: LoadOutcome,
    last_persist_error: Option<String>,
}

impl std::fmt::Debug for TicketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketStore")
            .field("key", &self.key)
            .field("len", &self.tickets.len())
            .field("load_outcome", &self.load_outcome)
            .finish()
    }
}

impl TicketStore {
    /// Initialize from the slot at `key`, falling back to the seed record.
    ///
    /// Never fails: a missing, unreadable or corrupt slot yields the seed and
    /// the reason is kept in [`TicketStore::load_outcome`].
    pub fn load(slot: Box<dyn SlotStore>, key: &str) -> Self {
        let (tickets, load_outcome) = match slot.read(key) {
            Ok(None) => {
                tracing::debug!("no persisted tickets under '{}', using seed data", key);
                (seed_tickets(), LoadOutcome::Seeded)
            }
            Ok(Some(text)) => match persist::decode(&text) {
                Ok(tickets) => {
                    tracing::debug!("restored {} tickets from '{}'", tickets.len(), key);
                    (tickets, LoadOutcome::Restored)
                }
                Err(e) => Self::recover(key, e),
            },
            Err(e) => Self::recover(key, e),
        };

        TicketStore {
            tickets,
            slot,
            key: key.to_string(),
            actor: DEFAULT_ACTOR.to_string(),
            load_outcome,
            last_persist_error: None,
        }
    }

    fn recover(key: &str, err: DeskError) -> (Vec<Ticket>, LoadOutcome) {
        tracing::warn!("discarding persisted tickets under '{}': {}", key, err);
        (
            seed_tickets(),
            LoadOutcome::Recovered(format!(
                "persisted tickets could not be loaded ({err}); using seed data"
            )),
        )
    }

    /// Set the identity recorded on mutations
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Message of the most recent failed write, cleared by the next good one
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Read-only view of all records, newest first
    pub fn snapshot(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Validate a draft, turn it into a record and prepend it
    pub fn create(&mut self, draft: TicketDraft) -> Result<Ticket> {
        self.create_at(draft, Timestamp::now())
    }

    /// [`TicketStore::create`] with an explicit clock
    pub fn create_at(&mut self, draft: TicketDraft, now: Timestamp) -> Result<Ticket> {
        validate_draft(&draft, now)?;

        let id = {
            let existing: HashSet<&str> = self.tickets.iter().map(|t| t.id.as_str()).collect();
            generate_ticket_id(&existing)?
        };
        let created_on = draft.created_on.unwrap_or(now);
        let trend = month_trend(created_on, &self.tickets);
        let ticket = draft.build(id, now, &self.actor, trend);

        tracing::info!("created ticket {}", ticket.id);
        self.tickets.insert(0, ticket.clone());
        self.persist();
        Ok(ticket)
    }

    /// Remove the record with `id`. Returns `false`, without writing, when absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.tickets.iter().position(|t| t.id == id) else {
            tracing::debug!("remove: no ticket '{}'", id);
            return false;
        };
        self.tickets.remove(pos);
        tracing::info!("removed ticket {}", id);
        self.persist();
        true
    }

    /// Mark a ticket Closed at `at` (default now)
    pub fn close(&mut self, id: &str, at: Option<Timestamp>) -> Result<Ticket> {
        self.close_at(id, at, Timestamp::now())
    }

    /// [`TicketStore::close`] with an explicit clock
    pub fn close_at(&mut self, id: &str, at: Option<Timestamp>, now: Timestamp) -> Result<Ticket> {
        let actor = self.actor.clone();
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DeskError::TicketNotFound(id.to_string()))?;

        if ticket.is_closed() {
            return Err(DeskError::Validation(format!(
                "ticket '{id}' is already closed"
            )));
        }
        let closed_at = at.unwrap_or(now);
        if closed_at < ticket.created_on {
            return Err(DeskError::Validation(
                "close date cannot precede the creation time".to_string(),
            ));
        }

        ticket.stage = Stage::Closed;
        ticket.close_date = Some(closed_at);
        ticket.refresh_duration();
        ticket.touch(now, &actor);
        let closed = ticket.clone();

        tracing::info!("closed ticket {} after {}", closed.id, closed.duration);
        self.persist();
        Ok(closed)
    }

    /// Write the full set to the slot
    pub fn save(&mut self) -> Result<()> {
        let text = persist::encode(&self.tickets)?;
        self.slot.write(&self.key, &text)
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!("failed to persist tickets to '{}': {}", self.key, e);
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}
