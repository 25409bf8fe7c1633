//! The three-view state machine that owns the ticket store.
//!
//! ```text
//! Dashboard --start_create--> CreateForm --submit (ok)--> RecordTable
//!     ^                           |
//!     +----------cancel-----------+
//! ```
//!
//! `navigate` may jump to any view at any time.

pub mod confirm;
pub mod navigation;

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use jiff::Timestamp;
use jiff::civil::Date;

use crate::analytics::{Summary, summarize};
use crate::catalog_enum;
use crate::error::{DeskError, Result};
use crate::export::Exporter;
use crate::query::filter;
use crate::store::TicketStore;
use crate::ticket::{Ticket, TicketDraft};

pub use confirm::{AlwaysConfirm, Answer, Confirm, PromptConfirm, TerminalConfirm};
pub use navigation::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    CreateForm,
    RecordTable,
}

catalog_enum!(View, "view", {
    Dashboard => "Dashboard",
    CreateForm => "Create Form",
    RecordTable => "Record Table",
});

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Declined,
    NotFound,
}

pub struct AppController {
    store: TicketStore,
    exporter: Exporter,
    view: View,
    search: String,
    navigator: Navigator,
    requests: Receiver<Option<View>>,
}

impl AppController {
    pub fn new(store: TicketStore, exporter: Exporter) -> Self {
        let (navigator, requests) = navigation::channel();
        AppController {
            store,
            exporter,
            view: View::default(),
            search: String::new(),
            navigator,
            requests,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    pub fn exporter_mut(&mut self) -> &mut Exporter {
        &mut self.exporter
    }

    /// A handle that can request view changes
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            tracing::debug!("view {} -> {}", self.view, view);
        }
        self.view = view;
    }

    /// Apply every queued navigation request in order. Returns how many ran.
    pub fn pump_navigation(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(request) = self.requests.try_recv() {
            self.navigate(navigation::resolve(request));
            applied += 1;
        }
        applied
    }

    fn require(&self, view: View, action: &str) -> Result<()> {
        if self.view == view {
            Ok(())
        } else {
            Err(DeskError::InvalidTransition {
                action: action.to_string(),
                view: self.view.to_string(),
            })
        }
    }

    /// Dashboard -> CreateForm
    pub fn start_create(&mut self) -> Result<()> {
        self.require(View::Dashboard, "start a new ticket")?;
        self.navigate(View::CreateForm);
        Ok(())
    }

    /// Create a ticket from the form. Moves to the record table on success
    /// and stays on the form on error.
    pub fn submit(&mut self, draft: TicketDraft) -> Result<Ticket> {
        self.submit_at(draft, Timestamp::now())
    }

    pub fn submit_at(&mut self, draft: TicketDraft, now: Timestamp) -> Result<Ticket> {
        self.require(View::CreateForm, "submit a ticket")?;
        let ticket = self.store.create_at(draft, now)?;
        self.navigate(View::RecordTable);
        Ok(ticket)
    }

    /// CreateForm -> Dashboard, discarding the draft
    pub fn cancel(&mut self) -> Result<()> {
        self.require(View::CreateForm, "cancel")?;
        self.navigate(View::Dashboard);
        Ok(())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Records shown in the table under the current search term
    pub fn visible_records(&self) -> Vec<&Ticket> {
        filter(self.store.snapshot(), &self.search)
    }

    pub fn summary(&self) -> Summary {
        summarize(self.store.snapshot())
    }

    /// Delete after asking `confirm`. Nothing is asked for an unknown ID.
    pub fn delete(&mut self, id: &str, confirm: &mut dyn Confirm) -> DeleteOutcome {
        if self.store.get(id).is_none() {
            return DeleteOutcome::NotFound;
        }
        if !confirm.confirm(&format!("Delete ticket {id}?")) {
            return DeleteOutcome::Declined;
        }
        if self.store.remove(id) {
            DeleteOutcome::Removed
        } else {
            DeleteOutcome::NotFound
        }
    }

    pub fn close(&mut self, id: &str, at: Option<Timestamp>) -> Result<Ticket> {
        self.store.close(id, at)
    }

    /// Export the full, unfiltered ticket set
    pub fn export(&self, dir: &Path, date: Date) -> Result<PathBuf> {
        self.exporter.export(self.store.snapshot(), dir, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CsvCapability;
    use crate::store::MemorySlotStore;
    use tempfile::TempDir;

    fn controller() -> AppController {
        let store = TicketStore::load(Box::new(MemorySlotStore::new()), "tickets");
        AppController::new(store, Exporter::new())
    }

    fn now() -> Timestamp {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_initial_view_is_dashboard() {
        assert_eq!(controller().view(), View::Dashboard);
    }

    #[test]
    fn test_create_flow() {
        let mut app = controller();
        app.start_create().unwrap();
        assert_eq!(app.view(), View::CreateForm);

        let ticket = app
            .submit_at(TicketDraft::new("VPN Issue", "Jane Doe"), now())
            .unwrap();
        assert_eq!(app.view(), View::RecordTable);
        assert_eq!(app.store().snapshot()[0].id, ticket.id);
    }

    #[test]
    fn test_invalid_submit_stays_on_form() {
        let mut app = controller();
        app.start_create().unwrap();
        let err = app.submit_at(TicketDraft::new("", "Jane"), now()).unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
        assert_eq!(app.view(), View::CreateForm);
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn test_cancel_returns_to_dashboard() {
        let mut app = controller();
        app.start_create().unwrap();
        app.cancel().unwrap();
        assert_eq!(app.view(), View::Dashboard);
    }

    #[test]
    fn test_out_of_state_actions_are_rejected() {
        let mut app = controller();
        assert!(matches!(
            app.cancel(),
            Err(DeskError::InvalidTransition { .. })
        ));
        assert!(app.submit_at(TicketDraft::new("a", "b"), now()).is_err());
        assert_eq!(app.store().len(), 1);

        app.navigate(View::RecordTable);
        let err = app.start_create().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot start a new ticket from the Record Table view"
        );
    }

    #[test]
    fn test_navigate_reaches_any_view() {
        let mut app = controller();
        for view in View::ALL {
            app.navigate(*view);
            assert_eq!(app.view(), *view);
        }
    }

    #[test]
    fn test_navigation_requests_are_pumped_in_order() {
        let mut app = controller();
        let nav = app.navigator();
        nav.go(View::RecordTable);
        nav.request(None);
        assert_eq!(app.view(), View::Dashboard, "requests wait for the pump");

        assert_eq!(app.pump_navigation(), 2);
        assert_eq!(app.view(), View::CreateForm);
        assert_eq!(app.pump_navigation(), 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = controller();
        assert_eq!(app.delete("T-1001", &mut Answer(false)), DeleteOutcome::Declined);
        assert_eq!(app.store().len(), 1);

        assert_eq!(app.delete("T-1001", &mut AlwaysConfirm), DeleteOutcome::Removed);
        assert!(app.store().is_empty());
        assert_eq!(app.delete("T-1001", &mut AlwaysConfirm), DeleteOutcome::NotFound);
    }

    #[test]
    fn test_search_narrows_visible_records() {
        let mut app = controller();
        app.navigate(View::CreateForm);
        app.submit_at(TicketDraft::new("Printer jam", "Jane Roe"), now())
            .unwrap();

        app.set_search("  PRINTER ");
        let visible = app.visible_records();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].display_name, "Printer jam");

        app.set_search("");
        assert_eq!(app.visible_records().len(), 2);
    }

    #[test]
    fn test_export_before_and_after_attach() {
        let temp = TempDir::new().unwrap();
        let mut app = controller();
        let date = jiff::civil::date(2024, 5, 1);

        assert!(matches!(
            app.export(temp.path(), date),
            Err(DeskError::DependencyUnavailable(_))
        ));
        assert!(!temp.path().join("Service_Desk_Data_2024-05-01.csv").exists());

        app.exporter_mut().attach(Box::new(CsvCapability));
        let path = app.export(temp.path(), date).unwrap();
        assert!(path.exists());
    }
}
