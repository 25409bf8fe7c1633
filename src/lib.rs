pub mod macros;

pub mod analytics;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod paths;
pub mod query;
pub mod store;
pub mod ticket;
pub mod types;
pub mod utils;

pub use analytics::{Summary, recent, summarize};
pub use app::{AppController, Confirm, Navigator, View};
pub use config::{Config, ExportFormat};
pub use error::{DeskError, Result};
pub use export::{CsvCapability, Exporter, SpreadsheetCapability, XlsxCapability};
pub use query::filter;
pub use store::{FileSlotStore, LoadOutcome, MemorySlotStore, SlotStore, TicketStore};
pub use ticket::{Ticket, TicketDraft};
pub use types::{CATALOG, HelpdeskTeam, MonthTrend, Priority, SlaStatus, Stage};
