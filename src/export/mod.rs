//! Spreadsheet export of the full ticket set.
//!
//! The exporter does not know any file format itself. Writing goes through a
//! [`SpreadsheetCapability`] that may be attached at construction or later;
//! until one is attached every export fails with
//! [`DeskError::DependencyUnavailable`] and nothing is written.

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use jiff::civil::Date;

use crate::error::{DeskError, Result};
use crate::ticket::Ticket;

pub use self::csv::CsvCapability;
pub use self::xlsx::XlsxCapability;

/// Sheet name used for the ticket export
pub const SHEET_NAME: &str = "Tickets";

/// File name stem; the export date and extension are appended
pub const FILE_PREFIX: &str = "Service_Desk_Data";

/// Column headers, in record field order
pub const COLUMNS: &[&str] = &[
    "id",
    "displayName",
    "helpdeskTeam",
    "assignedTo",
    "numberOfUsers",
    "registeredCustomer",
    "createdOn",
    "lastUpdatedOn",
    "lastUpdatedBy",
    "closeDate",
    "duration",
    "priority",
    "slaDeadline",
    "stage",
    "cityOfAddress",
    "mrResponsible",
    "mrTeamLeader",
    "subArea",
    "durationValue",
    "slaStatus",
    "monthTrend",
];

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    fn opt_time(ts: Option<jiff::Timestamp>) -> Self {
        Cell::Text(ts.map(|t| t.to_string()).unwrap_or_default())
    }

    /// Plain text form, as written to delimited files
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// A named grid: one header row plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    /// One row per ticket, one column per record field
    pub fn from_tickets(name: &str, records: &[Ticket]) -> Self {
        let rows = records
            .iter()
            .map(|t| {
                vec![
                    Cell::text(&t.id),
                    Cell::text(&t.display_name),
                    Cell::text(t.helpdesk_team.as_str()),
                    Cell::text(&t.assigned_to),
                    Cell::Number(t.number_of_users as f64),
                    Cell::text(&t.registered_customer),
                    Cell::text(t.created_on.to_string()),
                    Cell::text(t.last_updated_on.to_string()),
                    Cell::text(&t.last_updated_by),
                    Cell::opt_time(t.close_date),
                    Cell::text(&t.duration),
                    Cell::text(t.priority.as_str()),
                    Cell::opt_time(t.sla_deadline),
                    Cell::text(t.stage.as_str()),
                    Cell::text(&t.city_of_address),
                    Cell::text(&t.mr_responsible),
                    Cell::text(&t.mr_team_leader),
                    Cell::text(&t.sub_area),
                    Cell::Number(t.duration_value as f64),
                    Cell::text(t.sla_status.as_str()),
                    Cell::text(t.month_trend.as_str()),
                ]
            })
            .collect();

        Worksheet {
            name: name.to_string(),
            headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

/// A workbook under construction
pub trait WorkbookBuilder {
    fn append_sheet(&mut self, sheet: &Worksheet) -> Result<()>;

    /// Write the workbook to `path`. Implementations write atomically.
    fn write_file(self: Box<Self>, path: &Path) -> Result<()>;
}

/// A spreadsheet writer the exporter can be given
pub trait SpreadsheetCapability {
    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn new_workbook(&self) -> Box<dyn WorkbookBuilder>;

    fn worksheet(&self, name: &str, records: &[Ticket]) -> Worksheet {
        Worksheet::from_tickets(name, records)
    }
}

/// `Service_Desk_Data_<YYYY-MM-DD>.<ext>`
pub fn export_file_name(date: Date, extension: &str) -> String {
    format!("{FILE_PREFIX}_{}.{extension}", date.strftime("%Y-%m-%d"))
}

#[derive(Default)]
pub struct Exporter {
    capability: Option<Box<dyn SpreadsheetCapability>>,
}

impl Exporter {
    /// An exporter with nothing attached yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capability(capability: Box<dyn SpreadsheetCapability>) -> Self {
        Exporter {
            capability: Some(capability),
        }
    }

    /// Attach (or replace) the spreadsheet capability
    pub fn attach(&mut self, capability: Box<dyn SpreadsheetCapability>) {
        self.capability = Some(capability);
    }

    pub fn is_available(&self) -> bool {
        self.capability.is_some()
    }

    /// Write every record to `dir/Service_Desk_Data_<date>.<ext>`
    pub fn export(&self, records: &[Ticket], dir: &Path, date: Date) -> Result<PathBuf> {
        let capability = self.capability.as_ref().ok_or_else(|| {
            DeskError::DependencyUnavailable(
                "no spreadsheet writer is attached; try again shortly".to_string(),
            )
        })?;

        let sheet = capability.worksheet(SHEET_NAME, records);
        let mut workbook = capability.new_workbook();
        workbook.append_sheet(&sheet)?;

        let path = dir.join(export_file_name(date, capability.extension()));
        workbook.write_file(&path)?;
        tracing::info!("exported {} tickets to {}", records.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_tickets;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn date() -> Date {
        jiff::civil::date(2024, 3, 7)
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(date(), "xlsx"),
            "Service_Desk_Data_2024-03-07.xlsx"
        );
    }

    #[test]
    fn test_export_without_capability_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::new();
        assert!(!exporter.is_available());

        let err = exporter
            .export(&seed_tickets(), temp.path(), date())
            .unwrap_err();
        assert!(matches!(err, DeskError::DependencyUnavailable(_)));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_worksheet_from_tickets() {
        let sheet = Worksheet::from_tickets(SHEET_NAME, &seed_tickets());
        assert_eq!(sheet.name, "Tickets");
        assert_eq!(sheet.headers.len(), COLUMNS.len());
        assert_eq!(sheet.rows.len(), 1);

        let row = &sheet.rows[0];
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], Cell::Text("T-1001".to_string()));
        assert_eq!(row[2], Cell::Text("Infrastructure".to_string()));
        assert_eq!(row[4], Cell::Number(5.0));
        assert_eq!(row[9], Cell::Text(String::new()));
        assert_eq!(row[13], Cell::Text("In Progress".to_string()));
    }

    #[derive(Default, Clone)]
    struct Recorder {
        sheets: Rc<RefCell<Vec<Worksheet>>>,
        paths: Rc<RefCell<Vec<PathBuf>>>,
    }

    struct RecordingBook(Recorder);

    impl WorkbookBuilder for RecordingBook {
        fn append_sheet(&mut self, sheet: &Worksheet) -> Result<()> {
            self.0.sheets.borrow_mut().push(sheet.clone());
            Ok(())
        }

        fn write_file(self: Box<Self>, path: &Path) -> Result<()> {
            self.0.paths.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    impl SpreadsheetCapability for Recorder {
        fn extension(&self) -> &'static str {
            "rec"
        }

        fn new_workbook(&self) -> Box<dyn WorkbookBuilder> {
            Box::new(RecordingBook(self.clone()))
        }
    }

    #[test]
    fn test_late_attach_makes_export_available() {
        let recorder = Recorder::default();
        let mut exporter = Exporter::new();
        exporter.attach(Box::new(recorder.clone()));
        assert!(exporter.is_available());

        let dir = Path::new("/exports");
        let path = exporter.export(&seed_tickets(), dir, date()).unwrap();

        assert_eq!(path, dir.join("Service_Desk_Data_2024-03-07.rec"));
        assert_eq!(recorder.paths.borrow().as_slice(), &[path]);
        let sheets = recorder.sheets.borrow();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, SHEET_NAME);
        assert_eq!(sheets[0].rows.len(), 1);
    }
}
