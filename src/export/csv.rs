use std::path::Path;

use crate::error::{DeskError, Result};
use crate::utils::write_atomic;

use super::{SpreadsheetCapability, Worksheet, WorkbookBuilder};

/// Comma-separated export. A CSV file holds a single sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCapability;

impl SpreadsheetCapability for CsvCapability {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn new_workbook(&self) -> Box<dyn WorkbookBuilder> {
        Box::new(CsvWorkbook { sheet: None })
    }
}

struct CsvWorkbook {
    sheet: Option<Worksheet>,
}

fn csv_err(e: impl std::fmt::Display) -> DeskError {
    DeskError::Export(format!("CSV: {e}"))
}

impl WorkbookBuilder for CsvWorkbook {
    fn append_sheet(&mut self, sheet: &Worksheet) -> Result<()> {
        if self.sheet.is_some() {
            return Err(DeskError::Export(
                "CSV output holds a single sheet".to_string(),
            ));
        }
        self.sheet = Some(sheet.clone());
        Ok(())
    }

    fn write_file(self: Box<Self>, path: &Path) -> Result<()> {
        let sheet = self
            .sheet
            .ok_or_else(|| DeskError::Export("no sheet to write".to_string()))?;

        let mut wtr = ::csv::Writer::from_writer(Vec::new());
        wtr.write_record(&sheet.headers).map_err(csv_err)?;
        for row in &sheet.rows {
            wtr.write_record(row.iter().map(|c| c.render()))
                .map_err(csv_err)?;
        }
        let bytes = wtr.into_inner().map_err(csv_err)?;

        write_atomic(path, &bytes)
            .map_err(|e| DeskError::Export(format!("failed to write {}: {}", path.display(), e)))
    }
}
