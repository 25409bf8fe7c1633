use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, XlsxError};

use crate::error::{DeskError, Result};
use crate::utils::write_atomic;

use super::{Cell, SpreadsheetCapability, Worksheet, WorkbookBuilder};

fn xlsx_err(e: XlsxError) -> DeskError {
    DeskError::Export(e.to_string())
}

/// Bold header row with a thin border
fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_border(FormatBorder::Thin)
}

/// Excel workbooks via `rust_xlsxwriter`
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxCapability;

impl SpreadsheetCapability for XlsxCapability {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn new_workbook(&self) -> Box<dyn WorkbookBuilder> {
        Box::new(XlsxWorkbook {
            workbook: Workbook::new(),
        })
    }
}

struct XlsxWorkbook {
    workbook: Workbook,
}

impl XlsxWorkbook {
    fn write_sheet(&mut self, sheet: &Worksheet) -> std::result::Result<(), XlsxError> {
        let ws = self.workbook.add_worksheet();
        ws.set_name(&sheet.name)?;

        let hdr = header_format();
        for (col, h) in sheet.headers.iter().enumerate() {
            ws.write_with_format(0, col as u16, h.as_str(), &hdr)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => ws.write(r, col as u16, s.as_str())?,
                    Cell::Number(n) => ws.write(r, col as u16, *n)?,
                };
            }
        }

        if !sheet.rows.is_empty() {
            ws.set_freeze_panes(1, 0)?;
        }
        Ok(())
    }
}

impl WorkbookBuilder for XlsxWorkbook {
    fn append_sheet(&mut self, sheet: &Worksheet) -> Result<()> {
        self.write_sheet(sheet).map_err(xlsx_err)
    }

    fn write_file(mut self: Box<Self>, path: &Path) -> Result<()> {
        let bytes = self.workbook.save_to_buffer().map_err(xlsx_err)?;
        write_atomic(path, &bytes)
            .map_err(|e| DeskError::Export(format!("failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{Exporter, SHEET_NAME};
    use crate::store::seed_tickets;
    use tempfile::TempDir;

    #[test]
    fn test_xlsx_export_writes_zip_container() {
        let temp = TempDir::new().unwrap();
        let exporter = Exporter::with_capability(Box::new(XlsxCapability));

        let path = exporter
            .export(&seed_tickets(), temp.path(), jiff::civil::date(2024, 3, 7))
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Service_Desk_Data_2024-03-07.xlsx"
        );
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_xlsx_rejects_invalid_sheet_name() {
        let mut book = XlsxCapability.new_workbook();
        let mut sheet = Worksheet::from_tickets(SHEET_NAME, &[]);
        sheet.name = "bad/name".to_string();
        assert!(matches!(book.append_sheet(&sheet), Err(DeskError::Export(_))));
    }
}
