use std::path::PathBuf;

use super::open_app;
use crate::config::ExportFormat;
use crate::error::Result;
use crate::utils::today_utc;

/// Write every ticket to `Service_Desk_Data_<date>.<ext>`
pub fn cmd_export(dir: Option<PathBuf>, format: Option<ExportFormat>) -> Result<()> {
    let (mut app, config) = open_app()?;
    if let Some(format) = format {
        app.exporter_mut().attach(format.capability());
    }
    let dir = dir.unwrap_or_else(|| config.export_dir());

    let path = app.export(&dir, today_utc())?;
    println!("Exported {} tickets to {}", app.store().len(), path.display());
    Ok(())
}
