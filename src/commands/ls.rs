use super::open_app;
use crate::display::format_ticket_table;
use crate::error::Result;

/// List tickets, newest first, optionally narrowed by a search term
pub fn cmd_ls(search: Option<&str>, output_json: bool) -> Result<()> {
    let (mut app, _) = open_app()?;
    app.set_search(search.unwrap_or_default());
    let visible = app.visible_records();

    if output_json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{}", format_ticket_table(&visible));
    Ok(())
}
