use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::open_app;
use crate::analytics::{RECENT_ACTIVITY_LIMIT, recent};
use crate::app::AppController;
use crate::display::{format_dashboard, format_recent_activity};
use crate::error::Result;

/// Dashboard text: summary cards followed by the recent-activity list
pub fn render_dashboard(app: &AppController) -> String {
    format!(
        "{}\n\n{}\n{}",
        format_dashboard(&app.summary()),
        "Recent Activity".if_supports_color(Stream::Stdout, |s| s.bold()),
        format_recent_activity(recent(app.store().snapshot(), RECENT_ACTIVITY_LIMIT))
    )
}

/// Show summary counts and the most recent tickets
pub fn cmd_dashboard(output_json: bool) -> Result<()> {
    let (app, _) = open_app()?;

    if output_json {
        let output = json!({
            "summary": app.summary(),
            "recent": recent(app.store().snapshot(), RECENT_ACTIVITY_LIMIT),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", render_dashboard(&app));
    Ok(())
}
