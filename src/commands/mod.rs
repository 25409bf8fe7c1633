mod close;
mod config;
pub mod create;
mod dashboard;
mod export;
mod ls;
mod rm;
pub mod shell;
mod show;

pub use close::cmd_close;
pub use config::{cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use dashboard::cmd_dashboard;
pub use export::cmd_export;
pub use ls::cmd_ls;
pub use rm::cmd_rm;
pub use shell::cmd_shell;
pub use show::cmd_show;

use crate::app::AppController;
use crate::config::Config;
use crate::error::Result;
use crate::export::Exporter;
use crate::paths;
use crate::store::{FileSlotStore, TicketStore};

/// Load configuration and open the ticket store under the data root
pub fn open_app() -> Result<(AppController, Config)> {
    let config = Config::load()?;
    let slots = FileSlotStore::new(paths::storage_dir());
    let store = TicketStore::load(Box::new(slots), &config.storage_key)
        .with_actor(config.actor.clone());
    if let Some(warning) = store.load_outcome().warning() {
        eprintln!("Warning: {warning}");
    }

    let exporter = Exporter::with_capability(config.export.format.capability());
    Ok((AppController::new(store, exporter), config))
}

/// Tell the user when the last mutation did not reach storage
pub fn warn_if_unsaved(app: &AppController) {
    if let Some(err) = app.store().last_persist_error() {
        eprintln!("Warning: changes were not saved: {err}");
    }
}
