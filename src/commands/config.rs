//! Configuration commands.
//!
//! - `config set`: Set a configuration value
//! - `config show`: Display current configuration

use serde_json::json;

use crate::config::Config;
use crate::error::Result;
use crate::paths;

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    if output_json {
        let output = json!({
            "root": paths::desk_root(),
            "actor": config.actor,
            "storage_key": config.storage_key,
            "export": {
                "format": config.export.format.as_str(),
                "dir": config.export.dir,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{config}");
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("Set {key} = {value}");
    Ok(())
}
