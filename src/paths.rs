use std::path::PathBuf;

pub const ROOT_ENV: &str = "SDESK_ROOT";
pub const DEFAULT_ROOT: &str = ".servicedesk";

/// Returns the root data directory path.
///
/// Resolution order:
/// 1. `SDESK_ROOT` environment variable (if set and non-empty)
/// 2. Current working directory + `.servicedesk`
pub fn desk_root() -> PathBuf {
    match std::env::var(ROOT_ENV) {
        Ok(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from(DEFAULT_ROOT),
    }
}

/// Returns the directory holding persistence slots.
pub fn storage_dir() -> PathBuf {
    desk_root().join("storage")
}

/// Returns the path to the YAML configuration file.
pub fn config_path() -> PathBuf {
    desk_root().join("config.yaml")
}
