//! Storage Layer
//!
//! Well-known locations: the configuration file and the default gallery.

use anyhow::Result;
use std::path::PathBuf;

/// Configuration file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Get the configuration directory, creating it if needed
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "inkread", "InkRead")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Path of the configuration file
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// Directory browsed by the gallery picker when none is configured
///
/// The user's pictures directory, else their home directory, else the
/// working directory.
pub fn default_gallery_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| {
            dirs.picture_dir()
                .map(|p| p.to_path_buf())
                .or_else(|| Some(dirs.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
