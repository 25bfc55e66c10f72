//! Process configuration: the configuration directory and the data
//! directory holding the repositories.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Optional settings file inside the configuration directory.
pub const CONFIG_FILE: &str = "repofs.toml";

/// Default data directory name, relative to the configuration directory.
pub const DATA_SUBDIR: &str = "repos";

/// Contents of `repofs.toml`. Every field is optional; command-line
/// arguments take precedence over the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
}

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from `config_dir`, with `data_dir` overriding
    /// both the settings file and the `<config>/repos` default.
    pub fn load(config_dir: impl Into<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        if !config_dir.is_dir() {
            return Err(Error::not_found(format!(
                "configuration directory {}",
                config_dir.display()
            )));
        }

        let settings = read_settings(&config_dir.join(CONFIG_FILE))?;
        let data_dir = data_dir
            .or(settings.data_dir)
            .unwrap_or_else(|| config_dir.join(DATA_SUBDIR));

        Ok(Self {
            config_dir,
            data_dir,
        })
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    if !path.is_file() {
        return Ok(Settings::default());
    }
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| Error::backend_msg(format!("{}: {}", path.display(), e)))
}
