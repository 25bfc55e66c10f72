//! The application context: configuration plus the backing stores.
//!
//! Constructed once at process start, before anything is mounted, and
//! torn down at process exit. The mount layer borrows it for every
//! operation; it is never reinitialized mid-run.

use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::GitBackend;
use crate::vfs::Vfs;

pub struct Session {
    config: Config,
    backend: Arc<GitBackend>,
}

impl Session {
    /// Validate the configured directories and open the backing stores.
    /// A failure here is fatal to startup; nothing has been mounted yet.
    pub fn start(config: Config) -> Result<Self> {
        if !config.data_dir.is_dir() {
            return Err(Error::not_found(format!(
                "data directory {}",
                config.data_dir.display()
            )));
        }
        info!("serving repositories from {}", config.data_dir.display());
        let backend = Arc::new(GitBackend::new(&config.data_dir));
        Ok(Self { config, backend })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A filesystem view over this session's stores.
    pub fn vfs(&self) -> Vfs<GitBackend> {
        Vfs::new(Arc::clone(&self.backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_requires_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path(), None).unwrap();
        // <config>/repos does not exist yet
        assert!(Session::start(config.clone()).is_err());

        std::fs::create_dir(&config.data_dir).unwrap();
        let session = Session::start(config).unwrap();
        assert_eq!(session.vfs().readdir("/").unwrap().len(), 2);
    }
}
