use anyhow::Result;
use std::path::{Path, PathBuf};
use xcodepatch_core::Config;
use xcodepatch_utils::get_xcodepatch_config;

pub struct CommandContext {
    pub project_root: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// Resolve the build root (`path`, or the current directory) and load its configuration.
    ///
    /// # Errors
    /// Returns error if the current directory cannot be read or the configuration is invalid.
    pub async fn new(path: Option<&Path>) -> Result<Self> {
        let project_root = match path {
            Some(path) => path.to_path_buf(),
            None => Self::current_dir()?,
        };
        let config = get_xcodepatch_config(&project_root).await?;
        Ok(Self {
            project_root,
            config,
        })
    }

    /// # Errors
    /// Returns error if retrieving the current directory fails.
    pub fn current_dir() -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }
}
