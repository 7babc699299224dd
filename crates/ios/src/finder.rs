use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs::{metadata, read_dir};
use xcodepatch_core::{
    AmbiguousBundleError, Config, LocateStrategy, LocatedProject, NotFoundError,
};

pub const BUNDLE_SUFFIX: &str = ".xcodeproj";

/// Result of trying one [`LocateStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Found(LocatedProject),
    /// The layout this strategy handles is not present; try the next one
    NotApplicable,
    /// Not a build for this platform; stop without touching anything
    Skip { searched: PathBuf },
}

/// Finds the `<Name>.xcodeproj` bundle under a build root.
#[derive(Debug, Clone)]
pub struct IosProjectFinder {
    platform: String,
    descriptor_file_name: &'static str,
    strict_bundle_match: bool,
    strategies: Vec<LocateStrategy>,
}

impl IosProjectFinder {
    pub fn new(config: &Config, descriptor_file_name: &'static str) -> Self {
        Self {
            platform: config.platform.clone(),
            descriptor_file_name,
            strict_bundle_match: config.strict_bundle_match,
            strategies: vec![LocateStrategy::PlatformDirectory, LocateStrategy::ProjectRoot],
        }
    }

    #[must_use]
    pub fn platform_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join("platforms").join(&self.platform)
    }

    /// Locate the project bundle, or `None` when the platform folder does not exist.
    ///
    /// # Errors
    /// Returns [`NotFoundError`] if the searched directory holds no bundle, and
    /// [`AmbiguousBundleError`] if it holds several while strict matching is enabled.
    pub async fn locate(&self, project_root: &Path) -> Result<Option<LocatedProject>> {
        for strategy in &self.strategies {
            match self.try_strategy(*strategy, project_root).await? {
                StrategyOutcome::Found(project) => return Ok(Some(project)),
                StrategyOutcome::Skip { .. } => return Ok(None),
                StrategyOutcome::NotApplicable => continue,
            }
        }
        Err(NotFoundError {
            searched: project_root.to_path_buf(),
        }
        .into())
    }

    /// # Errors
    /// Returns error if the directory chosen by the strategy cannot be listed or holds no
    /// usable bundle.
    pub async fn try_strategy(
        &self,
        strategy: LocateStrategy,
        project_root: &Path,
    ) -> Result<StrategyOutcome> {
        match strategy {
            LocateStrategy::PlatformDirectory => {
                let platform_dir = self.platform_dir(project_root);
                match metadata(&platform_dir).await {
                    Ok(meta) if meta.is_dir() => self
                        .search(&platform_dir, strategy)
                        .await
                        .map(StrategyOutcome::Found),
                    Ok(_) => Ok(StrategyOutcome::NotApplicable),
                    Err(_) => Ok(StrategyOutcome::Skip {
                        searched: platform_dir,
                    }),
                }
            }
            LocateStrategy::ProjectRoot => self
                .search(project_root, strategy)
                .await
                .map(StrategyOutcome::Found),
        }
    }

    async fn search(&self, dir: &Path, strategy: LocateStrategy) -> Result<LocatedProject> {
        let mut candidates = Vec::new();
        let mut entries = read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            if !file_name.to_string_lossy().ends_with(BUNDLE_SUFFIX) {
                continue;
            }
            // follows symlinks, a linked bundle directory still counts
            if metadata(entry.path()).await.is_ok_and(|meta| meta.is_dir()) {
                candidates.push(file_name);
            }
        }
        candidates.sort();

        let Some(bundle) = candidates.last().cloned() else {
            return Err(NotFoundError {
                searched: dir.to_path_buf(),
            }
            .into());
        };
        let bundle_name = bundle.to_string_lossy().to_string();
        if candidates.len() > 1 {
            let names = candidates
                .iter()
                .map(|candidate| candidate.to_string_lossy().to_string())
                .collect::<Vec<_>>();
            if self.strict_bundle_match {
                return Err(AmbiguousBundleError {
                    searched: dir.to_path_buf(),
                    candidates: names,
                }
                .into());
            }
            eprintln!(
                "{} several {} bundles in {} ({}), using {}",
                "warning:".yellow().bold(),
                BUNDLE_SUFFIX,
                dir.display(),
                names.join(", "),
                bundle_name.bright_white().bold()
            );
        }

        let name = bundle_name
            .strip_suffix(BUNDLE_SUFFIX)
            .unwrap_or(&bundle_name)
            .to_string();
        Ok(LocatedProject::new(
            name,
            dir.join(&bundle),
            self.descriptor_file_name,
            strategy,
        ))
    }
}
