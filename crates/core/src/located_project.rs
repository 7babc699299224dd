use colored::Colorize;
use serde::Serialize;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// Where a bundle was searched for, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocateStrategy {
    /// `platforms/<platform>/` folder of the build root
    PlatformDirectory,
    /// The build root itself
    ProjectRoot,
}

impl LocateStrategy {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PlatformDirectory => "platform",
            Self::ProjectRoot => "root",
        }
    }
}

impl Display for LocateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::PlatformDirectory => "Platform".green().bold(),
                Self::ProjectRoot => "Root".yellow().bold(),
            }
        )
    }
}

/// A `<Name>.xcodeproj` bundle found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedProject {
    name: String,
    bundle_path: PathBuf,
    descriptor_path: PathBuf,
    strategy: LocateStrategy,
}

impl LocatedProject {
    #[must_use]
    pub fn new(
        name: String,
        bundle_path: PathBuf,
        descriptor_file_name: &str,
        strategy: LocateStrategy,
    ) -> Self {
        let descriptor_path = bundle_path.join(descriptor_file_name);
        Self {
            name,
            bundle_path,
            descriptor_path,
            strategy,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    #[must_use]
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    #[must_use]
    pub const fn strategy(&self) -> LocateStrategy {
        self.strategy
    }
}

impl Display for LocatedProject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format!("[{}]", self.strategy).bright_blue().bold(),
            self.name.bright_white().bold(),
            "→".bright_cyan(),
            self.bundle_path.display().to_string().bright_black()
        )
    }
}
