use colored::Colorize;
use serde::Serialize;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// One build setting the patcher changed inside one configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingChange {
    /// Object identifier of the configuration record
    pub record: String,
    pub configuration: String,
    pub setting: String,
    pub from: Option<String>,
    pub to: String,
}

impl Display for SettingChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} {} {}",
            format!("[{}]", self.configuration).bright_blue().bold(),
            self.setting.bright_white(),
            self.from.as_deref().unwrap_or("unset").bright_red(),
            "→".bright_cyan(),
            self.to.bright_green()
        )
    }
}

/// Result of one patch run over one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchReport {
    descriptor_path: PathBuf,
    project_name: Option<String>,
    changes: Vec<SettingChange>,
    written: bool,
}

impl PatchReport {
    #[must_use]
    pub fn new(descriptor_path: PathBuf, project_name: Option<String>) -> Self {
        Self {
            descriptor_path,
            project_name,
            changes: Vec::new(),
            written: false,
        }
    }

    pub fn push(&mut self, change: SettingChange) {
        self.changes.push(change);
    }

    pub fn set_written(&mut self, written: bool) {
        self.written = written;
    }

    #[must_use]
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    #[must_use]
    pub fn changes(&self) -> &[SettingChange] {
        &self.changes
    }

    #[must_use]
    pub fn is_updated(&self) -> bool {
        !self.changes.is_empty()
    }

    #[must_use]
    pub const fn is_written(&self) -> bool {
        self.written
    }
}

/// What a hook invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum HookOutcome {
    /// The platform folder is absent, so this is not a build for the platform
    Skipped { searched: PathBuf },
    Patched(PatchReport),
}
