use std::{collections::BTreeMap, fmt::Debug, path::Path};

use crate::error::DescriptorIoError;

/// Keys ending with this suffix annotate the record keyed by the same identifier and are
/// not build configurations themselves.
pub const COMMENT_KEY_SUFFIX: &str = "_comment";

/// One `XCBuildConfiguration` object: its display name and its string-valued build settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildConfiguration {
    pub name: Option<String>,
    pub build_settings: BTreeMap<String, String>,
}

impl BuildConfiguration {
    #[must_use]
    pub fn setting(&self, name: &str) -> Option<&str> {
        self.build_settings.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEntry {
    Record(BuildConfiguration),
    Comment(String),
}

/// Build configuration section in document order. Each record is keyed by its object
/// identifier and may be followed by a `<identifier>_comment` pseudo-entry.
pub type ConfigurationSection = Vec<(String, SectionEntry)>;

#[must_use]
pub fn is_comment_key(key: &str) -> bool {
    key.ends_with(COMMENT_KEY_SUFFIX)
}

/// A parsed native project descriptor, mutated in place and written back by a
/// [`DescriptorFormat`](crate::DescriptorFormat).
pub trait ProjectDescriptor: Debug + Send + Sync {
    /// On-disk location the descriptor was read from and is written back to.
    fn path(&self) -> &Path;

    fn configuration_section(&self) -> ConfigurationSection;

    /// Sets `setting` inside the build settings of the record keyed `key`, adding the
    /// setting when it is absent.
    ///
    /// # Errors
    /// Returns error if no build configuration record is keyed `key`.
    fn set_build_setting(
        &mut self,
        key: &str,
        setting: &str,
        value: &str,
    ) -> Result<(), DescriptorIoError>;

    /// Serialized form of the descriptor including all edits.
    fn to_source(&self) -> String;

    /// Project name derived from the enclosing `<Name>.xcodeproj` bundle.
    fn project_name(&self) -> Option<String> {
        let bundle = self.path().parent()?;
        if bundle.extension()? != "xcodeproj" {
            return None;
        }
        bundle
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    }
}
