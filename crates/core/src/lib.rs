//! # xcodepatch-core
//!
//! Shared types for locating and patching native iOS project descriptors: configuration,
//! typed errors, the descriptor and descriptor-format traits, and patch reports.

pub mod config;
pub mod descriptor;
pub mod descriptor_format;
pub mod error;
pub mod hook_context;
pub mod located_project;
pub mod patch_report;
pub mod version_comparator;

// Re-export traits for convenience
pub use config::Config;
pub use descriptor::{
    BuildConfiguration, COMMENT_KEY_SUFFIX, ConfigurationSection, ProjectDescriptor,
    SectionEntry, is_comment_key,
};
pub use descriptor_format::DescriptorFormat;
pub use error::{AmbiguousBundleError, DescriptorIoError, NotFoundError};
pub use hook_context::HookContext;
pub use located_project::{LocateStrategy, LocatedProject};
pub use patch_report::{HookOutcome, PatchReport, SettingChange};
pub use version_comparator::VersionComparator;
