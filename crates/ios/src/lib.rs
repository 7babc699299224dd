//! # xcodepatch-ios
//!
//! Locates the `.xcodeproj` bundle of a mobile build and patches its build configurations:
//! the minimum deployment target is raised to a threshold and, when configured, an
//! entitlements file reference is wired in.

pub mod finder;
pub mod hook;
pub mod patcher;

pub use finder::{BUNDLE_SUFFIX, IosProjectFinder, StrategyOutcome};
pub use hook::Hook;
pub use patcher::{
    ConfigurationPatcher, ConfigurationStatus, DEPLOYMENT_TARGET_SETTING, ENTITLEMENTS_SETTING,
};
