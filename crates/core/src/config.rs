use serde::{Deserialize, Serialize};

/// Loaded from `.xcodepatch/config.json`, controls where the native project is searched
/// and which settings the patcher enforces.
///
/// Every field is optional in the file; missing fields fall back to the defaults below.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Platform folder name under `platforms/` (default: "ios")
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Minimum deployment target every build configuration is raised to (default: "11.0")
    #[serde(default = "default_deployment_target")]
    pub deployment_target: String,

    /// Entitlements file name wired into `CODE_SIGN_ENTITLEMENTS`, resolved as
    /// `<ProjectName>/Resources/<file>`
    #[serde(default)]
    pub entitlements: Option<String>,

    /// Fail instead of picking the last bundle when several `.xcodeproj` bundles are found
    #[serde(default)]
    pub strict_bundle_match: bool,
}

fn default_platform() -> String {
    "ios".to_string()
}

fn default_deployment_target() -> String {
    "11.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            deployment_target: default_deployment_target(),
            entitlements: None,
            strict_bundle_match: false,
        }
    }
}
