use clap::Args;
use xcodepatch_core::Config;

/// Command-line values that take precedence over `.xcodepatch/config.json`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Minimum deployment target to enforce (e.g. 11.0)
    #[arg(long)]
    pub deployment_target: Option<String>,

    /// Entitlements file name to reference from every build configuration
    #[arg(long)]
    pub entitlements: Option<String>,

    /// Fail when several .xcodeproj bundles are found instead of using the last one
    #[arg(long, default_value = "false")]
    pub strict: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(deployment_target) = &self.deployment_target {
            config.deployment_target = deployment_target.clone();
        }
        if let Some(entitlements) = &self.entitlements {
            config.entitlements = Some(entitlements.clone());
        }
        if self.strict {
            config.strict_bundle_match = true;
        }
    }
}
