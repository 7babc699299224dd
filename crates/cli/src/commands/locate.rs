use std::path::Path;

use anyhow::Result;
use clap::Args;
use xcodepatch_ios::IosProjectFinder;
use xcodepatch_pbxproj::PbxprojFormat;

use crate::{context::CommandContext, options::FormatOptions};

#[derive(Args, Debug)]
#[command(about = "Show which .xcodeproj bundle would be patched")]
pub struct LocateArgs {
    /// Fail when several .xcodeproj bundles are found instead of using the last one
    #[arg(long, default_value = "false")]
    pub strict: bool,

    #[arg(short, long, default_value = "stdout")]
    pub format: FormatOptions,
}

/// Locate the project bundle under `path`
///
/// # Errors
/// Returns error if the platform folder holds no project bundle.
pub async fn handle_locate(path: Option<&Path>, args: &LocateArgs) -> Result<()> {
    let mut context = CommandContext::new(path).await?;
    if args.strict {
        context.config.strict_bundle_match = true;
    }
    let finder = IosProjectFinder::new(&context.config, PbxprojFormat::DESCRIPTOR_FILE_NAME);
    match finder.locate(&context.project_root).await? {
        Some(project) => args
            .format
            .print(&project.to_string(), &serde_json::to_string_pretty(&project)?),
        None => {
            let searched = finder.platform_dir(&context.project_root);
            args.format.print(
                &format!("No {} folder, nothing to patch", searched.display()),
                &serde_json::json!({ "status": "skipped", "searched": searched }).to_string(),
            );
        }
    }
    Ok(())
}
