use std::path::Path;

use anyhow::Result;
use clap::Args;
use xcodepatch_core::{DescriptorFormat, HookContext, HookOutcome};
use xcodepatch_ios::{ConfigurationPatcher, Hook, IosProjectFinder};
use xcodepatch_pbxproj::PbxprojFormat;
use xcodepatch_utils::DottedNumericComparator;

use crate::{
    context::CommandContext,
    options::{ConfigOverrides, FormatOptions},
};

#[derive(Args, Debug, Clone)]
#[command(about = "Raise the deployment target of the iOS project (default command)")]
pub struct PatchArgs {
    /// Report what would change without writing the project file
    #[arg(short, long, default_value = "false")]
    pub dry_run: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[arg(short, long, default_value = "stdout")]
    pub format: FormatOptions,
}

/// Run the build hook against the project under `path`
///
/// # Errors
/// Returns error if no project bundle is found or the descriptor cannot be read or written.
pub async fn handle_patch(path: Option<&Path>, args: &PatchArgs) -> Result<()> {
    let mut context = CommandContext::new(path).await?;
    args.overrides.apply(&mut context.config);

    let format = PbxprojFormat;
    let hook = Hook::new(
        IosProjectFinder::new(&context.config, format.descriptor_file_name()),
        Box::new(format),
        ConfigurationPatcher::from_config(&context.config, Box::new(DottedNumericComparator))
            .quiet(args.dry_run || args.format.is_json()),
    )
    .dry_run(args.dry_run);

    let outcome = hook
        .run(&mut HookContext::new(&context.project_root))
        .await?;

    if args.format.is_json() {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if args.dry_run
        && let HookOutcome::Patched(report) = &outcome
    {
        for change in report.changes() {
            println!("{change}");
        }
        println!("Dry run, no changes were written");
    }
    Ok(())
}
