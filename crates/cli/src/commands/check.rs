use std::path::Path;

use anyhow::Result;
use clap::Args;
use xcodepatch_core::HookContext;
use xcodepatch_ios::Hook;
use xcodepatch_utils::display_configuration;

use crate::{
    context::CommandContext,
    options::{ConfigOverrides, FormatOptions},
};

#[derive(Args, Debug)]
#[command(about = "Check the deployment target of every build configuration")]
pub struct CheckArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[arg(short, long, default_value = "stdout")]
    pub format: FormatOptions,
}

/// Check build configurations without writing anything
///
/// # Errors
/// Returns error if no project bundle is found or the descriptor cannot be parsed.
pub async fn handle_check(path: Option<&Path>, args: &CheckArgs) -> Result<()> {
    let mut context = CommandContext::new(path).await?;
    args.overrides.apply(&mut context.config);
    let hook = Hook::from_config(&context.config);

    let Some(descriptor) = hook
        .load(&mut HookContext::new(&context.project_root))
        .await?
    else {
        let searched = hook.finder().platform_dir(&context.project_root);
        args.format.print(
            &format!("No {} folder, nothing to check", searched.display()),
            &serde_json::json!({ "status": "skipped", "searched": searched }).to_string(),
        );
        return Ok(());
    };

    let threshold = hook.patcher().deployment_target();
    let statuses = hook.patcher().statuses(descriptor.as_ref());
    if args.format.is_json() {
        let json = statuses
            .iter()
            .map(|status| {
                serde_json::json!({
                    "configuration": status.configuration,
                    "deploymentTarget": status.deployment_target,
                    "needsUpdate": status.needs_update,
                })
            })
            .collect::<Vec<_>>();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "descriptorPath": descriptor.path(),
                "threshold": threshold,
                "configurations": json,
            }))?
        );
    } else {
        println!(
            "Found {} build configurations in {}",
            statuses.len(),
            descriptor.path().display()
        );
        for status in &statuses {
            println!(
                "{}",
                display_configuration(
                    &status.configuration,
                    status.deployment_target.as_deref(),
                    threshold,
                    status.needs_update,
                )
            );
        }
    }
    Ok(())
}
