use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::context::CommandContext;

#[derive(Args, Debug)]
#[command(about = "Show the effective xcodepatch configuration")]
pub struct ConfigArgs {}

/// Display xcodepatch configuration
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(path: Option<&Path>, _args: &ConfigArgs) -> Result<()> {
    let context = CommandContext::new(path).await?;
    println!("{}", serde_json::to_string_pretty(&context.config)?);
    Ok(())
}
