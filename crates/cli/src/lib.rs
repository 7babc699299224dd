use anyhow::Result;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    commands::{
        CheckArgs, ConfigArgs, LocateArgs, PatchArgs, handle_check, handle_config, handle_locate,
        handle_patch,
    },
    options::{ConfigOverrides, FormatOptions},
};
pub mod commands;
mod context;
pub mod options;

#[derive(Parser, Debug)]
#[command(
    name = "xcodepatch",
    author,
    version,
    about = "Raise the iOS deployment target of a mobile build's Xcode project",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Build root to search (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    path: Option<PathBuf>,

    #[arg(short, long, default_value = "false")]
    dry_run: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[arg(short, long, default_value = "stdout")]
    format: FormatOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Patch(PatchArgs),
    Locate(LocateArgs),
    Check(CheckArgs),
    Config(ConfigArgs),
}

/// # Errors
/// Returns error if the selected command fails.
pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    let path = cli.path.as_deref();
    if let Some(command) = cli.command {
        match command {
            Commands::Patch(args) => handle_patch(path, &args).await?,
            Commands::Locate(args) => handle_locate(path, &args).await?,
            Commands::Check(args) => handle_check(path, &args).await?,
            Commands::Config(args) => handle_config(path, &args).await?,
        }
    } else {
        handle_patch(
            path,
            &PatchArgs {
                dry_run: cli.dry_run,
                overrides: cli.overrides,
                format: cli.format,
            },
        )
        .await?;
    }
    Ok(())
}
