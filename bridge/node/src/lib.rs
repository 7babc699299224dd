use napi::{Error, Result};
use napi_derive::napi;
use std::path::Path;
use xcodepatch_core::HookContext;
use xcodepatch_ios::Hook;
use xcodepatch_utils::get_xcodepatch_config;

#[napi]
/// # Errors
///
/// Returns an error if the CLI command execution fails.
pub async fn main(args: Vec<String>) -> Result<()> {
  let mut argv = vec!["xcodepatch".to_string()];
  argv.extend(args);
  xcodepatch_cli::main(&argv)
    .await
    .map_err(|e| Error::from_reason(e.to_string()))
}

#[napi]
/// Run the build hook for `project_root` and return the outcome as JSON.
///
/// # Errors
///
/// Returns an error if no project bundle is found or the descriptor cannot be patched.
pub async fn run_hook(project_root: String) -> Result<String> {
  let config = get_xcodepatch_config(Path::new(&project_root))
    .await
    .map_err(|e| Error::from_reason(e.to_string()))?;
  let outcome = Hook::from_config(&config)
    .run(&mut HookContext::new(project_root))
    .await
    .map_err(|e| Error::from_reason(e.to_string()))?;
  serde_json::to_string(&outcome).map_err(|e| Error::from_reason(e.to_string()))
}
