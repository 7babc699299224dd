use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::read_to_string;
use xcodepatch_core::Config;

#[must_use]
pub fn get_xcodepatch_dir(project_root: &Path) -> PathBuf {
    project_root.join(".xcodepatch")
}

/// Load `.xcodepatch/config.json` under `project_root`, or the defaults when it does not exist.
///
/// # Errors
/// Returns error if the file exists but cannot be read or is not valid JSON.
pub async fn get_xcodepatch_config(project_root: &Path) -> Result<Config> {
    let config_file = get_xcodepatch_dir(project_root).join("config.json");
    if !config_file.is_file() {
        return Ok(Config::default());
    }
    let content = read_to_string(&config_file)
        .await
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid configuration in {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_get_xcodepatch_dir() {
        let dir = get_xcodepatch_dir(Path::new("/work"));
        assert!(dir.ends_with(".xcodepatch"));
        assert_eq!(dir.parent().unwrap(), Path::new("/work"));
    }

    #[tokio::test]
    async fn test_get_xcodepatch_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let config = get_xcodepatch_config(temp_dir.path()).await.unwrap();
        assert_eq!(config, Config::default());

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_get_xcodepatch_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join(".xcodepatch");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.json"),
            r#"{"deploymentTarget": "13.0", "entitlements": "App.entitlements"}"#,
        )
        .unwrap();

        let config = get_xcodepatch_config(temp_dir.path()).await.unwrap();
        assert_eq!(config.deployment_target, "13.0");
        assert_eq!(config.entitlements.as_deref(), Some("App.entitlements"));
        assert_eq!(config.platform, "ios");

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_get_xcodepatch_config_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join(".xcodepatch");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.json"), "{ not json").unwrap();

        let result = get_xcodepatch_config(temp_dir.path()).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid configuration")
        );

        temp_dir.close().unwrap();
    }
}
