pub mod types;

use crate::api::ClientParams;
use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = ".cma.toml";

/// Overrides the stored access token
pub const ACCESS_TOKEN_ENV: &str = "CMA_ACCESS_TOKEN";
/// Overrides the configured host
pub const HOST_ENV: &str = "CMA_HOST";

/// Get the global config file path (~/.cma.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.cma.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults
/// Checks local config first, then global config
pub fn load_config(dir: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = dir {
        let local = local_config_path(path);
        if local.exists() {
            return read_config(&local);
        }
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            return read_config(&global);
        }
    }

    Ok(types::Config::default())
}

/// Parses a single config file
pub fn read_config(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        ConfigError::ParsingFailed(format!("{}: {}", path.display(), e)).into()
    })
}

/// Save configuration to global config file
pub fn save_global_config(config: &types::Config) -> Result<()> {
    match global_config_path() {
        Some(path) => write_config(&path, config),
        None => Err(ConfigError::NoHomeDir.into()),
    }
}

/// Writes `config` to `path`
pub fn write_config(path: &Path, config: &types::Config) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}

/// Builds client params from `config`, letting the environment override
/// the token and host
pub fn client_params(config: &types::Config) -> Result<ClientParams> {
    let token = std::env::var(ACCESS_TOKEN_ENV)
        .ok()
        .filter(|t| !t.is_empty())
        .or_else(|| config.auth.access_token.clone())
        .ok_or(ConfigError::MissingAccessToken)?;

    let mut params = ClientParams::new(token)
        .with_host(std::env::var(HOST_ENV).unwrap_or_else(|_| config.client.host.clone()))
        .with_retry(config.client.retry_on_error, config.client.retry_limit);
    params.insecure = config.client.insecure;
    params.timeout = Duration::from_secs(config.client.timeout_secs);
    if let Some(app) = &config.client.application {
        params = params.with_application(app.clone());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: types::Config = toml::from_str("").unwrap();
        assert_eq!(config.client.host, "api.contentful.com");
        assert_eq!(config.client.retry_limit, 5);
        assert!(config.client.retry_on_error);
        assert!(config.auth.access_token.is_none());
    }

    #[test]
    fn test_local_config_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            local_config_path(dir.path()),
            r#"
[auth]
access_token = "local-token"

[client]
host = "localhost:8080"
insecure = true
retry_limit = 2

[defaults]
space_id = "space-1"
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path())).unwrap();
        assert_eq!(config.auth.access_token.as_deref(), Some("local-token"));
        assert_eq!(config.client.host, "localhost:8080");
        assert!(config.client.insecure);
        assert_eq!(config.client.retry_limit, 2);
        assert_eq!(config.defaults.space_id.as_deref(), Some("space-1"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(local_config_path(dir.path()), "[client\nhost = ").unwrap();
        assert!(load_config(Some(dir.path())).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = local_config_path(dir.path());
        let mut config = types::Config::default();
        config.defaults.organization_id = Some("org-9".to_string());
        write_config(&path, &config).unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.defaults.organization_id.as_deref(), Some("org-9"));
    }

    #[test]
    fn test_auth_debug_hides_token() {
        let auth = types::AuthConfig {
            access_token: Some("CFPAT-very-secret".to_string()),
            user_email: None,
        };
        assert!(!format!("{:?}", auth).contains("very-secret"));
    }
}
