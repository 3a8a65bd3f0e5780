//! Credential storage and retrieval for the Content Management API
//!
//! Stores the personal access token in ~/.cma.toml. `CMA_ACCESS_TOKEN`
//! takes precedence over the stored token when set.

use crate::config::{
    ACCESS_TOKEN_ENV, global_config_path, read_config,
    types::{AuthConfig, Config},
    write_config,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

fn config_file() -> Result<PathBuf> {
    global_config_path().context("could not determine the home directory")
}

/// Config at `path` for rewriting; a missing file is an empty config, an
/// unreadable one is an error so it is never overwritten
fn load_for_update(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    read_config(path).with_context(|| format!("reading {}", path.display()))
}

/// Config at `path` for status checks, ignoring unreadable files
fn load_lenient(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    read_config(path).unwrap_or_else(|e| {
        log::warn!("ignoring {}: {}", path.display(), e);
        Config::default()
    })
}

/// Save credentials to the global config file
pub fn save_credentials(access_token: &str, user_email: Option<&str>) -> Result<()> {
    save_credentials_to(&config_file()?, access_token, user_email)
}

/// Save credentials to `path`, preserving the other config sections
pub fn save_credentials_to(path: &Path, access_token: &str, user_email: Option<&str>) -> Result<()> {
    let mut config = load_for_update(path)?;
    config.auth = AuthConfig {
        access_token: Some(access_token.to_string()),
        user_email: user_email.map(|s| s.to_string()),
    };
    write_config(path, &config).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("saved credentials to {}", path.display());
    Ok(())
}

/// Get the current access token, from the environment or the global config
pub fn get_access_token() -> Option<String> {
    if let Some(token) = env_token() {
        return Some(token);
    }
    let path = global_config_path()?;
    stored_token(&path)
}

fn env_token() -> Option<String> {
    std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.is_empty())
}

/// Token stored in the config file at `path`
pub fn stored_token(path: &Path) -> Option<String> {
    load_lenient(path).auth.access_token
}

/// Check if a token is available
pub fn is_authenticated() -> bool {
    get_access_token().is_some()
}

/// Get authentication status, including where the token comes from
pub fn get_auth_status() -> AuthStatus {
    if env_token().is_some() {
        return AuthStatus::Authenticated {
            email: None,
            source: TokenSource::Environment,
        };
    }
    match global_config_path() {
        Some(path) => auth_status_from(&path),
        None => AuthStatus::NotAuthenticated,
    }
}

/// Status derived from the config file at `path` only
pub fn auth_status_from(path: &Path) -> AuthStatus {
    let auth = load_lenient(path).auth;
    match auth.access_token {
        None => AuthStatus::NotAuthenticated,
        Some(_) => AuthStatus::Authenticated {
            email: auth.user_email,
            source: TokenSource::ConfigFile,
        },
    }
}

/// Clear stored credentials (logout)
pub fn clear_credentials() -> Result<()> {
    clear_credentials_at(&config_file()?)
}

/// Clear the credentials stored at `path`
pub fn clear_credentials_at(path: &Path) -> Result<()> {
    let mut config = load_for_update(path)?;
    config.auth = AuthConfig::default();
    write_config(path, &config).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Where the active token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    ConfigFile,
}

/// Authentication status enum
#[derive(Debug, PartialEq, Eq)]
pub enum AuthStatus {
    NotAuthenticated,
    Authenticated {
        email: Option<String>,
        source: TokenSource,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cma.toml");

        assert_eq!(auth_status_from(&path), AuthStatus::NotAuthenticated);

        save_credentials_to(&path, "CFPAT-abc", Some("ada@example.com")).unwrap();
        assert_eq!(stored_token(&path).as_deref(), Some("CFPAT-abc"));
        assert_eq!(
            auth_status_from(&path),
            AuthStatus::Authenticated {
                email: Some("ada@example.com".to_string()),
                source: TokenSource::ConfigFile,
            }
        );

        clear_credentials_at(&path).unwrap();
        assert_eq!(stored_token(&path), None);
    }

    #[test]
    fn test_save_preserves_other_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cma.toml");
        std::fs::write(&path, "[defaults]\nspace_id = \"space-1\"\n").unwrap();

        save_credentials_to(&path, "CFPAT-abc", None).unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.defaults.space_id.as_deref(), Some("space-1"));
        assert_eq!(config.auth.access_token.as_deref(), Some("CFPAT-abc"));
    }

    #[test]
    fn test_malformed_config_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cma.toml");
        let malformed = "[defaults\nspace_id = \"space-1\"\norganization_id = \"org-1\"\n";
        std::fs::write(&path, malformed).unwrap();

        assert!(save_credentials_to(&path, "CFPAT-new", None).is_err());
        assert!(clear_credentials_at(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), malformed);

        // status checks stay lenient
        assert_eq!(stored_token(&path), None);
        assert_eq!(auth_status_from(&path), AuthStatus::NotAuthenticated);
    }
}
