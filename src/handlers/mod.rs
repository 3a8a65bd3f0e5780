// Handler modules
pub mod assets;
pub mod auth;
pub mod organizations;
pub mod output;
pub mod spaces;

use crate::api::{ClientApi, create_client};
use crate::config::{self, types::Config};
use anyhow::{Context as _, Result, anyhow};

/// State shared by every API-backed command
pub struct Context {
    pub client: ClientApi,
    pub config: Config,
    pub json: bool,
}

impl Context {
    /// Builds the client from `config`
    pub fn new(config: Config, json: bool) -> Result<Self> {
        let params = config::client_params(&config)?;
        let client = create_client(params).context("failed to create API client")?;
        Ok(Self { client, config, json })
    }

    /// `explicit`, falling back to `[defaults] organization_id`
    pub fn organization_id(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.config.defaults.organization_id.clone())
            .ok_or_else(|| anyhow!("no organization given - pass --org or set [defaults] organization_id"))
    }

    /// `explicit`, falling back to `[defaults] space_id`
    pub fn space_id(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.config.defaults.space_id.clone())
            .ok_or_else(|| anyhow!("no space given - pass --space or set [defaults] space_id"))
    }

    /// `explicit`, falling back to `[defaults] environment_id`, then `master`
    pub fn environment_id(&self, explicit: Option<String>) -> String {
        explicit
            .or_else(|| self.config.defaults.environment_id.clone())
            .unwrap_or_else(|| "master".to_string())
    }
}

pub use assets::handle_assets;
pub use auth::handle_auth;
pub use organizations::{
    handle_app_definitions, handle_invitations, handle_members, handle_orgs, handle_teams,
};
pub use spaces::{handle_preview_keys, handle_space_members};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientParams;

    fn context(config: Config) -> Context {
        Context {
            client: create_client(ClientParams::new("token")).unwrap(),
            config,
            json: false,
        }
    }

    #[test]
    fn test_defaults_fallback() {
        let mut config = Config::default();
        config.defaults.organization_id = Some("org-default".to_string());
        let ctx = context(config);

        assert_eq!(ctx.organization_id(None).unwrap(), "org-default");
        assert_eq!(ctx.organization_id(Some("org-x".to_string())).unwrap(), "org-x");
        assert!(ctx.space_id(None).is_err());
        assert_eq!(ctx.environment_id(None), "master");
    }
}
