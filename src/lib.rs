//! # cma-client
//!
//! Typed Rust client for the Content Management API, plus the `cma`
//! command-line tool built on top of it.
//!
//! ## Features
//!
//! - **Typed resources**: organizations, teams, team/space/organization
//!   memberships, invitations, app definitions, preview API keys, users and assets
//! - **Wrapped entities**: every response keeps its frozen `sys` metadata and
//!   gains the mutators of its resource (`update`, `delete`, `publish`, ...)
//! - **Pagination**: collections keep `total`/`skip`/`limit`
//! - **Retries**: rate-limited and failed requests are retried with backoff
//!
//! ## Example
//!
//! ```rust,no_run
//! use cma_client::{ClientParams, Query, create_client};
//!
//! # async fn run() -> Result<(), cma_client::ApiError> {
//! let client = create_client(ClientParams::new("CFPAT-..."))?;
//! let space = client.get_space("space-id").await?;
//! let env = space.get_environment("master").await?;
//!
//! for asset in env.get_assets(&Query::new().limit(10)).await? {
//!     if asset.is_draft() {
//!         asset.publish().await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use api::{ApiError, ClientApi, ClientParams, Collection, Entity, Query, create_client};
pub use error::{CmaError, Result};

use cli::{Cli, Commands};
use handlers::Context;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loads configuration for `cli` and runs its command
pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(file) => config::read_config(file)?,
        None => config::load_config(std::env::current_dir().ok().as_deref())?,
    };

    let json = cli.json;
    match cli.command {
        Commands::Auth { command } => handlers::handle_auth(command, &config).await,
        Commands::Orgs { command } => {
            handlers::handle_orgs(command, &Context::new(config, json)?).await
        }
        Commands::Teams { command } => {
            handlers::handle_teams(command, &Context::new(config, json)?).await
        }
        Commands::Members { org, limit } => {
            handlers::handle_members(org, limit, &Context::new(config, json)?).await
        }
        Commands::Invitations { command } => {
            handlers::handle_invitations(command, &Context::new(config, json)?).await
        }
        Commands::AppDefinitions { org } => {
            handlers::handle_app_definitions(org, &Context::new(config, json)?).await
        }
        Commands::SpaceMembers { space } => {
            handlers::handle_space_members(space, &Context::new(config, json)?).await
        }
        Commands::PreviewKeys { space } => {
            handlers::handle_preview_keys(space, &Context::new(config, json)?).await
        }
        Commands::Assets { command } => {
            handlers::handle_assets(command, &Context::new(config, json)?).await
        }
    }
}
