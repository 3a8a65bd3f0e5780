use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cma")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage organizations, teams, memberships and assets through the Content Management API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (defaults to ./.cma.toml, then ~/.cma.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the stored access token
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Organizations the token has access to
    Orgs {
        #[command(subcommand)]
        command: OrgsCommand,
    },

    /// Teams of an organization
    Teams {
        #[command(subcommand)]
        command: TeamsCommand,
    },

    /// List organization memberships
    Members {
        /// Organization id (defaults to [defaults] organization_id)
        #[arg(long)]
        org: Option<String>,

        /// Maximum number of memberships to return
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Invitations into an organization
    Invitations {
        #[command(subcommand)]
        command: InvitationsCommand,
    },

    /// List app definitions of an organization
    AppDefinitions {
        #[arg(long)]
        org: Option<String>,
    },

    /// List the memberships of a space
    SpaceMembers {
        /// Space id (defaults to [defaults] space_id)
        #[arg(long)]
        space: Option<String>,
    },

    /// List the preview API keys of a space
    PreviewKeys {
        #[arg(long)]
        space: Option<String>,
    },

    /// Assets of an environment
    Assets {
        #[command(subcommand)]
        command: AssetsCommand,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Verify a personal access token and store it
    Login {
        /// Personal access token (CFPAT-...)
        #[arg(long, env = "CMA_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Remove the stored token
    Logout,
    /// Show whether a token is configured
    Status,
}

#[derive(Subcommand)]
pub enum OrgsCommand {
    /// List organizations
    List,
    /// Show one organization
    Get {
        /// Organization id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TeamsCommand {
    /// List teams
    List {
        #[arg(long)]
        org: Option<String>,
    },
    /// Create a team
    Create {
        #[arg(long)]
        org: Option<String>,
        /// Team name
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a team
    Delete {
        #[arg(long)]
        org: Option<String>,
        /// Team id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum InvitationsCommand {
    /// Invite someone into the organization
    Create {
        #[arg(long)]
        org: Option<String>,
        /// Invitee email
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Organization role: owner, admin or member
        #[arg(long, default_value = "member")]
        role: String,
    },
    /// Show an invitation
    Get {
        #[arg(long)]
        org: Option<String>,
        /// Invitation id
        id: String,
    },
}

/// Where an asset lives
#[derive(clap::Args, Clone)]
pub struct AssetLocation {
    /// Space id (defaults to [defaults] space_id)
    #[arg(long)]
    pub space: Option<String>,

    /// Environment id (defaults to [defaults] environment_id, then master)
    #[arg(long)]
    pub env: Option<String>,
}

#[derive(Subcommand)]
pub enum AssetsCommand {
    /// List assets
    List {
        #[command(flatten)]
        location: AssetLocation,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Show one asset
    Get {
        #[command(flatten)]
        location: AssetLocation,
        id: String,
    },
    /// Publish an asset
    Publish {
        #[command(flatten)]
        location: AssetLocation,
        id: String,
    },
    /// Unpublish an asset
    Unpublish {
        #[command(flatten)]
        location: AssetLocation,
        id: String,
    },
    /// Archive an asset
    Archive {
        #[command(flatten)]
        location: AssetLocation,
        id: String,
    },
    /// Unarchive an asset
    Unarchive {
        #[command(flatten)]
        location: AssetLocation,
        id: String,
    },
    /// Process uploaded files so they get a CDN url
    Process {
        #[command(flatten)]
        location: AssetLocation,
        id: String,
        /// Only process this locale (all locales with a file otherwise)
        #[arg(long)]
        locale: Option<String>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_asset_publish() {
        let cli = Cli::parse_from(["cma", "-vv", "assets", "publish", "--space", "s1", "asset-1"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Assets {
                command: AssetsCommand::Publish { location, id },
            } => {
                assert_eq!(location.space.as_deref(), Some("s1"));
                assert_eq!(location.env, None);
                assert_eq!(id, "asset-1");
            }
            _ => panic!("expected assets publish"),
        }
    }

    #[test]
    fn test_parse_invitation_default_role() {
        let cli = Cli::parse_from([
            "cma", "invitations", "create", "ada@example.com", "--first-name", "Ada", "--last-name", "Lovelace",
        ]);
        match cli.command {
            Commands::Invitations {
                command: InvitationsCommand::Create { role, org, .. },
            } => {
                assert_eq!(role, "member");
                assert!(org.is_none());
            }
            _ => panic!("expected invitations create"),
        }
    }
}
