//! Content Management API client
//!
//! Provides typed, authenticated access to organizations, teams,
//! memberships, invitations, app definitions, spaces and assets. Every
//! response is wrapped into an [`Entity`] whose `sys` is frozen and which
//! carries the mutators of its resource.
//!
//! # Example
//!
//! ```rust,no_run
//! use cma_client::api::{ClientParams, Query, TeamProps, create_client};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client(ClientParams::new("CFPAT-..."))?;
//!
//! let org = client.get_organization("org-id").await?;
//! let mut team = org.create_team(&TeamProps::new("Editors")).await?;
//!
//! team.description = Some("Everyone who edits content".to_string());
//! let team = team.update().await?;
//! println!("{} is at version {:?}", team.name, team.sys().version);
//!
//! for team in org.get_teams(&Query::new().limit(100)).await? {
//!     println!("Team: {}", team.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_api;
pub mod entity;
pub mod error;
pub mod query;
pub mod resources;

// Re-export commonly used items
pub use client::{ClientParams, HttpClient};
pub use client_api::{ClientApi, create_client};
pub use entity::{Collection, Entity, Link, RawCollection, RawEntity, Sys, wrap, wrap_collection};
pub use error::{ApiError, Result};
pub use query::Query;
pub use resources::app_definition::{AppDefinition, AppDefinitionProps, AppLocation, NavigationItem};
pub use resources::asset::{Asset, AssetFields, AssetFile, AssetProps, ProcessOptions};
pub use resources::environment::{Environment, EnvironmentProps};
pub use resources::organization::{Organization, OrganizationProps};
pub use resources::organization_invitation::{OrganizationInvitation, OrganizationInvitationProps};
pub use resources::organization_membership::{OrganizationMembership, OrganizationMembershipProps};
pub use resources::preview_api_key::{PreviewApiKey, PreviewApiKeyProps};
pub use resources::space::{Space, SpaceProps};
pub use resources::space_membership::{CreateSpaceMembershipProps, SpaceMembership, SpaceMembershipProps};
pub use resources::team::{Team, TeamProps};
pub use resources::team_membership::{TeamMembership, TeamMembershipProps};
pub use resources::team_space_membership::{TeamSpaceMembership, TeamSpaceMembershipProps};
pub use resources::user::{User, UserProps};
