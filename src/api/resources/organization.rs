//! Organizations and the accessors for everything nested under them

use super::app_definition::{AppDefinition, AppDefinitionProps};
use super::organization_invitation::{OrganizationInvitation, OrganizationInvitationProps};
use super::organization_membership::{OrganizationMembership, OrganizationMembershipProps};
use super::space_membership::{SpaceMembership, SpaceMembershipProps};
use super::team::{Team, TeamProps};
use super::team_membership::{TeamMembership, TeamMembershipProps};
use super::team_space_membership::{TeamSpaceMembership, TeamSpaceMembershipProps};
use super::user::{User, UserProps};
use super::{create_entity, get_collection, get_entity};
use crate::api::client::{ALPHA_FEATURE_HEADER, encode_segment};
use crate::api::entity::{Collection, Entity};
use crate::api::error::Result;
use crate::api::query::Query;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alpha feature flag required by the invitation endpoints
const PENDING_ORG_MEMBERSHIP: &str = "pending-org-membership";

/// Organization data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProps {
    pub name: String,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wrapped organization
pub type Organization = Entity<OrganizationProps>;

impl Entity<OrganizationProps> {
    fn path(&self, rest: &str) -> String {
        format!("organizations/{}/{}", encode_segment(self.id()), rest)
    }

    fn invitation_headers() -> [(&'static str, String); 1] {
        [(ALPHA_FEATURE_HEADER, PENDING_ORG_MEMBERSHIP.to_string())]
    }

    // =========================================================================
    // App definitions
    // =========================================================================

    /// Endpoint: GET /organizations/:orgId/app_definitions/:id
    pub async fn get_app_definition(&self, id: &str) -> Result<AppDefinition> {
        let path = self.path(&format!("app_definitions/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/app_definitions
    pub async fn get_app_definitions(&self, query: &Query) -> Result<Collection<AppDefinitionProps>> {
        get_collection(self.http(), &self.path("app_definitions"), Some(query), &[]).await
    }

    /// Endpoint: POST /organizations/:orgId/app_definitions
    pub async fn create_app_definition(&self, data: &AppDefinitionProps) -> Result<AppDefinition> {
        create_entity(self.http(), &self.path("app_definitions"), data, &[]).await
    }

    // =========================================================================
    // Users and organization memberships
    // =========================================================================

    /// Endpoint: GET /organizations/:orgId/users/:id
    pub async fn get_user(&self, id: &str) -> Result<User> {
        get_entity(self.http(), &self.path(&format!("users/{}", encode_segment(id))), &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/users
    pub async fn get_users(&self, query: &Query) -> Result<Collection<UserProps>> {
        get_collection(self.http(), &self.path("users"), Some(query), &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/organization_memberships/:id
    pub async fn get_organization_membership(&self, id: &str) -> Result<OrganizationMembership> {
        let path = self.path(&format!("organization_memberships/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/organization_memberships
    pub async fn get_organization_memberships(
        &self,
        query: &Query,
    ) -> Result<Collection<OrganizationMembershipProps>> {
        get_collection(self.http(), &self.path("organization_memberships"), Some(query), &[]).await
    }

    // =========================================================================
    // Teams
    // =========================================================================

    /// Endpoint: POST /organizations/:orgId/teams
    pub async fn create_team(&self, data: &TeamProps) -> Result<Team> {
        create_entity(self.http(), &self.path("teams"), data, &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/teams/:id
    pub async fn get_team(&self, id: &str) -> Result<Team> {
        get_entity(self.http(), &self.path(&format!("teams/{}", encode_segment(id))), &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/teams
    pub async fn get_teams(&self, query: &Query) -> Result<Collection<TeamProps>> {
        get_collection(self.http(), &self.path("teams"), Some(query), &[]).await
    }

    // =========================================================================
    // Team memberships
    // =========================================================================

    /// Adds an organization member to a team
    ///
    /// Endpoint: POST /organizations/:orgId/teams/:teamId/team_memberships
    pub async fn create_team_membership(
        &self,
        team_id: &str,
        data: &TeamMembershipProps,
    ) -> Result<TeamMembership> {
        let path = self.path(&format!("teams/{}/team_memberships", encode_segment(team_id)));
        create_entity(self.http(), &path, data, &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/teams/:teamId/team_memberships/:id
    pub async fn get_team_membership(&self, team_id: &str, id: &str) -> Result<TeamMembership> {
        let path = self.path(&format!(
            "teams/{}/team_memberships/{}",
            encode_segment(team_id),
            encode_segment(id)
        ));
        get_entity(self.http(), &path, &[]).await
    }

    /// Memberships of one team, or of every team in the organization when
    /// `team_id` is `None`
    ///
    /// Endpoint: GET /organizations/:orgId/teams/:teamId/team_memberships
    /// or GET /organizations/:orgId/team_memberships
    pub async fn get_team_memberships(
        &self,
        team_id: Option<&str>,
        query: &Query,
    ) -> Result<Collection<TeamMembershipProps>> {
        let path = match team_id {
            Some(team) => self.path(&format!("teams/{}/team_memberships", encode_segment(team))),
            None => self.path("team_memberships"),
        };
        get_collection(self.http(), &path, Some(query), &[]).await
    }

    // =========================================================================
    // Team space memberships
    // =========================================================================

    /// Endpoint: GET /organizations/:orgId/team_space_memberships/:id
    pub async fn get_team_space_membership(&self, id: &str) -> Result<TeamSpaceMembership> {
        let path = self.path(&format!("team_space_memberships/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Team space memberships across the organization, narrowed to one team
    /// through `sys.team.sys.id` when `team_id` is given
    ///
    /// Endpoint: GET /organizations/:orgId/team_space_memberships
    pub async fn get_team_space_memberships(
        &self,
        team_id: Option<&str>,
        query: &Query,
    ) -> Result<Collection<TeamSpaceMembershipProps>> {
        let query = match team_id {
            Some(team) => query.clone().param("sys.team.sys.id", team),
            None => query.clone(),
        };
        get_collection(self.http(), &self.path("team_space_memberships"), Some(&query), &[]).await
    }

    // =========================================================================
    // Space memberships across the organization
    // =========================================================================

    /// Endpoint: GET /organizations/:orgId/space_memberships/:id
    pub async fn get_organization_space_membership(&self, id: &str) -> Result<SpaceMembership> {
        let path = self.path(&format!("space_memberships/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /organizations/:orgId/space_memberships
    pub async fn get_organization_space_memberships(
        &self,
        query: &Query,
    ) -> Result<Collection<SpaceMembershipProps>> {
        get_collection(self.http(), &self.path("space_memberships"), Some(query), &[]).await
    }

    // =========================================================================
    // Invitations
    // =========================================================================

    /// Endpoint: POST /organizations/:orgId/invitations
    pub async fn create_organization_invitation(
        &self,
        data: &OrganizationInvitationProps,
    ) -> Result<OrganizationInvitation> {
        let headers = Self::invitation_headers();
        create_entity(self.http(), &self.path("invitations"), data, &headers).await
    }

    /// Endpoint: GET /organizations/:orgId/invitations/:id
    pub async fn get_organization_invitation(&self, id: &str) -> Result<OrganizationInvitation> {
        let headers = Self::invitation_headers();
        let path = self.path(&format!("invitations/{}", encode_segment(id)));
        get_entity(self.http(), &path, &headers).await
    }
}
