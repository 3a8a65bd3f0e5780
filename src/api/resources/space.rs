//! Spaces and their membership / key accessors

use super::environment::{Environment, EnvironmentProps};
use super::preview_api_key::{PreviewApiKey, PreviewApiKeyProps};
use super::space_membership::{CreateSpaceMembershipProps, SpaceMembership, SpaceMembershipProps};
use super::team_space_membership::{TeamSpaceMembership, TeamSpaceMembershipProps};
use super::{create_entity, create_entity_with_id, get_collection, get_entity};
use crate::api::client::{TEAM_HEADER, encode_segment};
use crate::api::entity::{Collection, Entity};
use crate::api::error::Result;
use crate::api::query::Query;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Space data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wrapped space
pub type Space = Entity<SpaceProps>;

impl Entity<SpaceProps> {
    fn path(&self, rest: &str) -> String {
        format!("spaces/{}/{}", encode_segment(self.id()), rest)
    }

    /// Endpoint: GET /spaces/:spaceId/environments/:id
    pub async fn get_environment(&self, id: &str) -> Result<Environment> {
        let path = self.path(&format!("environments/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /spaces/:spaceId/environments
    pub async fn get_environments(&self, query: &Query) -> Result<Collection<EnvironmentProps>> {
        get_collection(self.http(), &self.path("environments"), Some(query), &[]).await
    }

    // =========================================================================
    // Space memberships
    // =========================================================================

    /// Endpoint: GET /spaces/:spaceId/space_memberships/:id
    pub async fn get_space_membership(&self, id: &str) -> Result<SpaceMembership> {
        let path = self.path(&format!("space_memberships/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /spaces/:spaceId/space_memberships
    pub async fn get_space_memberships(&self, query: &Query) -> Result<Collection<SpaceMembershipProps>> {
        get_collection(self.http(), &self.path("space_memberships"), Some(query), &[]).await
    }

    /// Endpoint: POST /spaces/:spaceId/space_memberships
    pub async fn create_space_membership(
        &self,
        data: &CreateSpaceMembershipProps,
    ) -> Result<SpaceMembership> {
        create_entity(self.http(), &self.path("space_memberships"), data, &[]).await
    }

    /// Endpoint: PUT /spaces/:spaceId/space_memberships/:id
    pub async fn create_space_membership_with_id(
        &self,
        id: &str,
        data: &CreateSpaceMembershipProps,
    ) -> Result<SpaceMembership> {
        let path = self.path(&format!("space_memberships/{}", encode_segment(id)));
        create_entity_with_id(self.http(), &path, data, &[]).await
    }

    // =========================================================================
    // Team space memberships
    // =========================================================================

    /// Endpoint: GET /spaces/:spaceId/team_space_memberships/:id
    pub async fn get_team_space_membership(&self, id: &str) -> Result<TeamSpaceMembership> {
        let path = self.path(&format!("team_space_memberships/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /spaces/:spaceId/team_space_memberships
    pub async fn get_team_space_memberships(
        &self,
        query: &Query,
    ) -> Result<Collection<TeamSpaceMembershipProps>> {
        get_collection(self.http(), &self.path("team_space_memberships"), Some(query), &[]).await
    }

    /// Gives `team_id` access to this space
    ///
    /// Endpoint: POST /spaces/:spaceId/team_space_memberships
    pub async fn create_team_space_membership(
        &self,
        team_id: &str,
        data: &TeamSpaceMembershipProps,
    ) -> Result<TeamSpaceMembership> {
        let headers = [(TEAM_HEADER, team_id.to_string())];
        create_entity(self.http(), &self.path("team_space_memberships"), data, &headers).await
    }

    // =========================================================================
    // Preview API keys
    // =========================================================================

    /// Endpoint: GET /spaces/:spaceId/preview_api_keys/:id
    pub async fn get_preview_api_key(&self, id: &str) -> Result<PreviewApiKey> {
        let path = self.path(&format!("preview_api_keys/{}", encode_segment(id)));
        get_entity(self.http(), &path, &[]).await
    }

    /// Endpoint: GET /spaces/:spaceId/preview_api_keys
    pub async fn get_preview_api_keys(&self) -> Result<Collection<PreviewApiKeyProps>> {
        get_collection(self.http(), &self.path("preview_api_keys"), None, &[]).await
    }
}
