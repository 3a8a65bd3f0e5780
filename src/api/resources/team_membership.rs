//! Memberships of organization members in a team

use crate::api::client::encode_segment;
use crate::api::entity::Entity;
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team membership data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembershipProps {
    /// Team admins can manage the team's members
    #[serde(default)]
    pub admin: bool,
    /// Organization membership the team membership is created from
    #[serde(default)]
    pub organization_membership_id: String,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TeamMembershipProps {
    pub fn new(organization_membership_id: impl Into<String>, admin: bool) -> Self {
        Self {
            admin,
            organization_membership_id: organization_membership_id.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// Wrapped team membership
pub type TeamMembership = Entity<TeamMembershipProps>;

impl Entity<TeamMembershipProps> {
    fn path(&self) -> Result<String> {
        let sys = self.sys();
        Ok(format!(
            "organizations/{}/teams/{}/team_memberships/{}",
            encode_segment(sys.organization_id()?),
            encode_segment(sys.team_id()?),
            encode_segment(self.id())
        ))
    }

    /// Endpoint: PUT /organizations/:orgId/teams/:teamId/team_memberships/:id
    pub async fn update(&self) -> Result<TeamMembership> {
        self.put_versioned(&self.path()?, &[]).await
    }

    /// Endpoint: DELETE /organizations/:orgId/teams/:teamId/team_memberships/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }
}
