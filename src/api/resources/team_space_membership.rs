//! Team access to a space

use crate::api::client::{TEAM_HEADER, encode_segment};
use crate::api::entity::{Entity, Link};
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team space membership data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSpaceMembershipProps {
    /// Grants space admin to every team member
    #[serde(default)]
    pub admin: bool,
    /// Roles granted when not admin
    #[serde(default)]
    pub roles: Vec<Link>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TeamSpaceMembershipProps {
    pub fn admin() -> Self {
        Self {
            admin: true,
            roles: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_roles<I, S>(role_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin: false,
            roles: role_ids.into_iter().map(|id| Link::new("Role", id)).collect(),
            extra: BTreeMap::new(),
        }
    }
}

/// Wrapped team space membership
pub type TeamSpaceMembership = Entity<TeamSpaceMembershipProps>;

impl Entity<TeamSpaceMembershipProps> {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "spaces/{}/team_space_memberships/{}",
            encode_segment(self.sys().space_id()?),
            encode_segment(self.id())
        ))
    }

    /// Endpoint: PUT /spaces/:spaceId/team_space_memberships/:id
    pub async fn update(&self) -> Result<TeamSpaceMembership> {
        let team = [(TEAM_HEADER, self.sys().team_id()?.to_string())];
        self.put_versioned(&self.path()?, &team).await
    }

    /// Endpoint: DELETE /spaces/:spaceId/team_space_memberships/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }
}
