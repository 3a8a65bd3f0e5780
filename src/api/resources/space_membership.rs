//! User access to a space

use crate::api::client::encode_segment;
use crate::api::entity::{Entity, Link};
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Space membership data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceMembershipProps {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<Link>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Body for inviting a user into a space by email
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceMembershipProps {
    pub admin: bool,
    pub roles: Vec<Link>,
    pub email: String,
}

/// Wrapped space membership
pub type SpaceMembership = Entity<SpaceMembershipProps>;

impl Entity<SpaceMembershipProps> {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "spaces/{}/space_memberships/{}",
            encode_segment(self.sys().space_id()?),
            encode_segment(self.id())
        ))
    }

    /// Linked user, from `sys.user`
    pub fn user_id(&self) -> Option<&str> {
        self.sys().user.as_ref().map(Link::id)
    }

    /// Endpoint: PUT /spaces/:spaceId/space_memberships/:id
    pub async fn update(&self) -> Result<SpaceMembership> {
        self.put_versioned(&self.path()?, &[]).await
    }

    /// Endpoint: DELETE /spaces/:spaceId/space_memberships/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }
}
