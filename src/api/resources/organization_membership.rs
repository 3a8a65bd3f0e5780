//! Organization memberships

use crate::api::client::{VERSION_HEADER, encode_segment};
use crate::api::entity::{Entity, RawEntity};
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Organization membership data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMembershipProps {
    /// `owner`, `admin` or `member`
    pub role: String,
    /// Whether the membership is active
    #[serde(default)]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso_login_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_exempt_from_restricted_mode: Option<bool>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wrapped organization membership
pub type OrganizationMembership = Entity<OrganizationMembershipProps>;

#[derive(Serialize)]
struct RoleUpdate<'a> {
    role: &'a str,
}

impl Entity<OrganizationMembershipProps> {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "organizations/{}/organization_memberships/{}",
            encode_segment(self.sys().organization_id()?),
            encode_segment(self.id())
        ))
    }

    /// Changes the member's role. Only `role` is sent; the other fields are read-only.
    ///
    /// Endpoint: PUT /organizations/:orgId/organization_memberships/:id
    pub async fn update(&self) -> Result<OrganizationMembership> {
        let version = self.sys().require_version()?;
        let body = RoleUpdate { role: &self.role };
        let raw: RawEntity<OrganizationMembershipProps> = self
            .http()
            .put(
                &self.path()?,
                Some(&body),
                &[(VERSION_HEADER, version.to_string())],
            )
            .await?;
        Ok(self.rewrap(raw))
    }

    /// Endpoint: DELETE /organizations/:orgId/organization_memberships/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }
}
