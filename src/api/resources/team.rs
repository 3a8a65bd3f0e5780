//! Teams inside an organization

use crate::api::client::encode_segment;
use crate::api::entity::Entity;
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TeamProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Wrapped team
pub type Team = Entity<TeamProps>;

impl Entity<TeamProps> {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "organizations/{}/teams/{}",
            encode_segment(self.sys().organization_id()?),
            encode_segment(self.id())
        ))
    }

    /// Number of organization members in the team, as reported by `sys.memberCount`
    pub fn member_count(&self) -> Option<u64> {
        self.sys().extra.get("memberCount").and_then(|v| v.as_u64())
    }

    /// Endpoint: PUT /organizations/:orgId/teams/:id
    pub async fn update(&self) -> Result<Team> {
        self.put_versioned(&self.path()?, &[]).await
    }

    /// Endpoint: DELETE /organizations/:orgId/teams/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }
}
