//! Pending invitations into an organization
//!
//! Invitations carry no mutators; the wrapper only freezes `sys` and gives
//! access to the status fields the server puts there.

use crate::api::entity::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Invitation data, also the body of `create_organization_invitation`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInvitationProps {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Organization role the invitee will get
    pub role: String,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wrapped organization invitation
pub type OrganizationInvitation = Entity<OrganizationInvitationProps>;

impl Entity<OrganizationInvitationProps> {
    /// `pending`, `accepted`, ... from `sys.status`
    pub fn status(&self) -> Option<&str> {
        self.sys().extra.get("status").and_then(|v| v.as_str())
    }

    /// Link the invitee follows to accept, from `sys.invitationUrl`
    pub fn invitation_url(&self) -> Option<&str> {
        self.sys().extra.get("invitationUrl").and_then(|v| v.as_str())
    }
}
