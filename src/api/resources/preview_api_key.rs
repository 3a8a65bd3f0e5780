//! Preview API keys of a space (read-only)

use crate::api::entity::{Entity, Link};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewApiKeyProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Token for the Content Preview API
    pub access_token: String,
    /// Environments the key can read
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<Link>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wrapped preview API key
pub type PreviewApiKey = Entity<PreviewApiKeyProps>;
