//! Users (read-only)

use crate::api::entity::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User profile data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProps {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub activated: bool,
    #[serde(default)]
    pub sign_in_count: u64,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(rename = "2faEnabled", default, skip_serializing_if = "Option::is_none")]
    pub two_factor_enabled: Option<bool>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UserProps {
    /// First and last name joined, or the email when both are empty
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// Wrapped user
pub type User = Entity<UserProps>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let user = UserProps {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Ada Lovelace");

        let anonymous = UserProps {
            email: "ghost@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(anonymous.display_name(), "ghost@example.com");
    }

    #[test]
    fn test_two_factor_field_name() {
        let user: UserProps = serde_json::from_str(r#"{"email":"a@b.c","2faEnabled":true}"#).unwrap();
        assert_eq!(user.two_factor_enabled, Some(true));
    }
}
