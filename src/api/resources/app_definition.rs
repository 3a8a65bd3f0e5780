//! App definitions registered under an organization

use crate::api::client::encode_segment;
use crate::api::entity::{Entity, Link};
use crate::api::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// App definition data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDefinitionProps {
    /// App name shown in the web app
    pub name: String,
    /// URL the app frontend is served from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Where the app renders
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<AppLocation>,
    /// Hosted bundle, as an alternative to `src`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<Link>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A single render location of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLocation {
    /// `app-config`, `entry-field`, `entry-sidebar`, `dialog`, `page`, ...
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_types: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_item: Option<NavigationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub name: String,
    pub path: String,
}

impl AppLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            field_types: None,
            navigation_item: None,
        }
    }
}

/// Wrapped app definition
pub type AppDefinition = Entity<AppDefinitionProps>;

impl Entity<AppDefinitionProps> {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "organizations/{}/app_definitions/{}",
            encode_segment(self.sys().organization_id()?),
            encode_segment(self.id())
        ))
    }

    /// Sends the current data and returns the updated app definition
    ///
    /// Endpoint: PUT /organizations/:orgId/app_definitions/:id
    pub async fn update(&self) -> Result<AppDefinition> {
        self.put_versioned(&self.path()?, &[]).await
    }

    /// Endpoint: DELETE /organizations/:orgId/app_definitions/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locations_serialization() {
        let props = AppDefinitionProps {
            name: "Hello".to_string(),
            src: Some("https://example.com/app".to_string()),
            locations: vec![
                AppLocation::new("app-config"),
                AppLocation {
                    location: "page".to_string(),
                    field_types: None,
                    navigation_item: Some(NavigationItem {
                        name: "Hello page".to_string(),
                        path: "/hello".to_string(),
                    }),
                },
            ],
            bundle: None,
            ..Default::default()
        };
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value["locations"][0], json!({ "location": "app-config" }));
        assert_eq!(value["locations"][1]["navigationItem"]["path"], "/hello");
        assert!(value.get("bundle").is_none());
    }
}
